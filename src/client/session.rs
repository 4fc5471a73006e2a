use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::ClientError;

/// Key under which the bearer token is kept.
pub const TOKEN_KEY: &str = "authToken";

/// Session-scoped key/value storage the client reads its token from.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove(&self, key: &str) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

/// Lives as long as the process; clones share one session.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.values
            .write()
            .map_err(|_| ClientError::Session("session lock poisoned".into()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.values
            .write()
            .map_err(|_| ClientError::Session("session lock poisoned".into()))?
            .remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        self.values
            .write()
            .map_err(|_| ClientError::Session("session lock poisoned".into()))?
            .clear();
        Ok(())
    }
}
