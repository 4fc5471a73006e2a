//! Typed HTTP client for the Supplier Hub API.
//!
//! One method per endpoint. The bearer token is read from an injected
//! [`SessionStore`]; `login` writes it and `logout` clears the session.
//! On a non-2xx response the body's `message` becomes the error text, with a
//! per-operation fallback when the body carries none. Requests are sent
//! once: no retry, timeout or caching.

pub mod session;

use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::database::models::{Order, Product, QuoteLine, QuoteRequest, Role, User};
use crate::handlers::auth::{LoginResponse, RegisterResponse};
use crate::middleware::{MessageBody, MessageWithData};
use crate::services::enrichment::{EnrichedQuotation, OrderView};

pub use session::{MemorySessionStore, SessionStore, TOKEN_KEY};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("Authentication token is missing or expired")]
    MissingToken,

    #[error("invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("session store error: {0}")]
    Session(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Partial user update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Product body for create (all fields required server-side) and update.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_stock_level: Option<i64>,
}

pub struct ApiClient<S: SessionStore> {
    http: reqwest::Client,
    base_url: Url,
    session: S,
}

impl<S: SessionStore> ApiClient<S> {
    /// `base_url` is the server root, e.g. `http://localhost:5000`.
    pub fn new(base_url: &str, session: S) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    // Auth

    pub async fn register(&self, input: &RegisterInput) -> Result<RegisterResponse, ClientError> {
        let request = self.request(Method::POST, "api/auth/register")?.json(input);
        self.send(request, "Failed to register user").await
    }

    /// Stores the returned token in the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let request = self
            .request(Method::POST, "api/auth/login")?
            .json(&json!({ "email": email, "password": password }));
        let response: LoginResponse = self.send(request, "Failed to login").await?;

        self.session.set(TOKEN_KEY, &response.token)?;
        Ok(response)
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        self.session.clear()
    }

    pub async fn fetch_users(&self) -> Result<Vec<User>, ClientError> {
        let request = self.authorized(Method::GET, "api/auth/users")?;
        self.send(request, "Failed to fetch users").await
    }

    pub async fn update_user(&self, id: Uuid, update: &UserUpdate) -> Result<User, ClientError> {
        let request = self
            .authorized(Method::PUT, &format!("api/auth/users/{}", id))?
            .json(update);
        self.send(request, "Failed to update user").await
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<MessageBody, ClientError> {
        let request = self.authorized(Method::DELETE, &format!("api/auth/users/{}", id))?;
        self.send(request, "Failed to delete user").await
    }

    /// Supplier picker listing; any authenticated role.
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let request = self.authorized(Method::GET, "api/users")?;
        self.send(request, "Failed to fetch users").await
    }

    // Products

    pub async fn fetch_products(&self) -> Result<Vec<Product>, ClientError> {
        let request = self.authorized(Method::GET, "api/products")?;
        self.send(request, "Failed to fetch products").await
    }

    pub async fn add_product(&self, input: &ProductInput) -> Result<Product, ClientError> {
        let request = self.authorized(Method::POST, "api/products")?.json(input);
        self.send(request, "Error adding product").await
    }

    pub async fn update_product(&self, id: Uuid, input: &ProductInput) -> Result<Product, ClientError> {
        let request = self
            .authorized(Method::PUT, &format!("api/products/{}", id))?
            .json(input);
        self.send(request, "Failed to update product").await
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<MessageBody, ClientError> {
        let request = self.authorized(Method::DELETE, &format!("api/products/{}", id))?;
        self.send(request, "Failed to delete product").await
    }

    pub async fn suggest_products(&self) -> Result<Vec<Product>, ClientError> {
        let request = self.authorized(Method::GET, "api/suggest-products")?;
        self.send(request, "Failed to fetch suggestions").await
    }

    // Orders

    pub async fn place_order(&self, product_id: Uuid, quantity: i64) -> Result<Order, ClientError> {
        let request = self
            .authorized(Method::POST, "api/orders")?
            .json(&json!({ "productId": product_id, "quantity": quantity }));
        self.send(request, "Failed to place order").await
    }

    pub async fn fetch_orders(&self) -> Result<Vec<OrderView>, ClientError> {
        let request = self.authorized(Method::GET, "api/orders")?;
        self.send(request, "Failed to fetch orders").await
    }

    // Quotations

    pub async fn save_quote_request(
        &self,
        supplier_id: Uuid,
        products: &[QuoteLine],
        date: Option<DateTime<Utc>>,
    ) -> Result<MessageWithData<QuoteRequest>, ClientError> {
        let mut body = json!({ "supplierId": supplier_id, "products": products });
        if let Some(date) = date {
            body["date"] = json!(date);
        }
        let request = self.authorized(Method::POST, "api/quotes/save-quotations")?.json(&body);
        self.send(request, "Failed to save quotation request").await
    }

    /// Public; sent without a token.
    pub async fn fetch_quotation_history(&self) -> Result<Vec<EnrichedQuotation>, ClientError> {
        let request = self.request(Method::GET, "api/quotes/history")?;
        self.send(request, "Failed to fetch quotation history").await
    }

    pub async fn fetch_supplier_quotations(&self) -> Result<Vec<EnrichedQuotation>, ClientError> {
        let request = self.authorized(Method::GET, "api/quotes/supplier/quotations")?;
        self.send(request, "Failed to fetch quotations").await
    }

    pub async fn update_quotation_status(
        &self,
        quotation_id: Uuid,
        status: &str,
    ) -> Result<MessageWithData<QuoteRequest>, ClientError> {
        let request = self
            .authorized(Method::PUT, "api/quotes/supplier/quotations/status")?
            .json(&json!({ "quotationId": quotation_id, "status": status }));
        self.send(request, "Failed to update quotation status").await
    }

    pub async fn move_to_accepted(&self, quotation_id: Uuid) -> Result<MessageBody, ClientError> {
        let request = self.authorized(
            Method::POST,
            &format!("api/quotes/move-to-accepted/{}", quotation_id),
        )?;
        self.send(request, "Failed to move quotation to accepted").await
    }

    pub async fn fetch_accepted_quotations_for_supplier(&self) -> Result<Vec<EnrichedQuotation>, ClientError> {
        let request = self.authorized(Method::GET, "api/quotes/supplier/accepted-quotations")?;
        self.send(request, "Failed to fetch accepted quotations").await
    }

    pub async fn fetch_all_accepted_quotations(&self) -> Result<Vec<EnrichedQuotation>, ClientError> {
        let request = self.authorized(Method::GET, "api/quotes/accepted-quotations")?;
        self.send(request, "Failed to fetch accepted quotations").await
    }

    // Analytics

    pub async fn product_count(&self) -> Result<i64, ClientError> {
        let request = self.authorized(Method::GET, "api/analytics/product-count")?;
        self.send(request, "Failed to fetch product count").await
    }

    pub async fn health(&self) -> Result<Value, ClientError> {
        let request = self.request(Method::GET, "health")?;
        self.send(request, "Server is unavailable").await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.base_url.join(path)?;
        Ok(self.http.request(method, url))
    }

    /// Fails with `MissingToken` before anything is sent.
    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self
            .session
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .ok_or(ClientError::MissingToken)?;
        Ok(self.request(method, path)?.bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, fallback: &str) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = failure_message(&body, fallback);
            tracing::debug!("API call failed with {}: {}", status, message);
            return Err(ClientError::Api { status, message });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// `message` from a JSON error body, else the operation's fallback.
fn failure_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_prefers_body_message() {
        assert_eq!(
            failure_message(r#"{"message":"Product not found","code":"NOT_FOUND"}"#, "Failed to update product"),
            "Product not found"
        );
        assert_eq!(failure_message("Bad Gateway", "Failed to fetch users"), "Failed to fetch users");
        assert_eq!(failure_message(r#"{"error":"x"}"#, "Failed to login"), "Failed to login");
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = ApiClient::new("http://localhost:5000/prefix", MemorySessionStore::new()).unwrap();
        assert_eq!(
            client.base_url().join("api/products").unwrap().as_str(),
            "http://localhost:5000/prefix/api/products"
        );
    }

    #[tokio::test]
    async fn protected_call_without_token_is_not_sent() {
        // Port 9 (discard) would refuse or hang; a MissingToken proves no request was made.
        let client = ApiClient::new("http://127.0.0.1:9", MemorySessionStore::new()).unwrap();
        let err = client.fetch_products().await.unwrap_err();
        assert!(matches!(err, ClientError::MissingToken));
    }
}
