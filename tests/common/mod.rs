#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use supplier_hub::auth::TokenService;
use supplier_hub::database::MemoryStore;
use supplier_hub::{router, AppState};

pub const SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "correct horse battery staple";

/// One server per test: each `#[tokio::test]` owns its runtime, so the
/// server task must live on it.
pub struct TestApp {
    pub base_url: String,
    pub store: MemoryStore,
    pub http: reqwest::Client,
}

pub async fn spawn_app() -> Result<TestApp> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;

    let store = MemoryStore::new();
    let tokens = TokenService::new(SECRET, chrono::Duration::days(30))?;
    let state = AppState::new(Arc::new(store.clone()), tokens);

    tokio::spawn(async move {
        let _ = axum::serve(listener, router(state)).await;
    });

    let app = TestApp {
        base_url: format!("http://127.0.0.1:{}", port),
        store,
        http: reqwest::Client::new(),
    };
    app.wait_ready(Duration::from_secs(5)).await?;
    Ok(app)
}

impl TestApp {
    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.http.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Response> {
        let mut request = self.http.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: &Value) -> Result<Response> {
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: &Value) -> Result<Response> {
        let mut request = self.http.put(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<Response> {
        let mut request = self.http.delete(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }

    /// Registers through the API and returns `(id, token)`.
    pub async fn register(&self, name: &str, role: &str) -> Result<(Uuid, String)> {
        let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
        let resp = self
            .post(
                "/api/auth/register",
                None,
                &json!({ "name": name, "email": email, "password": PASSWORD, "role": role }),
            )
            .await?;
        anyhow::ensure!(resp.status() == StatusCode::CREATED, "register {} failed: {}", name, resp.status());

        let body: Value = resp.json().await?;
        let id = Uuid::parse_str(body["id"].as_str().context("missing id")?)?;
        let token = body["token"].as_str().context("missing token")?.to_string();
        Ok((id, token))
    }

    pub async fn create_product(
        &self,
        token: &str,
        name: &str,
        price: f64,
        inventory: i64,
        minimum_stock_level: i64,
    ) -> Result<Value> {
        let resp = self
            .post(
                "/api/products",
                Some(token),
                &json!({
                    "name": name,
                    "price": price,
                    "inventory": inventory,
                    "minimumStockLevel": minimum_stock_level,
                }),
            )
            .await?;
        anyhow::ensure!(resp.status() == StatusCode::CREATED, "create {} failed: {}", name, resp.status());
        Ok(resp.json().await?)
    }

    pub async fn save_quote(&self, token: &str, supplier_id: Uuid, lines: Value) -> Result<Value> {
        let resp = self
            .post(
                "/api/quotes/save-quotations",
                Some(token),
                &json!({ "supplierId": supplier_id, "products": lines, "date": "2024-03-01T10:00:00Z" }),
            )
            .await?;
        anyhow::ensure!(resp.status() == StatusCode::CREATED, "save quote failed: {}", resp.status());
        let body: Value = resp.json().await?;
        Ok(body["data"].clone())
    }
}

/// Status plus parsed JSON body.
pub async fn read(resp: Response) -> Result<(StatusCode, Value)> {
    let status = resp.status();
    let body = resp.json::<Value>().await.unwrap_or(Value::Null);
    Ok((status, body))
}

pub fn token_with(secret: &str, lifetime: chrono::Duration, user_id: Uuid) -> Result<String> {
    Ok(TokenService::new(secret, lifetime)?.issue(user_id)?)
}
