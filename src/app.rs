use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::TokenService;
use crate::config::{AppConfig, SecurityConfig};
use crate::database::Store;
use crate::handlers::{analytics, auth, orders, products, quotes};
use crate::middleware::{authenticate, require_admin};

/// Shared per-process state handed to every handler and to the auth gate.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenService) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
        }
    }
}

/// All routes with their gates. Global layers (CORS, request tracing) are
/// added by `app` so tests can mount the bare router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        .route("/api/quotes/history", get(quotes::quotation_history))
        // Token required
        .merge(product_routes(&state))
        .merge(order_routes(&state))
        .merge(quote_routes(&state))
        .merge(analytics_routes(&state))
        .merge(user_routes(&state))
        // Token + admin
        .merge(admin_routes(&state))
        .with_state(state)
}

/// Router plus the configured global middleware.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut app = router(state);

    if config.security.enable_cors {
        app = app.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        app = app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));
    }
    app
}

/// Permissive unless explicit origins are configured.
pub fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring unparseable CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::permissive().allow_origin(AllowOrigin::list(origins))
    }
}

fn auth_public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
}

fn product_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/products/:id",
            put(products::update_product).delete(products::delete_product),
        )
        .route("/api/suggest-products", get(products::suggest_products))
        .route_layer(from_fn_with_state(state.clone(), authenticate))
}

fn order_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(orders::list_orders).post(orders::place_order))
        .route_layer(from_fn_with_state(state.clone(), authenticate))
}

fn quote_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/quotes/save-quotations", post(quotes::save_quote_request))
        .route("/api/quotes/supplier/quotations", get(quotes::supplier_quotations))
        .route(
            "/api/quotes/supplier/quotations/status",
            put(quotes::update_quotation_status),
        )
        .route("/api/quotes/move-to-accepted/:id", post(quotes::move_to_accepted))
        .route(
            "/api/quotes/supplier/accepted-quotations",
            get(quotes::supplier_accepted_quotations),
        )
        .route_layer(from_fn_with_state(state.clone(), authenticate))
}

fn analytics_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/analytics/product-count", get(analytics::product_count))
        .route_layer(from_fn_with_state(state.clone(), authenticate))
}

fn user_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/users", get(auth::list_users))
        .route_layer(from_fn_with_state(state.clone(), authenticate))
}

// Layers run outside-in, so `authenticate` is added last to run first.
fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/users", get(auth::list_users))
        .route(
            "/api/auth/users/:id",
            put(auth::update_user).delete(auth::delete_user),
        )
        .route("/api/quotes/accepted-quotations", get(quotes::all_accepted_quotations))
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(state.clone(), authenticate))
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Supplier Hub API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/auth/register, /api/auth/login (public); /api/auth/users[/:id] (admin)",
            "users": "/api/users (token)",
            "products": "/api/products[/:id], /api/suggest-products (token)",
            "orders": "/api/orders (token)",
            "quotes": "/api/quotes/history (public); /api/quotes/* (token); /api/quotes/accepted-quotations (admin)",
            "analytics": "/api/analytics/product-count (token)",
        }
    }))
}

async fn health(axum::extract::State(state): axum::extract::State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
