// handlers/orders.rs - POST /api/orders, GET /api/orders

use axum::{extract::State, Extension};
use serde::Deserialize;

use crate::app::AppState;
use crate::database::models::{NewOrder, Order};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser, Json};
use crate::services::enrichment::{self, OrderView};

use super::parse_id;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub product_id: Option<String>,
    pub quantity: Option<i64>,
}

/// Records an order against the product's current supplier. Inventory is
/// left untouched.
pub async fn place_order(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<PlaceOrderRequest>,
) -> ApiResult<Order> {
    let product_id = parse_id(payload.product_id.as_deref().unwrap_or_default(), "Product not found")?;
    let quantity = payload
        .quantity
        .ok_or_else(|| ApiError::bad_request("Quantity is required"))?;

    let product = state
        .store
        .find_product_by_id(product_id)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to place order"))?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    let order = state
        .store
        .create_order(NewOrder {
            product: product.id,
            quantity,
            supplier: product.supplier,
            ordered_by: user.id,
        })
        .await
        .map_err(|e| ApiError::from(e).context("Failed to place order"))?;

    tracing::info!("User {} ordered {} x {}", user.id, order.quantity, product.id);
    Ok(ApiResponse::created(order))
}

/// Orders placed by the caller, each with the product name resolved.
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Vec<OrderView>> {
    let orders = state
        .store
        .list_orders_by_user(user.id)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to fetch orders"))?;

    let views = enrichment::enrich_orders(state.store.as_ref(), orders)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to fetch orders"))?;

    Ok(ApiResponse::success(views))
}
