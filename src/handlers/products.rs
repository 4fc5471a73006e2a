// handlers/products.rs - catalog controller
//
// GET    /api/products          own products (admin: all)
// POST   /api/products          suppliers only
// PUT    /api/products/:id      owner only
// DELETE /api/products/:id      owner only
// GET    /api/suggest-products  low-stock scan across the whole catalog

use axum::{
    extract::{Path, State},
    Extension,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::auth::permissions;
use crate::database::models::{NewProduct, Product, ProductFilter};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser, Json, MessageBody};

use super::{non_empty, non_zero_f64, non_zero_i64, parse_id};

/// Body for both create and update. Every field is optional on the wire;
/// create rejects anything falsy, update keeps the previous value instead.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub inventory: Option<i64>,
    pub minimum_stock_level: Option<i64>,
}

pub async fn list_products(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Vec<Product>> {
    let filter = if permissions::can_list_all_products(&user) {
        ProductFilter::all()
    } else {
        ProductFilter::owned_by(user.id)
    };

    let products = state
        .store
        .list_products(filter)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to fetch products"))?;

    Ok(ApiResponse::success(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<ProductPayload>,
) -> ApiResult<Product> {
    permissions::ensure_can_create_product(&user)?;

    let (Some(name), Some(price), Some(inventory), Some(minimum_stock_level)) = (
        non_empty(payload.name),
        non_zero_f64(payload.price),
        non_zero_i64(payload.inventory),
        non_zero_i64(payload.minimum_stock_level),
    ) else {
        return Err(ApiError::bad_request(
            "All fields (name, price, inventory, minimumStockLevel) are required",
        ));
    };

    let product = state
        .store
        .create_product(NewProduct {
            name,
            price,
            inventory,
            minimum_stock_level,
            supplier: user.id,
        })
        .await
        .map_err(|e| ApiError::from(e).context("Failed to add product"))?;

    tracing::info!("Supplier {} added product {} ({})", user.id, product.id, product.name);
    Ok(ApiResponse::created(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<ProductPayload>,
) -> ApiResult<Product> {
    let id = parse_id(&id, "Product not found")?;

    let mut product = state
        .store
        .find_product_by_id(id)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to update product"))?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    if let Err(e) = permissions::ensure_can_edit_product(&user, &product) {
        tracing::warn!("User {} tried to edit product {} owned by {}", user.id, product.id, product.supplier);
        return Err(e);
    }

    if let Some(name) = non_empty(payload.name) {
        product.name = name;
    }
    if let Some(price) = non_zero_f64(payload.price) {
        product.price = price;
    }
    if let Some(inventory) = non_zero_i64(payload.inventory) {
        product.inventory = inventory;
    }
    if let Some(level) = non_zero_i64(payload.minimum_stock_level) {
        product.minimum_stock_level = level;
    }

    let saved = state
        .store
        .save_product(&product)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to update product"))?;

    tracing::info!("Updated product {}", saved.id);
    Ok(ApiResponse::success(saved))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<MessageBody> {
    let id = parse_id(&id, "Product not found")?;

    let product = state
        .store
        .find_product_by_id(id)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to delete product"))?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    if let Err(e) = permissions::ensure_can_delete_product(&user, &product) {
        tracing::warn!("User {} tried to delete product {} owned by {}", user.id, product.id, product.supplier);
        return Err(e);
    }

    state
        .store
        .delete_product(product.id)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to delete product"))?;

    tracing::info!("Deleted product {}", product.id);
    Ok(ApiResponse::success(MessageBody::new("Product deleted successfully")))
}

/// Every product whose inventory is strictly below its minimum stock level,
/// regardless of owner.
pub async fn suggest_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let products = state
        .store
        .list_products(ProductFilter::all())
        .await
        .map_err(|e| ApiError::from(e).context("Failed to fetch suggestions"))?;

    let low_stock = products.into_iter().filter(Product::is_low_stock).collect();
    Ok(ApiResponse::success(low_stock))
}
