// handlers/analytics.rs - GET /api/analytics/product-count

use axum::extract::State;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// Total number of products in the catalog, as a bare JSON number.
pub async fn product_count(State(state): State<AppState>) -> ApiResult<i64> {
    let count = state
        .store
        .count_products()
        .await
        .map_err(|e| ApiError::from(e).context("Error fetching product count"))?;

    Ok(ApiResponse::success(count))
}
