// handlers/quotes.rs - quotation workflow
//
// Pending quote requests are created by anyone holding a token, listed with
// supplier and product names resolved, given a free-text status by the
// supplier they name, and finally moved into the accepted collection.
// Setting the status to "Accepted" and moving a quotation are separate
// operations; neither implies the other.

use axum::{
    extract::{Path, State},
    Extension,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::permissions;
use crate::database::models::{NewQuoteRequest, QuoteLine, QuoteRequest};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser, Json, MessageBody, MessageWithData};
use crate::services::enrichment::{self, EnrichedQuotation};

use super::parse_id;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuoteRequest {
    pub supplier_id: Option<Uuid>,
    #[serde(default)]
    pub products: Vec<QuoteLine>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub quotation_id: Option<String>,
    pub status: Option<String>,
}

/// POST /api/quotes/save-quotations
///
/// Neither the supplier nor the listed products are checked for existence;
/// listings degrade to placeholder names instead.
pub async fn save_quote_request(
    State(state): State<AppState>,
    Json(payload): Json<SaveQuoteRequest>,
) -> ApiResult<MessageWithData<QuoteRequest>> {
    let supplier_id = payload
        .supplier_id
        .ok_or_else(|| ApiError::bad_request("supplierId is required"))?;

    let saved = state
        .store
        .create_quote_request(NewQuoteRequest {
            supplier_id,
            products: payload.products,
            date: payload.date.unwrap_or_else(Utc::now),
        })
        .await
        .map_err(|e| ApiError::from(e).context("Failed to save quotation request"))?;

    tracing::info!("Saved quote request {} for supplier {}", saved.id, saved.supplier_id);
    Ok(ApiResponse::created(MessageWithData {
        message: "Quotation request saved successfully!".to_string(),
        data: saved,
    }))
}

/// GET /api/quotes/history - every pending quotation
pub async fn quotation_history(State(state): State<AppState>) -> ApiResult<Vec<EnrichedQuotation>> {
    let pending = state
        .store
        .list_quote_requests(None)
        .await
        .map_err(|e| ApiError::from(e).context("Error fetching quotation history"))?;

    let enriched = enrichment::enrich_quotations(state.store.as_ref(), &pending)
        .await
        .map_err(|e| ApiError::from(e).context("Error fetching quotation history"))?;

    Ok(ApiResponse::success(enriched))
}

/// GET /api/quotes/supplier/quotations - pending quotations naming the caller
pub async fn supplier_quotations(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Vec<EnrichedQuotation>> {
    let pending = state
        .store
        .list_quote_requests(Some(user.id))
        .await
        .map_err(|e| ApiError::from(e).context("Error fetching quotations"))?;

    let enriched = enrichment::enrich_quotations(state.store.as_ref(), &pending)
        .await
        .map_err(|e| ApiError::from(e).context("Error fetching quotations"))?;

    Ok(ApiResponse::success(enriched))
}

/// PUT /api/quotes/supplier/quotations/status
pub async fn update_quotation_status(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<UpdateStatusRequest>,
) -> ApiResult<MessageWithData<QuoteRequest>> {
    let id = parse_id(payload.quotation_id.as_deref().unwrap_or_default(), "Quotation not found")?;

    let quotation = state
        .store
        .find_quote_request(id)
        .await
        .map_err(|e| ApiError::from(e).context("Error updating quotation status"))?
        .ok_or_else(|| ApiError::not_found("Quotation not found"))?;

    if let Err(e) = permissions::ensure_can_update_quotation_status(&user, &quotation) {
        tracing::warn!("User {} tried to update quotation {} of supplier {}", user.id, quotation.id, quotation.supplier_id);
        return Err(e);
    }

    let status = payload
        .status
        .ok_or_else(|| ApiError::bad_request("Status is required"))?;

    let updated = state
        .store
        .update_quote_request_status(quotation.id, &status)
        .await
        .map_err(|e| ApiError::from(e).context("Error updating quotation status"))?;

    tracing::info!("Quotation {} status set to {:?}", updated.id, status);
    Ok(ApiResponse::success(MessageWithData {
        message: "Quotation status updated successfully".to_string(),
        data: updated,
    }))
}

/// POST /api/quotes/move-to-accepted/:id
///
/// Any authenticated caller may move any pending quotation.
pub async fn move_to_accepted(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MessageBody> {
    let id = parse_id(&id, "Quotation not found")?;

    let accepted = state.store.move_to_accepted(id).await.map_err(|e| match e {
        DatabaseError::NotFound(_) => ApiError::not_found("Quotation not found"),
        other => ApiError::from(other).context("Error moving quotation to accepted"),
    })?;

    tracing::info!("Quotation {} moved to accepted as {}", id, accepted.id);
    Ok(ApiResponse::success(MessageBody::new("Quotation moved to accepted")))
}

/// GET /api/quotes/supplier/accepted-quotations
pub async fn supplier_accepted_quotations(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Vec<EnrichedQuotation>> {
    accepted_quotations(&state, Some(user.id)).await.map(ApiResponse::success)
}

/// GET /api/quotes/accepted-quotations - admin view over every supplier
pub async fn all_accepted_quotations(State(state): State<AppState>) -> ApiResult<Vec<EnrichedQuotation>> {
    accepted_quotations(&state, None).await.map(ApiResponse::success)
}

async fn accepted_quotations(
    state: &AppState,
    supplier_id: Option<Uuid>,
) -> Result<Vec<EnrichedQuotation>, ApiError> {
    let accepted = state
        .store
        .list_accepted_quotations(supplier_id)
        .await
        .map_err(|e| ApiError::from(e).context("Error fetching accepted quotations"))?;

    enrichment::enrich_quotations(state.store.as_ref(), &accepted)
        .await
        .map_err(|e| ApiError::from(e).context("Error fetching accepted quotations"))
}
