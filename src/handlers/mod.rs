// handlers/mod.rs - resource controllers
//
// One module per resource. Gating (token, admin role) is applied as route
// layers in `app.rs`; ownership and role checks that depend on the record
// live in the handlers through `auth::permissions`.

pub mod analytics;
pub mod auth;
pub mod orders;
pub mod products;
pub mod quotes;

use uuid::Uuid;

use crate::error::ApiError;

/// Path ids that do not parse cannot name a stored record.
pub(crate) fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(not_found))
}

/// Partial-update rule: empty strings keep the previous value.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Partial-update rule for numbers: zero keeps the previous value.
pub(crate) fn non_zero_i64(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v != 0)
}

pub(crate) fn non_zero_f64(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}
