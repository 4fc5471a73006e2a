// middleware/extract.rs - request body extraction
//
// Body rejections (malformed JSON, wrong field types, missing content type)
// surface as `ApiError::InvalidJson` so every failure carries a JSON
// `message` like the rest of the API.

use axum::extract::FromRequest;

use crate::error::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);
