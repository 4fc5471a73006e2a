use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::permissions;
use crate::database::models::{Role, User};
use crate::error::ApiError;

/// The caller, re-loaded from the store for this request
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Bearer authentication: verifies the token, resolves the user and injects
/// `CurrentUser` into the request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(&headers).map_err(|msg| {
        tracing::debug!("Rejected request without usable bearer token: {}", msg);
        ApiError::unauthorized("Not authorized, no token")
    })?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        ApiError::from(e)
    })?;

    let user = state
        .store
        .find_user_by_id(claims.id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token references missing user {}", claims.id);
            ApiError::unauthorized("Not authorized, user not found")
        })?;

    tracing::debug!("Authenticated {} ({}) as {}", user.email, user.id, user.role);
    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Role gate for admin-only routes. Must be layered inside `authenticate`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    require_role(Role::Admin, request, next).await
}

pub async fn require_role(role: Role, request: Request, next: Next) -> Result<Response, ApiError> {
    let CurrentUser(user) = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| ApiError::unauthorized("Not authorized, no token"))?;

    if let Err(e) = permissions::require_role(user, role) {
        tracing::warn!("User {} with role {} denied {} route", user.id, user.role, role);
        return Err(e);
    }

    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or("missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "invalid Authorization header encoding")?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must use Bearer token format")?
        .trim();

    if token.is_empty() {
        return Err("empty bearer token");
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(axum::http::header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer(&headers_with("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        assert!(extract_bearer(&HeaderMap::new()).is_err());
        assert!(extract_bearer(&headers_with("Basic dXNlcjpwdw==")).is_err());
        assert!(extract_bearer(&headers_with("Bearer   ")).is_err());
    }
}
