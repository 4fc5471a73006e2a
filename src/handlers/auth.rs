// handlers/auth.rs - registration, login and admin user management
//
// POST   /api/auth/register    public
// POST   /api/auth/login       public
// GET    /api/auth/users       token + admin
// PUT    /api/auth/users/:id   token + admin
// DELETE /api/auth/users/:id   token + admin

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::password::{hash_password, verify_password};
use crate::database::models::{NewUser, Role, User};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Json, MessageBody};

use super::{non_empty, parse_id};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// POST /api/auth/register - create an account and return a session token
///
/// An omitted role registers a customer. A taken email is rejected before
/// anything is written.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<RegisterResponse> {
    let (Some(name), Some(email), Some(password)) = (
        non_empty(payload.name),
        non_empty(payload.email),
        non_empty(payload.password),
    ) else {
        return Err(ApiError::bad_request("Invalid user data"));
    };

    let role = match non_empty(payload.role) {
        Some(raw) => raw
            .parse::<Role>()
            .map_err(|_| ApiError::bad_request("Invalid user data"))?,
        None => Role::default(),
    };

    if state.store.find_user_by_email(&email).await?.is_some() {
        tracing::info!("Registration rejected, {} already exists", email);
        return Err(ApiError::bad_request("User already exists"));
    }

    let new_user = NewUser {
        name,
        email,
        password: hash_password(&password)?,
        role,
    };

    let user = match state.store.create_user(new_user).await {
        Ok(user) => user,
        // Lost a race with a concurrent registration of the same email
        Err(DatabaseError::Conflict(_)) => return Err(ApiError::bad_request("User already exists")),
        Err(e) => return Err(ApiError::from(e).context("Invalid user data")),
    };

    let token = state.tokens.issue(user.id)?;
    tracing::info!("Registered {} ({}) as {}", user.email, user.id, user.role);

    Ok(ApiResponse::created(RegisterResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        token,
    }))
}

/// POST /api/auth/login - exchange credentials for a session token
///
/// Unknown email and wrong password produce the same 400.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(ApiError::bad_request(INVALID_CREDENTIALS));
    };

    let user = state
        .store
        .find_user_by_email(&email)
        .await
        .map_err(|e| ApiError::from(e).context("Server error"))?;

    let Some(user) = user else {
        tracing::info!("Login failed, no user for {}", email);
        return Err(ApiError::bad_request(INVALID_CREDENTIALS));
    };

    if !verify_password(&password, &user.password)? {
        tracing::info!("Login failed, password mismatch for {}", email);
        return Err(ApiError::bad_request(INVALID_CREDENTIALS));
    }

    let token = state.tokens.issue(user.id)?;
    tracing::info!("User {} logged in", user.id);

    Ok(ApiResponse::success(LoginResponse {
        message: "Login successful".to_string(),
        token,
        role: user.role,
    }))
}

/// GET /api/auth/users and GET /api/users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state
        .store
        .list_users()
        .await
        .map_err(|e| ApiError::from(e).context("Error fetching users"))?;

    Ok(ApiResponse::success(users))
}

/// PUT /api/auth/users/:id - partial update; empty or missing fields keep
/// their previous value. Passwords are not changed here.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<User> {
    let id = parse_id(&id, "User not found")?;

    let mut user = state
        .store
        .find_user_by_id(id)
        .await
        .map_err(|e| ApiError::from(e).context("Error updating user"))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if let Some(name) = non_empty(payload.name) {
        user.name = name;
    }
    if let Some(email) = non_empty(payload.email) {
        user.email = email;
    }
    if let Some(raw) = non_empty(payload.role) {
        user.role = raw
            .parse::<Role>()
            .map_err(|e| ApiError::bad_request(e.to_string()))?;
    }

    let saved = state
        .store
        .save_user(&user)
        .await
        .map_err(|e| ApiError::from(e).context("Error updating user"))?;

    tracing::info!("Updated user {}", saved.id);
    Ok(ApiResponse::success(saved))
}

/// DELETE /api/auth/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MessageBody> {
    let id = parse_id(&id, "User not found")?;

    let removed = state
        .store
        .delete_user(id)
        .await
        .map_err(|e| ApiError::from(e).context("Error deleting user"))?;

    match removed {
        Some(user) => {
            tracing::info!("Deleted user {} ({})", user.id, user.email);
            Ok(ApiResponse::success(MessageBody::new("User deleted successfully")))
        }
        None => {
            tracing::info!("Delete requested for missing user {}", id);
            Err(ApiError::not_found("User not found"))
        }
    }
}
