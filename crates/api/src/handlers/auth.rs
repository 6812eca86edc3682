//! Handlers for the `/auth` resource (register, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use catalog_core::accounts::NewUser;
use catalog_core::error::CoreError;
use catalog_core::types::EntityId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 6, message = "Username too short"))]
    pub username: String,
    #[validate(length(min = 6, message = "Password too short"))]
    pub password: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub id: EntityId,
}

/// Successful login payload.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account. Returns 201 with the new user's id, 409 when the
/// username is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RegisteredUser>>)> {
    input.validate().map_err(CoreError::from)?;

    if state
        .users
        .find_user_by_username(&input.username)
        .await
        .map_err(CoreError::from)?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .users
        .insert_user(&NewUser {
            id: EntityId::new_v4(),
            username: input.username,
            email: input.email,
            password_hash,
        })
        .await
        .map_err(CoreError::from)?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RegisteredUser { id: user.id },
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    if input.username.is_empty() {
        return Err(AppError::BadRequest("No username specified".into()));
    }
    if input.password.is_empty() {
        return Err(AppError::BadRequest("No password specified".into()));
    }

    let user = state
        .users
        .find_user_by_username(&input.username)
        .await
        .map_err(CoreError::from)?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(user_id = %user.id, "Rejected login with wrong password");
        return Err(invalid_credentials());
    }

    let token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(DataResponse {
        data: LoginResponse {
            token,
            expires_in: state.config.jwt.expires_in_secs(),
        },
    }))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}
