//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use intake_core::error::CoreError;
use intake_db::models::user::UserResponse;
use intake_db::repositories::UserRepo;
use intake_events::AppEvent;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Logger name for authentication events.
const LOGGER: &str = "auth";

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password and receive a Bearer token.
/// Unknown users and wrong passwords get the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        ))
    };

    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(username = %user.username, "Failed login attempt");
        state.log_event(AppEvent::new(
            LOGGER,
            format!("Failed login attempt for '{}'", user.username),
        ));
        return Err(invalid());
    }

    let access_token =
        generate_access_token(user.id, &user.username, &user.role, &state.config.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    state.log_event(AppEvent::new(LOGGER, "Logged in").by(&user.username));

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: user.into(),
    }))
}
