//! Handlers for the `/admin` resource (staff account management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use intake_core::error::CoreError;
use intake_core::project::validate_contact_email;
use intake_core::roles::{validate_role, ROLE_STAFF};
use intake_core::types::DbId;
use intake_db::models::user::{CreateUser, UserResponse};
use intake_db::repositories::UserRepo;
use intake_events::AppEvent;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

const LOGGER: &str = "users";

/// Longest accepted username.
const MAX_USERNAME_LENGTH: usize = 150;

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Defaults to `staff`.
    pub role: Option<String>,
}

/// POST /api/v1/admin/users
///
/// Create a staff or admin account. Duplicate usernames get 409.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let username = input.username.trim();
    if username.is_empty() || username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Username must be 1 to {MAX_USERNAME_LENGTH} characters"
        ))));
    }
    validate_contact_email(&input.email)?;

    let role = input.role.unwrap_or_else(|| ROLE_STAFF.to_string());
    validate_role(&role).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: input.email,
            password_hash,
            role,
        },
    )
    .await?;

    state.log_event(
        AppEvent::new(
            LOGGER,
            format!("Created {} account '{}'", user.role, user.username),
        )
        .by(&admin.username),
    );
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Projects the user triaged keep existing; their references become NULL.
/// Admins cannot delete their own account.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::BadRequest(
            "Cannot delete your own account".into(),
        ));
    }

    let deleted = UserRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    state.log_event(AppEvent::new(LOGGER, format!("Deleted user #{id}")).by(&admin.username));
    Ok(StatusCode::NO_CONTENT)
}
