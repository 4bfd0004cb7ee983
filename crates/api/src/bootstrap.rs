//! First-start bootstrap: make sure an admin account exists.
//!
//! When `ADMIN_USERNAME` and `ADMIN_PASSWORD` are set and no user with that
//! name exists yet, an admin account is created. An existing account is
//! never modified.

use intake_core::roles::ROLE_ADMIN;
use intake_db::models::user::CreateUser;
use intake_db::repositories::UserRepo;
use intake_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};

/// Credentials for the bootstrap admin account.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl AdminBootstrap {
    /// Read the bootstrap credentials from the environment.
    ///
    /// | Env Var          | Default               |
    /// |------------------|-----------------------|
    /// | `ADMIN_USERNAME` | -- (bootstrap off)    |
    /// | `ADMIN_PASSWORD` | -- (bootstrap off)    |
    /// | `ADMIN_EMAIL`    | `admin@localhost`     |
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("ADMIN_USERNAME").ok().filter(|s| !s.is_empty())?;
        let password = std::env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty())?;
        let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@localhost".into());
        Some(Self {
            username,
            password,
            email,
        })
    }
}

/// Create the bootstrap admin if missing. Returns `true` if an account was
/// created.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminBootstrap) -> AppResult<bool> {
    if UserRepo::find_by_username(pool, &admin.username)
        .await?
        .is_some()
    {
        tracing::info!(username = %admin.username, "Bootstrap admin already exists");
        return Ok(false);
    }

    validate_password_strength(&admin.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::BadRequest(format!("ADMIN_PASSWORD: {msg}")))?;
    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(username = %admin.username, "Created bootstrap admin account");
    Ok(true)
}
