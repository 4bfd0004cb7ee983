//! Route definitions for the `/admin` resource (staff accounts).

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /users        -> list_users
/// POST   /users        -> create_user
/// DELETE /users/{id}   -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route("/users/{id}", delete(admin::delete_user))
}
