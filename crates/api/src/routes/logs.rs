//! Route definitions for the `/logs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::logs;
use crate::state::AppState;

/// Routes mounted at `/logs`.
///
/// ```text
/// GET /    -> list (admin; ?logger_name=&limit=&offset=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(logs::list))
}
