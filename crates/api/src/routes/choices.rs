//! Route definitions for the `/choices` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::choices;
use crate::state::AppState;

/// Routes mounted at `/choices`.
///
/// ```text
/// GET /    -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(choices::list))
}
