//! Route definitions for the `/categories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create (admin)
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update (admin)
/// DELETE /{id}    -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(category::list).post(category::create))
        .route(
            "/{id}",
            get(category::get_by_id)
                .put(category::update)
                .delete(category::delete),
        )
}
