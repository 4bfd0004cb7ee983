//! Route definitions for the `/projects` resource.
//!
//! Also nests attachment and comment routes under `/projects/{id}/...`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{attachment, comment, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                        -> list (staff)
/// POST   /                                        -> create (public)
/// GET    /summary                                 -> summary (staff)
/// GET    /{id}                                    -> get_by_id (staff)
/// PUT    /{id}                                    -> update (staff)
/// DELETE /{id}                                    -> delete (staff)
/// POST   /{id}/accept                             -> accept (staff)
/// POST   /{id}/reject                             -> reject (staff)
/// POST   /{id}/start                              -> start (staff)
/// POST   /{id}/complete                           -> complete (staff)
///
/// GET    /{id}/attachments                        -> list_by_project (staff)
/// POST   /{id}/attachments                        -> upload (public)
/// DELETE /{id}/attachments/{attachment_id}        -> delete (staff)
///
/// GET    /{id}/comments                           -> list_by_project (staff)
/// POST   /{id}/comments                           -> create (public)
/// DELETE /{id}/comments/{comment_id}              -> delete (staff)
/// ```
pub fn router() -> Router<AppState> {
    let attachment_routes = Router::new()
        .route(
            "/",
            get(attachment::list_by_project).post(attachment::upload),
        )
        .route("/{attachment_id}", delete(attachment::delete));

    let comment_routes = Router::new()
        .route("/", get(comment::list_by_project).post(comment::create))
        .route("/{comment_id}", delete(comment::delete));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/summary", get(project::summary))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/accept", post(project::accept))
        .route("/{id}/reject", post(project::reject))
        .route("/{id}/start", post(project::start))
        .route("/{id}/complete", post(project::complete))
        .nest("/{id}/attachments", attachment_routes)
        .nest("/{id}/comments", comment_routes)
}
