pub mod admin;
pub mod auth;
pub mod category;
pub mod choices;
pub mod health;
pub mod logs;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
///
/// /choices                                         status/priority choices (public)
///
/// /categories                                      list (public), create (admin)
/// /categories/{id}                                 get (public), rename, delete (admin)
///
/// /projects                                        list (staff), submit (public)
/// /projects/summary                                counts per status (staff)
/// /projects/{id}                                   detail, update, delete (staff)
/// /projects/{id}/accept|reject|start|complete      triage (staff)
/// /projects/{id}/attachments                       list (staff), upload (public)
/// /projects/{id}/attachments/{attachment_id}       delete (staff)
/// /projects/{id}/comments                          list (staff), add (public)
/// /projects/{id}/comments/{comment_id}             delete (staff)
///
/// /logs                                            application log (admin)
///
/// /admin/users                                     list, create (admin)
/// /admin/users/{id}                                delete (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes.
        .nest("/auth", auth::router())
        // Static choice lists for forms.
        .nest("/choices", choices::router())
        // Category management.
        .nest("/categories", category::router())
        // Projects with their attachments and comments.
        .nest("/projects", project::router())
        // Application log.
        .nest("/logs", logs::router())
        // Staff account management.
        .nest("/admin", admin::router())
}
