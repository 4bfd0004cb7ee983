//! Handler for the `/logs` resource (admin only).

use axum::extract::{Query, State};
use axum::Json;
use intake_db::models::application_log::{ApplicationLog, ApplicationLogQuery};
use intake_db::repositories::ApplicationLogRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::PageResponse;
use crate::state::AppState;

/// GET /api/v1/logs
///
/// Newest entries first. `total` counts all entries matching `logger_name`.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ApplicationLogQuery>,
) -> AppResult<Json<PageResponse<ApplicationLog>>> {
    let data = ApplicationLogRepo::list(&state.pool, &params).await?;
    let total = ApplicationLogRepo::count(&state.pool, params.logger_name.as_deref()).await?;
    Ok(Json(PageResponse { data, total }))
}
