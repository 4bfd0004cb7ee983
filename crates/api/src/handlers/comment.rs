//! Handlers for `/projects/{id}/comments`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use intake_core::error::CoreError;
use intake_core::project::{validate_author_name, validate_comment_text};
use intake_core::types::DbId;
use intake_db::models::project_comment::{CreateProjectComment, ProjectComment};
use intake_db::repositories::ProjectCommentRepo;
use intake_events::AppEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::project::find_project;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

const LOGGER: &str = "comments";

/// POST /api/v1/projects/{id}/comments
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateProjectComment>,
) -> AppResult<(StatusCode, Json<ProjectComment>)> {
    validate_comment_text(&input.comment_text)?;
    validate_author_name(&input.author_name)?;
    let project = find_project(&state, project_id).await?;

    let comment =
        ProjectCommentRepo::create(&state.pool, project_id, &input, state.clock.now()).await?;

    state.log_event(AppEvent::new(LOGGER, comment.describe(&project.title)));
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/v1/projects/{id}/comments
pub async fn list_by_project(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectComment>>> {
    find_project(&state, project_id).await?;
    let comments = ProjectCommentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(comments))
}

/// DELETE /api/v1/projects/{id}/comments/{comment_id}
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path((project_id, comment_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = ProjectCommentRepo::delete(&state.pool, project_id, comment_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ProjectComment",
            id: comment_id,
        }));
    }

    state.log_event(
        AppEvent::new(
            LOGGER,
            format!("Deleted comment #{comment_id} on project #{project_id}"),
        )
        .by(&user.username),
    );
    Ok(StatusCode::NO_CONTENT)
}
