//! Handlers for the `/projects` resource.
//!
//! Submission is public; everything else requires staff. All writes go
//! through [`ProjectRepo`], which enforces the deadline rule and stamps
//! `updated_at` from the state's clock.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use intake_core::budget::Budget;
use intake_core::choices::{ProjectPriority, ProjectStatus};
use intake_core::error::CoreError;
use intake_core::types::{Date, DbId};
use intake_db::models::attachment::Attachment;
use intake_db::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use intake_db::models::project_comment::ProjectComment;
use intake_db::repositories::{AttachmentRepo, CategoryRepo, ProjectCommentRepo, ProjectRepo};
use intake_events::AppEvent;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

const LOGGER: &str = "projects";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /projects/{id}`. Triage user references are set by
/// the triage endpoints, not here.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<Budget>,
    pub deadline: Option<Date>,
    pub sender_name: Option<String>,
    pub contact_email: Option<String>,
    pub category_id: Option<DbId>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<ProjectPriority>,
}

impl From<UpdateProjectRequest> for UpdateProject {
    fn from(req: UpdateProjectRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            budget: req.budget,
            deadline: req.deadline,
            sender_name: req.sender_name,
            contact_email: req.contact_email,
            category_id: req.category_id,
            status: req.status,
            priority: req.priority,
            ..Default::default()
        }
    }
}

/// Full project view for staff: the row plus display labels and children.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub status_label: &'static str,
    pub priority_label: &'static str,
    pub category_name: Option<String>,
    pub summary: String,
    pub attachments: Vec<Attachment>,
    pub comments: Vec<ProjectComment>,
}

/// Number of projects in one status.
#[derive(Debug, Serialize)]
pub struct StatusCount {
    pub status: ProjectStatus,
    pub label: &'static str,
    pub count: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/projects
///
/// Public client submission. Starts as `NEW` / `MEDIUM`.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = ProjectRepo::create(&state.pool, &input, state.clock.now()).await?;

    state.log_event(AppEvent::new(
        LOGGER,
        format!("Project #{} submitted by {}: {project}", project.id, project.sender_name),
    ));
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
///
/// Optional filters: `status`, `priority`, `category_id`, `limit`, `offset`.
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Query(filter): Query<ProjectFilter>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool, &filter).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/summary
///
/// Project count for every status, zero included, in declaration order.
pub async fn summary(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<StatusCount>>>> {
    let counts = ProjectRepo::count_by_status(&state.pool).await?;

    let data = ProjectStatus::ALL
        .iter()
        .map(|&status| StatusCount {
            status,
            label: status.label(),
            count: counts
                .iter()
                .find(|(s, _)| s == status.as_str())
                .map(|(_, n)| *n)
                .unwrap_or(0),
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let project = find_project(&state, id).await?;

    let category_name = match project.category_id {
        Some(category_id) => CategoryRepo::find_by_id(&state.pool, category_id)
            .await?
            .map(|c| c.name),
        None => None,
    };
    let attachments = AttachmentRepo::list_by_project(&state.pool, id).await?;
    let comments = ProjectCommentRepo::list_by_project(&state.pool, id).await?;

    Ok(Json(ProjectDetail {
        status_label: project.status.label(),
        priority_label: project.priority.label(),
        summary: project.to_string(),
        category_name,
        attachments,
        comments,
        project,
    }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectRequest>,
) -> AppResult<Json<Project>> {
    let project = save(&state, id, input.into()).await?;

    state.log_event(
        AppEvent::new(LOGGER, format!("Updated project #{id}: {project}")).by(&user.username),
    );
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Attachment rows are removed together with the project; stored files are
/// released afterwards, best-effort. Comments cascade in the database.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let files = ProjectRepo::delete_with_attachment_files(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    for key in &files {
        if let Err(e) = state.media.delete(key).await {
            tracing::warn!(
                project_id = id,
                key = %key,
                error = %e,
                "Failed to release stored file of deleted project"
            );
        }
    }

    state.log_event(
        AppEvent::new(
            LOGGER,
            format!("Deleted project #{id} with {} attachment(s)", files.len()),
        )
        .by(&user.username),
    );
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/projects/{id}/accept
pub async fn accept(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    transition(&state, &user, id, ProjectStatus::Accepted).await
}

/// POST /api/v1/projects/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    transition(&state, &user, id, ProjectStatus::Rejected).await
}

/// POST /api/v1/projects/{id}/start
pub async fn start(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    transition(&state, &user, id, ProjectStatus::InProgress).await
}

/// POST /api/v1/projects/{id}/complete
pub async fn complete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    transition(&state, &user, id, ProjectStatus::Completed).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a project or fail with 404.
pub(crate) async fn find_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

async fn save(state: &AppState, id: DbId, input: UpdateProject) -> AppResult<Project> {
    ProjectRepo::update(&state.pool, id, &input, state.clock.now())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// Move a project to `status`, recording the acting user where the status
/// has a matching reference column.
async fn transition(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
    status: ProjectStatus,
) -> AppResult<Json<Project>> {
    let mut input = UpdateProject {
        status: Some(status),
        ..Default::default()
    };
    match status {
        ProjectStatus::Accepted => input.accepted_by = Some(user.user_id),
        ProjectStatus::InProgress => input.started_by = Some(user.user_id),
        ProjectStatus::Completed => input.completed_by = Some(user.user_id),
        ProjectStatus::New | ProjectStatus::Rejected => {}
    }

    let project = save(state, id, input).await?;

    tracing::info!(
        project_id = id,
        status = %status,
        user_id = user.user_id,
        "Project status changed"
    );
    state.log_event(
        AppEvent::new(LOGGER, format!("Project #{id} marked {}", status.label()))
            .by(&user.username),
    );
    Ok(Json(project))
}
