//! Handlers for `/projects/{id}/attachments`.
//!
//! Uploads are public so clients can attach briefs to their submission.
//! Listing and deletion require staff.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use intake_core::error::CoreError;
use intake_core::project::clamp_original_name;
use intake_core::types::DbId;
use intake_db::models::attachment::{Attachment, CreateAttachment};
use intake_db::repositories::AttachmentRepo;
use intake_events::AppEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::project::find_project;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

const LOGGER: &str = "attachments";

/// Storage folder for attachment objects.
const ATTACHMENT_FOLDER: &str = "attachments";

/// POST /api/v1/projects/{id}/attachments
///
/// Accepts a multipart form with a required `file` field. The file is
/// stored first; if recording the row then fails, the stored object is
/// removed again so no row ever points at a missing file.
pub async fn upload(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Attachment>)> {
    let project = find_project(&state, project_id).await?;

    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file_data = Some((filename, data.to_vec()));
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let size = data.len();
    let stored = state.media.upload(ATTACHMENT_FOLDER, &filename, data).await?;

    let input = CreateAttachment {
        file: stored.key.clone(),
        file_url: stored.url,
        original_name: clamp_original_name(&filename),
    };

    let attachment =
        match AttachmentRepo::create(&state.pool, project_id, &input, state.clock.now()).await {
            Ok(attachment) => attachment,
            Err(e) => {
                if let Err(cleanup) = state.media.delete(&stored.key).await {
                    tracing::warn!(
                        key = %stored.key,
                        error = %cleanup,
                        "Failed to remove stored file after insert failure"
                    );
                }
                return Err(e.into());
            }
        };

    tracing::info!(
        project_id,
        attachment_id = attachment.id,
        size,
        backend = state.media.backend_name(),
        "Attachment stored"
    );
    state.log_event(AppEvent::new(LOGGER, attachment.describe(&project.title)));
    Ok((StatusCode::CREATED, Json(attachment)))
}

/// GET /api/v1/projects/{id}/attachments
pub async fn list_by_project(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Attachment>>> {
    find_project(&state, project_id).await?;
    let attachments = AttachmentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(attachments))
}

/// DELETE /api/v1/projects/{id}/attachments/{attachment_id}
///
/// Removes the row, then the stored object (best-effort).
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path((project_id, attachment_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let project = find_project(&state, project_id).await?;

    let attachment = AttachmentRepo::delete(&state.pool, project_id, attachment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attachment",
            id: attachment_id,
        }))?;

    if let Err(e) = state.media.delete(&attachment.file).await {
        tracing::warn!(
            attachment_id,
            key = %attachment.file,
            error = %e,
            "Failed to remove stored file"
        );
    }

    state.log_event(
        AppEvent::new(
            LOGGER,
            format!("Deleted {}", attachment.describe(&project.title)),
        )
        .by(&user.username),
    );
    Ok(StatusCode::NO_CONTENT)
}
