//! Attachment model. Rows are removed with their project.

use intake_core::summary;
use intake_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `attachments` table.
///
/// `file` is the key returned by the media store; `file_url` is where the
/// object can be fetched. `uploaded_at` is set once on insert.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attachment {
    pub id: DbId,
    pub project_id: DbId,
    pub file: String,
    pub file_url: String,
    pub original_name: String,
    pub uploaded_at: Timestamp,
}

impl Attachment {
    /// `Attachment #{id} for {project title}`
    pub fn describe(&self, project_title: &str) -> String {
        summary::attachment(self.id, project_title)
    }
}

/// DTO for recording an uploaded file.
#[derive(Debug, Clone)]
pub struct CreateAttachment {
    pub file: String,
    pub file_url: String,
    pub original_name: String,
}
