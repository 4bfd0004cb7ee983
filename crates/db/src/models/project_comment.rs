//! Project comment model and DTOs.

use intake_core::summary;
use intake_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `project_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectComment {
    pub id: DbId,
    pub project_id: DbId,
    pub comment_text: String,
    pub author_name: String,
    pub created_at: Timestamp,
}

impl ProjectComment {
    /// `Comment by {author_name} on {project title}`
    pub fn describe(&self, project_title: &str) -> String {
        summary::comment(&self.author_name, project_title)
    }
}

/// DTO for adding a comment. The project comes from the URL path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectComment {
    pub comment_text: String,
    pub author_name: String,
}
