//! One-line summaries used in logs and admin listings.
//!
//! These strings are for people, not machines; nothing parses them back.

use crate::choices::{ProjectPriority, ProjectStatus};
use crate::types::DbId;

/// Number of message characters kept in a log summary.
pub const LOG_PREVIEW_CHARS: usize = 50;

/// `[{logger_name}] {interacted_by}: {first 50 chars of message}...`
pub fn application_log(logger_name: &str, interacted_by: &str, message: &str) -> String {
    let preview: String = message.chars().take(LOG_PREVIEW_CHARS).collect();
    format!("[{logger_name}] {interacted_by}: {preview}...")
}

/// `{title} ({status}, Priority: {priority})`
pub fn project(title: &str, status: ProjectStatus, priority: ProjectPriority) -> String {
    format!("{title} ({status}, Priority: {priority})")
}

/// `Attachment #{id} for {project_title}`
pub fn attachment(id: DbId, project_title: &str) -> String {
    format!("Attachment #{id} for {project_title}")
}

/// `Comment by {author_name} on {project_title}`
pub fn comment(author_name: &str, project_title: &str) -> String {
    format!("Comment by {author_name} on {project_title}")
}
