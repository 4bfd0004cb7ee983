//! Application log entry model (append-only, no `updated_at`).

use std::fmt;

use intake_core::summary;
use intake_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `application_logs` table. Immutable once written.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationLog {
    pub id: DbId,
    pub message: String,
    pub logger_name: String,
    pub interacted_by: String,
    pub created_at: Timestamp,
}

impl fmt::Display for ApplicationLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&summary::application_log(
            &self.logger_name,
            &self.interacted_by,
            &self.message,
        ))
    }
}

/// DTO for appending a log entry.
#[derive(Debug, Clone)]
pub struct CreateApplicationLog {
    pub message: String,
    pub logger_name: String,
    /// Empty when no user was involved.
    pub interacted_by: String,
    pub created_at: Timestamp,
}

/// Filter parameters for listing log entries (`?logger_name=&limit=&offset=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationLogQuery {
    pub logger_name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
