//! Project entity model and DTOs.

use std::fmt;

use intake_core::budget::Budget;
use intake_core::choices::{ProjectPriority, ProjectStatus};
use intake_core::summary;
use intake_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
///
/// `status`, `priority` and `budget` are decoded from their TEXT / BIGINT
/// columns into the core types, so a row that violates the CHECK
/// constraints fails to load rather than leaking an unknown value.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "budget_cents", try_from = "i64")]
    pub budget: Budget,
    pub deadline: Date,
    pub sender_name: String,
    pub contact_email: String,
    pub category_id: Option<DbId>,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    #[sqlx(try_from = "String")]
    pub priority: ProjectPriority,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub accepted_by: Option<DbId>,
    pub started_by: Option<DbId>,
    pub completed_by: Option<DbId>,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&summary::project(&self.title, self.status, self.priority))
    }
}

/// DTO for a client submission.
///
/// Status and priority always start at their defaults; staff change them
/// afterwards through [`UpdateProject`].
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    /// Defaults to 0.00 if omitted.
    pub budget: Option<Budget>,
    /// Defaults to the creation date if omitted.
    pub deadline: Option<Date>,
    pub sender_name: String,
    pub contact_email: String,
    pub category_id: Option<DbId>,
}

/// DTO for updating an existing project. All fields are optional; `None`
/// keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<Budget>,
    pub deadline: Option<Date>,
    pub sender_name: Option<String>,
    pub contact_email: Option<String>,
    pub category_id: Option<DbId>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<ProjectPriority>,
    pub accepted_by: Option<DbId>,
    pub started_by: Option<DbId>,
    pub completed_by: Option<DbId>,
}

/// Filter parameters for listing projects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub priority: Option<ProjectPriority>,
    pub category_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
