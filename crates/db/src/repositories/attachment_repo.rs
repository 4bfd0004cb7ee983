//! Repository for the `attachments` table.

use intake_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::attachment::{Attachment, CreateAttachment};

const COLUMNS: &str = "id, project_id, file, file_url, original_name, uploaded_at";

/// Provides create/list/delete for attachments. Rows are never updated.
pub struct AttachmentRepo;

impl AttachmentRepo {
    /// Record an uploaded file against a project. `uploaded_at` is fixed here.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateAttachment,
        now: Timestamp,
    ) -> Result<Attachment, sqlx::Error> {
        let query = format!(
            "INSERT INTO attachments (project_id, file, file_url, original_name, uploaded_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(project_id)
            .bind(&input.file)
            .bind(&input.file_url)
            .bind(&input.original_name)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attachment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attachments WHERE id = $1");
        sqlx::query_as::<_, Attachment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's attachments, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attachments WHERE project_id = $1 ORDER BY uploaded_at ASC, id ASC"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Delete an attachment belonging to `project_id`, returning the removed
    /// row so the caller can release the stored object.
    pub async fn delete(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Attachment>, sqlx::Error> {
        let query = format!(
            "DELETE FROM attachments WHERE id = $1 AND project_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }
}
