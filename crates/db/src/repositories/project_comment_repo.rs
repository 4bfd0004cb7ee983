//! Repository for the `project_comments` table.

use intake_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::project_comment::{CreateProjectComment, ProjectComment};

const COLUMNS: &str = "id, project_id, comment_text, author_name, created_at";

pub struct ProjectCommentRepo;

impl ProjectCommentRepo {
    /// Add a comment to a project. `created_at` is fixed here.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateProjectComment,
        now: Timestamp,
    ) -> Result<ProjectComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_comments (project_id, comment_text, author_name, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectComment>(&query)
            .bind(project_id)
            .bind(&input.comment_text)
            .bind(&input.author_name)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// List a project's comments in the order they were written.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_comments
             WHERE project_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ProjectComment>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a comment belonging to `project_id`. Returns `true` if removed.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_comments WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
