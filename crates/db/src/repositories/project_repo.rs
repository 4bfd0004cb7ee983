//! Repository for the `projects` table.
//!
//! Every write goes through [`ProjectRepo::create`] or [`ProjectRepo::update`],
//! both of which check the deadline against the caller-supplied `now` and
//! stamp `updated_at` with it. A refused save writes nothing.

use intake_core::choices::{ProjectPriority, ProjectStatus};
use intake_core::project as rules;
use intake_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use crate::repositories::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, budget_cents, deadline, sender_name, \
    contact_email, category_id, status, priority, created_at, updated_at, \
    accepted_by, started_by, completed_by";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `deadline` defaults to the date of `now`; status and priority start at
    /// `NEW` / `MEDIUM`. Fails with [`DbError::Core`] if any field is invalid
    /// or the deadline is before the date of `now`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
        now: Timestamp,
    ) -> Result<Project, DbError> {
        let today = now.date_naive();
        let deadline = input.deadline.unwrap_or(today);

        validate_fields(
            &input.title,
            &input.description,
            &input.sender_name,
            &input.contact_email,
        )?;
        rules::validate_deadline(deadline, today)?;

        let query = format!(
            "INSERT INTO projects
                (title, description, budget_cents, deadline, sender_name, contact_email,
                 category_id, status, priority, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.budget.unwrap_or_default().cents())
            .bind(deadline)
            .bind(&input.sender_name)
            .bind(&input.contact_email)
            .bind(input.category_id)
            .bind(ProjectStatus::default().as_str())
            .bind(ProjectPriority::default().as_str())
            .bind(now)
            .fetch_one(pool)
            .await?;

        tracing::debug!(project_id = project.id, %deadline, "Project created");
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects, newest first, narrowed by the optional filters.
    pub async fn list(pool: &PgPool, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::TEXT IS NULL OR priority = $2)
               AND ($3::BIGINT IS NULL OR category_id = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filter.status.map(ProjectStatus::as_str))
            .bind(filter.priority.map(ProjectPriority::as_str))
            .bind(filter.category_id)
            .bind(clamp_limit(filter.limit))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// The row is locked, merged with `input`, and the merged record is
    /// validated before writing, so the deadline rule applies to the stored
    /// deadline even when the update does not touch it. `updated_at` is set
    /// to `now` on every successful save.
    ///
    /// Returns `Ok(None)` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
        now: Timestamp,
    ) -> Result<Option<Project>, DbError> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let merged = merge(current, input);
        validate_fields(
            &merged.title,
            &merged.description,
            &merged.sender_name,
            &merged.contact_email,
        )?;
        rules::validate_deadline(merged.deadline, now.date_naive())?;

        let query = format!(
            "UPDATE projects SET
                title = $2,
                description = $3,
                budget_cents = $4,
                deadline = $5,
                sender_name = $6,
                contact_email = $7,
                category_id = $8,
                status = $9,
                priority = $10,
                accepted_by = $11,
                started_by = $12,
                completed_by = $13,
                updated_at = $14
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&merged.title)
            .bind(&merged.description)
            .bind(merged.budget.cents())
            .bind(merged.deadline)
            .bind(&merged.sender_name)
            .bind(&merged.contact_email)
            .bind(merged.category_id)
            .bind(merged.status.as_str())
            .bind(merged.priority.as_str())
            .bind(merged.accepted_by)
            .bind(merged.started_by)
            .bind(merged.completed_by)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(project))
    }

    /// Permanently delete a project. Attachments and comments go with it
    /// (`ON DELETE CASCADE`). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a project and its attachment rows in one transaction,
    /// returning the storage keys of the removed attachments. `None` if the
    /// project does not exist.
    ///
    /// The project row is locked first, so a concurrent attachment insert
    /// waits and then fails its foreign key rather than being cascaded away.
    pub async fn delete_with_attachment_files(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Vec<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let files: Vec<String> =
            sqlx::query_scalar("DELETE FROM attachments WHERE project_id = $1 RETURNING file")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(files))
    }

    /// Count projects per status, for dashboards. Statuses with no projects
    /// are omitted.
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT status, COUNT(*) FROM projects GROUP BY status ORDER BY status ASC",
        )
        .fetch_all(pool)
        .await
    }
}

/// Apply the `Some` fields of `input` on top of `current`.
fn merge(current: Project, input: &UpdateProject) -> Project {
    Project {
        title: input.title.clone().unwrap_or(current.title),
        description: input.description.clone().unwrap_or(current.description),
        budget: input.budget.unwrap_or(current.budget),
        deadline: input.deadline.unwrap_or(current.deadline),
        sender_name: input.sender_name.clone().unwrap_or(current.sender_name),
        contact_email: input.contact_email.clone().unwrap_or(current.contact_email),
        category_id: input.category_id.or(current.category_id),
        status: input.status.unwrap_or(current.status),
        priority: input.priority.unwrap_or(current.priority),
        accepted_by: input.accepted_by.or(current.accepted_by),
        started_by: input.started_by.or(current.started_by),
        completed_by: input.completed_by.or(current.completed_by),
        ..current
    }
}

fn validate_fields(
    title: &str,
    description: &str,
    sender_name: &str,
    contact_email: &str,
) -> Result<(), DbError> {
    rules::validate_title(title)?;
    rules::validate_description(description)?;
    rules::validate_sender_name(sender_name)?;
    rules::validate_contact_email(contact_email)?;
    Ok(())
}
