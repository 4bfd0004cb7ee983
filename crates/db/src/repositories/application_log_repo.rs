//! Repository for the append-only `application_logs` table.
//!
//! Entries are never updated or deleted.

use intake_core::types::DbId;
use sqlx::PgPool;

use crate::models::application_log::{ApplicationLog, ApplicationLogQuery, CreateApplicationLog};
use crate::repositories::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, message, logger_name, interacted_by, created_at";

pub struct ApplicationLogRepo;

impl ApplicationLogRepo {
    /// Append one entry, returning its id.
    pub async fn insert(pool: &PgPool, input: &CreateApplicationLog) -> Result<DbId, sqlx::Error> {
        let row: (DbId,) = sqlx::query_as(
            "INSERT INTO application_logs (message, logger_name, interacted_by, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&input.message)
        .bind(&input.logger_name)
        .bind(&input.interacted_by)
        .bind(input.created_at)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// List entries newest first, optionally restricted to one logger.
    pub async fn list(
        pool: &PgPool,
        params: &ApplicationLogQuery,
    ) -> Result<Vec<ApplicationLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM application_logs
             WHERE ($1::TEXT IS NULL OR logger_name = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ApplicationLog>(&query)
            .bind(&params.logger_name)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Count entries matching the same filter as [`Self::list`].
    pub async fn count(pool: &PgPool, logger_name: Option<&str>) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM application_logs WHERE ($1::TEXT IS NULL OR logger_name = $1)",
        )
        .bind(logger_name)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
