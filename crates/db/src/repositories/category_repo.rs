//! Repository for the `categories` table.

use intake_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CreateCategory, UpdateCategory};

/// Column list for categories queries.
const COLUMNS: &str = "id, name";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories, ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE name = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Create a new category. Fails on `uq_categories_name` if the name is taken.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!("INSERT INTO categories (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Rename a category, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("UPDATE categories SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category by ID. Projects in the category keep existing with
    /// `category_id` set to NULL. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
