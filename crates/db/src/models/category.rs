//! Category model and DTOs.

use std::fmt;

use intake_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    pub name: String,
}
