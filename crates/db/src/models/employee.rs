//! Employee entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use roster_core::types::DbId;

/// A row from the `employees` table, as returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Employee {
    pub id: DbId,
    /// Public path of the first uploaded file, if any.
    pub image: Option<String>,
    pub name: String,
    pub age: i32,
    pub designation: String,
    pub details: Option<String>,
}

/// What remains of a row after `DELETE ... RETURNING`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DeletedEmployee {
    pub id: DbId,
    pub image: Option<String>,
}
