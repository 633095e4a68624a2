//! Role lookup model.

use opdeck_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A role row from the seeded `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
}
