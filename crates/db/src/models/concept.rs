//! Concept (classification label) rows.

use serde::Serialize;
use sigrh_core::types::DbId;
use sqlx::FromRow;

/// A row from the `concept` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Concept {
    pub id: DbId,
    pub description: String,
    pub is_deletable: bool,
}
