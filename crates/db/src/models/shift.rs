//! Shift definition rows (read-only collaborator data).

use serde::Serialize;
use sigrh_core::shift::ShiftKind;
use sigrh_core::types::DbId;
use sqlx::FromRow;

/// A row from the `shift` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shift {
    pub id: DbId,
    pub description: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub shift_type: String,
    pub working_hours: f64,
    pub working_days: i32,
}

impl Shift {
    /// Topology selected by this shift's `type` label.
    pub fn kind(&self) -> ShiftKind {
        ShiftKind::from_type_label(&self.shift_type)
    }
}
