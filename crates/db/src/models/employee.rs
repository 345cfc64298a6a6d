//! Employee rows (read-only collaborator data).

use serde::Serialize;
use sigrh_core::types::DbId;
use sqlx::FromRow;

/// A row from the `employee` table, reduced to what the payroll engine
/// reads. Employee CRUD lives elsewhere.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub shift_id: Option<DbId>,
}
