//! Repository for the `employee` and `shift` tables (read-only here).

use sigrh_core::types::DbId;
use sqlx::PgPool;

use crate::models::{Employee, Shift};

/// Column list for `employee` queries.
const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, email, shift_id";

/// Column list for `shift` queries.
const SHIFT_COLUMNS: &str = "id, description, type, working_hours, working_days";

/// Read access to employees and their shift assignment.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Find an employee by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a shift definition by id.
    pub async fn get_shift(pool: &PgPool, shift_id: DbId) -> Result<Option<Shift>, sqlx::Error> {
        let query = format!("SELECT {SHIFT_COLUMNS} FROM shift WHERE id = $1");
        sqlx::query_as::<_, Shift>(&query)
            .bind(shift_id)
            .fetch_optional(pool)
            .await
    }
}
