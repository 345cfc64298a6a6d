//! Repository for the `employee_hours` table.
//!
//! Writes go through the reconciliation driver's per-day transaction; the
//! only deletion surface is "non-archived records of one employee-day", so
//! archived history cannot be touched by recomputation.

use chrono::NaiveDate;
use sigrh_core::payroll::DayRecord;
use sigrh_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::{HourRecordRangeRow, PendingValidationRow};

/// `employee_hours` columns, qualified for joined queries.
const HOUR_COLUMNS: &str = "eh.id, eh.employee_id, eh.concept_id, eh.shift_id, eh.check_count, \
     eh.work_date, eh.register_type, eh.first_check_in, eh.last_check_out, eh.summary_time, \
     eh.extra_hours, eh.payroll_status, eh.notes";

/// Joined concept and shift columns, aliased to the flat row names.
const CONTEXT_COLUMNS: &str = "c.description AS concept_description, \
     c.is_deletable AS concept_is_deletable, \
     s.id AS shift_row_id, s.description AS shift_description, s.type AS shift_type, \
     s.working_hours AS shift_working_hours, s.working_days AS shift_working_days";

/// Read/write access to computed hour-records.
pub struct HourRecordRepo;

impl HourRecordRepo {
    /// Serialize recomputes for one employee within the current
    /// transaction. Released automatically at commit/rollback.
    pub async fn lock_employee(conn: &mut PgConnection, employee_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(employee_id)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Delete every non-archived record for `(employee, day)`, returning
    /// the number of superseded rows. Archived records are out of reach by
    /// construction.
    pub async fn delete_non_archived_for_day(
        conn: &mut PgConnection,
        employee_id: DbId,
        day: NaiveDate,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM employee_hours \
             WHERE employee_id = $1 AND work_date = $2 AND payroll_status <> 'archived'",
        )
        .bind(employee_id)
        .bind(day)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Insert one classified record, returning the generated id.
    pub async fn insert(
        conn: &mut PgConnection,
        employee_id: DbId,
        shift_id: DbId,
        concept_id: DbId,
        record: &DayRecord,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO employee_hours \
                (employee_id, concept_id, shift_id, check_count, work_date, register_type, \
                 first_check_in, last_check_out, summary_time, extra_hours, payroll_status, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING id",
        )
        .bind(employee_id)
        .bind(concept_id)
        .bind(shift_id)
        .bind(record.check_count)
        .bind(record.work_date)
        .bind(record.register_type.as_str())
        .bind(record.first_check_in)
        .bind(record.last_check_out)
        .bind(record.summary_time)
        .bind(record.extra_hours)
        .bind(record.status.as_str())
        .bind(&record.notes)
        .fetch_one(conn)
        .await
    }

    /// Hour-records for one employee with `work_date` in `[start, end]`,
    /// ascending, each joined with its concept and the employee's current
    /// shift.
    pub async fn list_for_employee_range(
        pool: &PgPool,
        employee_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HourRecordRangeRow>, sqlx::Error> {
        let query = format!(
            "SELECT {HOUR_COLUMNS}, {CONTEXT_COLUMNS} \
             FROM employee_hours eh \
             JOIN concept c ON c.id = eh.concept_id \
             JOIN employee e ON e.id = eh.employee_id \
             JOIN shift s ON s.id = e.shift_id \
             WHERE eh.employee_id = $1 AND eh.work_date >= $2 AND eh.work_date <= $3 \
             ORDER BY eh.work_date, eh.id"
        );
        sqlx::query_as::<_, HourRecordRangeRow>(&query)
            .bind(employee_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    /// All records awaiting validation, optionally filtered by employee set
    /// and date bounds. Employees without a shift assignment are skipped
    /// (inner join on `e.shift_id`).
    pub async fn list_pending_validation(
        pool: &PgPool,
        employee_ids: Option<&[DbId]>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<PendingValidationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {HOUR_COLUMNS}, {CONTEXT_COLUMNS}, \
                    e.first_name AS employee_first_name, \
                    e.last_name AS employee_last_name, \
                    e.email AS employee_email \
             FROM employee_hours eh \
             JOIN concept c ON c.id = eh.concept_id \
             JOIN employee e ON e.id = eh.employee_id \
             JOIN shift s ON s.id = e.shift_id \
             WHERE eh.payroll_status = 'pending validation' \
               AND ($1::bigint[] IS NULL OR eh.employee_id = ANY($1)) \
               AND ($2::date IS NULL OR eh.work_date >= $2) \
               AND ($3::date IS NULL OR eh.work_date <= $3) \
             ORDER BY eh.work_date, eh.id"
        );
        sqlx::query_as::<_, PendingValidationRow>(&query)
            .bind(employee_ids)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }
}
