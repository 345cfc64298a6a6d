//! Repository for the `clock_events` table (read-only: events are an
//! immutable store fed by the punch devices).

use chrono::NaiveDateTime;
use sigrh_core::types::DbId;
use sqlx::PgPool;

use crate::models::ClockEvent;

/// Column list for `clock_events` queries.
const CLOCK_EVENT_COLUMNS: &str = "id, employee_id, event_date, event_type, source, device_id";

/// Read access to raw clock-in/clock-out events.
pub struct ClockEventRepo;

impl ClockEventRepo {
    /// List an employee's events with `event_date` in `[from, to]`, oldest
    /// first. Callers widen the window by a day on each side to cover
    /// midnight-crossing shifts.
    pub async fn list_for_employee_between(
        pool: &PgPool,
        employee_id: DbId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<ClockEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {CLOCK_EVENT_COLUMNS} FROM clock_events \
             WHERE employee_id = $1 AND event_date >= $2 AND event_date <= $3 \
             ORDER BY event_date"
        );
        sqlx::query_as::<_, ClockEvent>(&query)
            .bind(employee_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}
