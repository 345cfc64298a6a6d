//! Clock event rows (immutable event store, read-only).

use chrono::NaiveDateTime;
use serde::Serialize;
use sigrh_core::payroll::{Punch, PunchDirection};
use sigrh_core::types::DbId;
use sqlx::FromRow;

/// A row from the `clock_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClockEvent {
    pub id: DbId,
    pub employee_id: DbId,
    pub event_date: NaiveDateTime,
    #[sqlx(try_from = "String")]
    pub event_type: PunchDirection,
    pub source: String,
    pub device_id: String,
}

impl ClockEvent {
    /// The classifier's view of this event.
    pub fn as_punch(&self) -> Punch {
        Punch {
            at: self.event_date,
            direction: self.event_type,
        }
    }
}
