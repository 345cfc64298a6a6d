//! Row models.
//!
//! One module per table, plus the flat joined rows the payroll read
//! queries produce.

pub mod clock_event;
pub mod concept;
pub mod employee;
pub mod hour_record;
pub mod shift;

pub use clock_event::ClockEvent;
pub use concept::Concept;
pub use employee::Employee;
pub use hour_record::{HourRecord, HourRecordRangeRow, PendingValidationRow};
pub use shift::Shift;
