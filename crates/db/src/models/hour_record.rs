//! Computed hour-record rows and the joined projections the payroll read
//! queries return.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sigrh_core::payroll::{PayrollStatus, RegisterType};
use sigrh_core::types::DbId;
use sqlx::FromRow;

use crate::models::concept::Concept;
use crate::models::employee::Employee;
use crate::models::shift::Shift;

/// A row from the `employee_hours` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HourRecord {
    pub id: DbId,
    pub employee_id: DbId,
    pub concept_id: DbId,
    pub shift_id: DbId,
    pub check_count: i32,
    pub work_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub register_type: RegisterType,
    pub first_check_in: Option<NaiveTime>,
    pub last_check_out: Option<NaiveTime>,
    pub summary_time: Option<NaiveTime>,
    pub extra_hours: Option<NaiveTime>,
    #[sqlx(try_from = "String")]
    pub payroll_status: PayrollStatus,
    pub notes: String,
}

/// Flat row for the hours-by-range query: an hour-record joined with its
/// concept and the employee's current shift.
#[derive(Debug, Clone, FromRow)]
pub struct HourRecordRangeRow {
    #[sqlx(flatten)]
    pub record: HourRecord,
    pub concept_description: String,
    pub concept_is_deletable: bool,
    pub shift_row_id: DbId,
    pub shift_description: String,
    pub shift_type: String,
    pub shift_working_hours: f64,
    pub shift_working_days: i32,
}

impl HourRecordRangeRow {
    pub fn concept(&self) -> Concept {
        Concept {
            id: self.record.concept_id,
            description: self.concept_description.clone(),
            is_deletable: self.concept_is_deletable,
        }
    }

    pub fn shift(&self) -> Shift {
        Shift {
            id: self.shift_row_id,
            description: self.shift_description.clone(),
            shift_type: self.shift_type.clone(),
            working_hours: self.shift_working_hours,
            working_days: self.shift_working_days,
        }
    }
}

/// Flat row for the pending-validation query: adds the employee columns.
#[derive(Debug, Clone, FromRow)]
pub struct PendingValidationRow {
    #[sqlx(flatten)]
    pub joined: HourRecordRangeRow,
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub employee_email: String,
}

impl PendingValidationRow {
    pub fn employee(&self) -> Employee {
        Employee {
            id: self.joined.record.employee_id,
            first_name: self.employee_first_name.clone(),
            last_name: self.employee_last_name.clone(),
            email: self.employee_email.clone(),
            shift_id: Some(self.joined.shift_row_id),
        }
    }
}
