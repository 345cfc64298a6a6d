//! Handlers for the payroll endpoints: recompute trigger and the two read
//! projections.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sigrh_core::error::CoreError;
use sigrh_core::types::DbId;
use sigrh_db::models::{Concept, Employee, HourRecord, Shift};
use sigrh_db::repositories::{EmployeeRepo, HourRecordRepo};

use crate::engine;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for `/payroll/calculate` and `/payroll/hours`.
#[derive(Debug, Deserialize)]
pub struct PayrollRequest {
    pub employee_id: DbId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Body for `/payroll/pending_validation_hours`; every filter is optional.
#[derive(Debug, Deserialize)]
pub struct PendingValidationRequest {
    #[serde(default)]
    pub employee_id: Option<Vec<DbId>>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// One hour-record with its classification and the employee's shift.
#[derive(Debug, Serialize)]
pub struct PayrollEntry {
    pub employee_hours: HourRecord,
    pub concept: Concept,
    pub shift: Shift,
}

/// A pending-validation hour-record with full context.
#[derive(Debug, Serialize)]
pub struct PendingValidationEntry {
    pub employee: Employee,
    pub employee_hours: HourRecord,
    pub concept: Concept,
    pub shift: Shift,
}

// ---------------------------------------------------------------------------
// POST /payroll/calculate
// ---------------------------------------------------------------------------

/// Recompute hour-records for one employee over an inclusive date range.
///
/// 204 on success. On failure the error names the rule that failed and how
/// many days had already been committed (partial progress is retained).
pub async fn calculate(
    State(state): State<AppState>,
    Json(request): Json<PayrollRequest>,
) -> AppResult<StatusCode> {
    let summary = engine::reconcile_range(
        &state.pool,
        request.employee_id,
        request.start_date,
        request.end_date,
    )
    .await?;

    tracing::info!(
        employee_id = request.employee_id,
        days = summary.days_processed.len(),
        records = summary.records_written,
        "payroll recompute requested and finished"
    );
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// POST /payroll/hours
// ---------------------------------------------------------------------------

/// List an employee's hour-records in a date range, joined with concept and
/// shift metadata, ascending by work date.
pub async fn hours_by_range(
    State(state): State<AppState>,
    Json(request): Json<PayrollRequest>,
) -> AppResult<Json<Vec<PayrollEntry>>> {
    if request.end_date < request.start_date {
        return Err(AppError::Core(CoreError::Validation(
            "End date must be greater than start date".to_string(),
        )));
    }

    let employee = EmployeeRepo::get(&state.pool, request.employee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "employee",
            id: request.employee_id,
        }))?;
    if employee.shift_id.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "shift for employee",
            id: request.employee_id,
        }));
    }

    let rows = HourRecordRepo::list_for_employee_range(
        &state.pool,
        request.employee_id,
        request.start_date,
        request.end_date,
    )
    .await?;

    let entries = rows
        .into_iter()
        .map(|row| PayrollEntry {
            concept: row.concept(),
            shift: row.shift(),
            employee_hours: row.record,
        })
        .collect();
    Ok(Json(entries))
}

// ---------------------------------------------------------------------------
// POST /payroll/pending_validation_hours
// ---------------------------------------------------------------------------

/// List all hour-records awaiting validation, optionally filtered by
/// employee set and/or date bounds. Records whose employee has no shift
/// assigned are skipped.
pub async fn pending_validation_hours(
    State(state): State<AppState>,
    Json(request): Json<PendingValidationRequest>,
) -> AppResult<Json<Vec<PendingValidationEntry>>> {
    if let (Some(start), Some(end)) = (request.start_date, request.end_date) {
        if end < start {
            return Err(AppError::Core(CoreError::Validation(
                "End date must be greater than start date".to_string(),
            )));
        }
    }

    let rows = HourRecordRepo::list_pending_validation(
        &state.pool,
        request.employee_id.as_deref(),
        request.start_date,
        request.end_date,
    )
    .await?;

    let entries = rows
        .into_iter()
        .map(|row| PendingValidationEntry {
            employee: row.employee(),
            concept: row.joined.concept(),
            shift: row.joined.shift(),
            employee_hours: row.joined.record,
        })
        .collect();
    Ok(Json(entries))
}
