//! Reconciliation driver: recomputes hour-records for a date range.
//!
//! For one employee and an inclusive `[start, end]` range, the driver loads
//! all clock events around the range, groups them by calendar day, and
//! reconciles each day in ascending order inside its own transaction:
//! delete the day's non-archived records, classify, insert the fresh ones.
//!
//! A day commits before the next one starts, so a failure on day N leaves
//! days `< N` fully reconciled and later days untouched. That partial
//! progress is part of the contract: the error reports which days were
//! committed, and callers retry the remainder by re-running the range.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use sigrh_core::payroll::{classify_day, ClassifyError, Punch};
use sigrh_core::shift::ShiftKind;
use sigrh_core::types::DbId;
use sigrh_db::repositories::{ClockEventRepo, ConceptRepo, EmployeeRepo, HourRecordRepo};
use sqlx::PgPool;

/// Outcome of a completed recompute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Days reconciled, ascending.
    pub days_processed: Vec<NaiveDate>,
    /// Hour-records inserted across all days.
    pub records_written: usize,
}

/// What went wrong during a recompute.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileErrorKind {
    #[error("{0}")]
    Validation(String),

    #[error("employee with id {0} not found")]
    EmployeeNotFound(DbId),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// A failed recompute, including how far it got.
///
/// `completed_days` were committed and keep their fresh records; the
/// failing day and everything after it keep their prior state.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct ReconcileError {
    pub kind: ReconcileErrorKind,
    pub completed_days: Vec<NaiveDate>,
    pub failed_day: Option<NaiveDate>,
}

impl ReconcileError {
    /// A failure before any day was touched.
    fn before_start(kind: ReconcileErrorKind) -> Self {
        ReconcileError {
            kind,
            completed_days: Vec::new(),
            failed_day: None,
        }
    }
}

/// Recompute all hour-records for `employee_id` in `[start, end]`,
/// replacing non-archived records day by day.
pub async fn reconcile_range(
    pool: &PgPool,
    employee_id: DbId,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<ReconcileSummary, ReconcileError> {
    if end < start {
        return Err(ReconcileError::before_start(ReconcileErrorKind::Validation(
            "End date must be greater than start date".to_string(),
        )));
    }

    let employee = EmployeeRepo::get(pool, employee_id)
        .await
        .map_err(|e| ReconcileError::before_start(e.into()))?
        .ok_or_else(|| {
            ReconcileError::before_start(ReconcileErrorKind::EmployeeNotFound(employee_id))
        })?;

    let Some(shift_id) = employee.shift_id else {
        return Err(ReconcileError::before_start(ReconcileErrorKind::Validation(
            format!("Employee {employee_id} has no shift assigned"),
        )));
    };
    let shift = EmployeeRepo::get_shift(pool, shift_id)
        .await
        .map_err(|e| ReconcileError::before_start(e.into()))?
        .ok_or_else(|| {
            ReconcileError::before_start(ReconcileErrorKind::Validation(format!(
                "Shift {shift_id} referenced by employee {employee_id} does not exist"
            )))
        })?;
    let kind = shift.kind();

    let events_by_day = load_events_grouped(pool, employee_id, start, end)
        .await
        .map_err(|e| ReconcileError::before_start(e.into()))?;

    tracing::debug!(
        employee_id,
        %start,
        %end,
        shift_kind = ?kind,
        event_days = events_by_day.len(),
        "starting payroll reconciliation"
    );

    let empty: Vec<Punch> = Vec::new();
    let mut completed_days: Vec<NaiveDate> = Vec::new();
    let mut records_written = 0usize;

    let mut day = start;
    loop {
        let next_day = day.checked_add_days(Days::new(1));

        let today = events_by_day.get(&day).unwrap_or(&empty);
        let tomorrow = next_day
            .and_then(|d| events_by_day.get(&d))
            .unwrap_or(&empty);

        let records = classify_day(day, kind, today, tomorrow).map_err(|e| ReconcileError {
            kind: e.into(),
            completed_days: completed_days.clone(),
            failed_day: Some(day),
        })?;

        let written = persist_day(pool, employee_id, shift_id, day, &records)
            .await
            .map_err(|e| ReconcileError {
                kind: e.into(),
                completed_days: completed_days.clone(),
                failed_day: Some(day),
            })?;
        records_written += written;
        completed_days.push(day);

        match next_day {
            Some(d) if d <= end => day = d,
            _ => break,
        }
    }

    tracing::info!(
        employee_id,
        days = completed_days.len(),
        records = records_written,
        "payroll reconciliation finished"
    );

    Ok(ReconcileSummary {
        days_processed: completed_days,
        records_written,
    })
}

/// Load the employee's events for the range widened by one day on each
/// side (midnight-crossing shifts read the neighbor day), grouped by the
/// calendar date of the event.
async fn load_events_grouped(
    pool: &PgPool,
    employee_id: DbId,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BTreeMap<NaiveDate, Vec<Punch>>, sqlx::Error> {
    let load_from = start.checked_sub_days(Days::new(1)).unwrap_or(start);
    let load_to = end.checked_add_days(Days::new(1)).unwrap_or(end);

    let from: NaiveDateTime = load_from.and_time(NaiveTime::MIN);
    let to: NaiveDateTime = match load_to.checked_add_days(Days::new(1)) {
        Some(d) => d.and_time(NaiveTime::MIN) - chrono::Duration::microseconds(1),
        None => load_to.and_time(NaiveTime::MIN),
    };

    let events = ClockEventRepo::list_for_employee_between(pool, employee_id, from, to).await?;

    let mut by_day: BTreeMap<NaiveDate, Vec<Punch>> = BTreeMap::new();
    for event in &events {
        by_day
            .entry(event.event_date.date())
            .or_default()
            .push(event.as_punch());
    }
    Ok(by_day)
}

/// Replace one day's non-archived records inside a single transaction.
///
/// Takes a per-employee advisory lock first, so concurrent recomputes for
/// the same employee serialize instead of racing on delete/insert.
async fn persist_day(
    pool: &PgPool,
    employee_id: DbId,
    shift_id: DbId,
    day: NaiveDate,
    records: &[sigrh_core::payroll::DayRecord],
) -> Result<usize, sqlx::Error> {
    let mut tx = pool.begin().await?;

    HourRecordRepo::lock_employee(&mut tx, employee_id).await?;
    let superseded = HourRecordRepo::delete_non_archived_for_day(&mut tx, employee_id, day).await?;

    for record in records {
        let concept_id = ConceptRepo::resolve(&mut tx, record.concept).await?;
        HourRecordRepo::insert(&mut tx, employee_id, shift_id, concept_id, record).await?;
    }

    tx.commit().await?;

    tracing::debug!(
        employee_id,
        work_date = %day,
        superseded,
        inserted = records.len(),
        "day reconciled"
    );
    Ok(records.len())
}
