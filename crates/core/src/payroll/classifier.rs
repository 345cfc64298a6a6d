//! Daily classifier: turns one employee-day's clock events into classified
//! hour-records.
//!
//! The classifier is a pure function. It receives the punches attributable
//! to the day (and, for midnight-spanning shifts, the following day),
//! decides the day's outcome, and returns the record(s) to persist. Event
//! loading, concept resolution, and writes belong to the reconciliation
//! driver.
//!
//! Outcomes, in evaluation order:
//!
//! 1. Saturday/Sunday — non-business day, regardless of events.
//! 2. No IN event — absence.
//! 3. No qualifying OUT event — presence without exit.
//! 4. Otherwise the worked duration is banded around the 8-hour day with a
//!    ±30 minute tolerance: complete, short, or long. A long day yields two
//!    records: the payable 8-hour base plus a pending-validation overtime
//!    remainder.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::payroll::concept::ConceptCode;
use crate::payroll::status::{PayrollStatus, RegisterType};
use crate::shift::ShiftKind;

/// Expected workday in minutes.
const WORKDAY_MINUTES: i64 = 8 * 60;

/// Tolerance around the expected workday, in minutes.
const BAND_TOLERANCE_MINUTES: i64 = 30;

/// Direction of a clock punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PunchDirection {
    In,
    Out,
}

impl PunchDirection {
    /// Event-store spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            PunchDirection::In => "IN",
            PunchDirection::Out => "OUT",
        }
    }
}

impl TryFrom<String> for PunchDirection {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "IN" => Ok(PunchDirection::In),
            "OUT" => Ok(PunchDirection::Out),
            other => Err(format!("unknown clock event type '{other}'")),
        }
    }
}

/// Minimal classifier view of a clock event.
#[derive(Debug, Clone, Copy)]
pub struct Punch {
    pub at: NaiveDateTime,
    pub direction: PunchDirection,
}

/// One classified hour-record, ready for persistence.
///
/// `work_date` is always the calendar day of the entry event, even when the
/// exit fell on the following day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRecord {
    pub work_date: NaiveDate,
    pub concept: ConceptCode,
    pub register_type: RegisterType,
    pub status: PayrollStatus,
    pub check_count: i32,
    pub first_check_in: Option<NaiveTime>,
    pub last_check_out: Option<NaiveTime>,
    pub summary_time: Option<NaiveTime>,
    pub extra_hours: Option<NaiveTime>,
    pub notes: String,
}

/// Clock data the classifier refuses to turn into a record.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("check-out {check_out} is not after check-in {check_in}")]
    InvertedRange {
        check_in: NaiveDateTime,
        check_out: NaiveDateTime,
    },

    #[error("worked duration from {check_in} to {check_out} is 24h or more")]
    ExcessiveDuration {
        check_in: NaiveDateTime,
        check_out: NaiveDateTime,
    },
}

/// Classify one employee-day.
///
/// `events_today` are the punches whose timestamp falls on `day`;
/// `events_tomorrow` those on `day + 1` (ignored by [`ShiftKind::Day`]).
/// Both slices may arrive unsorted.
pub fn classify_day(
    day: NaiveDate,
    kind: ShiftKind,
    events_today: &[Punch],
    events_tomorrow: &[Punch],
) -> Result<Vec<DayRecord>, ClassifyError> {
    if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
        return Ok(vec![non_business_day(day)]);
    }

    let considered = if kind.spans_midnight() {
        events_today.len() + events_tomorrow.len()
    } else {
        events_today.len()
    };
    let check_count = considered as i32;

    let entry = events_today
        .iter()
        .filter(|p| p.direction == PunchDirection::In)
        .min_by_key(|p| p.at);

    let Some(entry) = entry else {
        return Ok(vec![absence(day, check_count)]);
    };
    let first_check_in = entry.at.time();

    let Some(exit) = select_exit(kind, entry.at, events_today, events_tomorrow) else {
        return Ok(vec![presence_without_exit(day, check_count, first_check_in)]);
    };

    if exit <= entry.at {
        return Err(ClassifyError::InvertedRange {
            check_in: entry.at,
            check_out: exit,
        });
    }

    let worked = exit - entry.at;
    if worked >= Duration::hours(24) {
        return Err(ClassifyError::ExcessiveDuration {
            check_in: entry.at,
            check_out: exit,
        });
    }

    let last_check_out = exit.time();
    // Seconds are dropped before banding, mirroring how the validated
    // tolerances were defined (whole hours and minutes).
    let worked_minutes = worked.num_minutes();

    let mut records = Vec::with_capacity(2);
    if (WORKDAY_MINUTES - BAND_TOLERANCE_MINUTES..=WORKDAY_MINUTES + BAND_TOLERANCE_MINUTES)
        .contains(&worked_minutes)
    {
        records.push(DayRecord {
            work_date: day,
            concept: ConceptCode::FullWorkday,
            register_type: RegisterType::Presencia,
            status: PayrollStatus::Payable,
            check_count,
            first_check_in: Some(first_check_in),
            last_check_out: Some(last_check_out),
            summary_time: time_from_duration(worked),
            extra_hours: None,
            notes: "El empleado completó su jornada laboral.".to_string(),
        });
    } else if worked_minutes < WORKDAY_MINUTES {
        let deficit = WORKDAY_MINUTES - worked_minutes;
        records.push(DayRecord {
            work_date: day,
            concept: ConceptCode::MissingTime,
            register_type: RegisterType::Presencia,
            status: PayrollStatus::NotPayable,
            check_count,
            first_check_in: Some(first_check_in),
            last_check_out: Some(last_check_out),
            summary_time: time_from_duration(worked),
            extra_hours: None,
            notes: format!(
                "Le faltaron {}h {}m para completar la jornada",
                deficit / 60,
                deficit % 60
            ),
        });
    } else {
        // Long day: the payable base is pinned to exactly 8h and the
        // remainder goes to validation as a separate record.
        let extra = worked_minutes - WORKDAY_MINUTES;
        records.push(DayRecord {
            work_date: day,
            concept: ConceptCode::FullWorkday,
            register_type: RegisterType::Presencia,
            status: PayrollStatus::Payable,
            check_count,
            first_check_in: Some(first_check_in),
            last_check_out: Some(last_check_out),
            summary_time: NaiveTime::from_hms_opt(8, 0, 0),
            extra_hours: None,
            notes: "El empleado completó su jornada laboral.".to_string(),
        });
        records.push(DayRecord {
            work_date: day,
            concept: ConceptCode::Overtime,
            register_type: RegisterType::Presencia,
            status: PayrollStatus::PendingValidation,
            check_count,
            first_check_in: Some(first_check_in),
            last_check_out: Some(last_check_out),
            summary_time: None,
            extra_hours: time_from_duration(Duration::minutes(extra)),
            notes: format!("El empleado realizó {}h {}m extra", extra / 60, extra % 60),
        });
    }

    Ok(records)
}

/// Pick the qualifying OUT instant for the topology, if any.
///
/// - Day: latest OUT on the entry day.
/// - Evening: chronologically first OUT (same day or next) strictly after
///   the entry instant.
/// - Night: latest OUT on the following day; same-day OUTs never qualify.
fn select_exit(
    kind: ShiftKind,
    entry_at: NaiveDateTime,
    events_today: &[Punch],
    events_tomorrow: &[Punch],
) -> Option<NaiveDateTime> {
    let outs = |punches: &[Punch]| -> Vec<NaiveDateTime> {
        punches
            .iter()
            .filter(|p| p.direction == PunchDirection::Out)
            .map(|p| p.at)
            .collect()
    };

    match kind {
        ShiftKind::Day => outs(events_today).into_iter().max(),
        ShiftKind::Evening => {
            let mut candidates = outs(events_today);
            candidates.extend(outs(events_tomorrow));
            candidates.sort_unstable();
            candidates.into_iter().find(|at| *at > entry_at)
        }
        ShiftKind::Night => outs(events_tomorrow).into_iter().max(),
    }
}

fn non_business_day(day: NaiveDate) -> DayRecord {
    DayRecord {
        work_date: day,
        concept: ConceptCode::NonBusinessDay,
        register_type: RegisterType::DiaNoHabil,
        status: PayrollStatus::NotPayable,
        check_count: 0,
        first_check_in: None,
        last_check_out: None,
        summary_time: None,
        extra_hours: None,
        notes: "Día no hábil".to_string(),
    }
}

fn absence(day: NaiveDate, check_count: i32) -> DayRecord {
    DayRecord {
        work_date: day,
        concept: ConceptCode::AbsentNoCheckIn,
        register_type: RegisterType::Ausencia,
        status: PayrollStatus::NotPayable,
        check_count,
        first_check_in: None,
        last_check_out: None,
        summary_time: None,
        extra_hours: None,
        notes: "El empleado no registró entrada en el día.".to_string(),
    }
}

fn presence_without_exit(day: NaiveDate, check_count: i32, first_check_in: NaiveTime) -> DayRecord {
    DayRecord {
        work_date: day,
        concept: ConceptCode::PresentNoCheckOut,
        register_type: RegisterType::Presencia,
        status: PayrollStatus::NotPayable,
        check_count,
        first_check_in: Some(first_check_in),
        last_check_out: None,
        summary_time: None,
        extra_hours: None,
        notes: "El empleado registró entrada pero no salida.".to_string(),
    }
}

/// Render a sub-24h duration as a `TIME` value. Returns `None` for
/// durations outside the representable range (callers guard with the
/// 24-hour check first).
fn time_from_duration(d: Duration) -> Option<NaiveTime> {
    let secs = u32::try_from(d.num_seconds()).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn punch(day: NaiveDate, h: u32, m: u32, direction: PunchDirection) -> Punch {
        Punch {
            at: day.and_time(t(h, m)),
            direction,
        }
    }

    // Monday 2025-06-02.
    const Y: i32 = 2025;

    fn monday() -> NaiveDate {
        d(Y, 6, 2)
    }

    #[test]
    fn test_weekend_is_non_business_regardless_of_events() {
        let saturday = d(Y, 6, 7);
        let events = vec![
            punch(saturday, 9, 0, PunchDirection::In),
            punch(saturday, 17, 0, PunchDirection::Out),
        ];
        for kind in [ShiftKind::Day, ShiftKind::Evening, ShiftKind::Night] {
            let records = classify_day(saturday, kind, &events, &[]).unwrap();
            assert_eq!(records.len(), 1);
            let rec = &records[0];
            assert_eq!(rec.register_type, RegisterType::DiaNoHabil);
            assert_eq!(rec.status, PayrollStatus::NotPayable);
            assert_eq!(rec.concept, ConceptCode::NonBusinessDay);
            assert_eq!(rec.check_count, 0);
            assert_eq!(rec.first_check_in, None);
        }
    }

    #[test]
    fn test_no_entry_is_absence() {
        let day = monday();
        let events = vec![punch(day, 17, 0, PunchDirection::Out)];
        let records = classify_day(day, ShiftKind::Day, &events, &[]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].concept, ConceptCode::AbsentNoCheckIn);
        assert_eq!(records[0].register_type, RegisterType::Ausencia);
        assert_eq!(records[0].status, PayrollStatus::NotPayable);
        assert_eq!(records[0].check_count, 1);
    }

    #[test]
    fn test_entry_without_exit_is_presence_without_exit() {
        let day = monday();
        let events = vec![punch(day, 9, 0, PunchDirection::In)];
        let records = classify_day(day, ShiftKind::Day, &events, &[]).unwrap();
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.concept, ConceptCode::PresentNoCheckOut);
        assert_eq!(rec.register_type, RegisterType::Presencia);
        assert_eq!(rec.first_check_in, Some(t(9, 0)));
        assert_eq!(rec.last_check_out, None);
        assert_eq!(rec.status, PayrollStatus::NotPayable);
    }

    #[test]
    fn test_exact_eight_hours_is_complete() {
        let day = monday();
        let events = vec![
            punch(day, 9, 0, PunchDirection::In),
            punch(day, 17, 0, PunchDirection::Out),
        ];
        let records = classify_day(day, ShiftKind::Day, &events, &[]).unwrap();
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.concept, ConceptCode::FullWorkday);
        assert_eq!(rec.status, PayrollStatus::Payable);
        assert_eq!(rec.summary_time, Some(t(8, 0)));
        assert_eq!(rec.check_count, 2);
    }

    #[test]
    fn test_band_boundaries_are_inclusive() {
        let day = monday();
        // 7h30m: lower edge, still complete.
        let events = vec![
            punch(day, 9, 0, PunchDirection::In),
            punch(day, 16, 30, PunchDirection::Out),
        ];
        let records = classify_day(day, ShiftKind::Day, &events, &[]).unwrap();
        assert_eq!(records[0].concept, ConceptCode::FullWorkday);
        assert_eq!(records[0].status, PayrollStatus::Payable);

        // 8h30m: upper edge, still complete, single record.
        let events = vec![
            punch(day, 9, 0, PunchDirection::In),
            punch(day, 17, 30, PunchDirection::Out),
        ];
        let records = classify_day(day, ShiftKind::Day, &events, &[]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].concept, ConceptCode::FullWorkday);
    }

    #[test]
    fn test_one_minute_below_band_is_missing_time() {
        let day = monday();
        let events = vec![
            punch(day, 9, 0, PunchDirection::In),
            punch(day, 16, 29, PunchDirection::Out),
        ];
        let records = classify_day(day, ShiftKind::Day, &events, &[]).unwrap();
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.concept, ConceptCode::MissingTime);
        assert_eq!(rec.status, PayrollStatus::NotPayable);
        assert_eq!(rec.summary_time, Some(t(7, 29)));
        assert_eq!(rec.notes, "Le faltaron 0h 31m para completar la jornada");
    }

    #[test]
    fn test_one_minute_above_band_splits_into_base_and_overtime() {
        let day = monday();
        let events = vec![
            punch(day, 9, 0, PunchDirection::In),
            punch(day, 17, 31, PunchDirection::Out),
        ];
        let records = classify_day(day, ShiftKind::Day, &events, &[]).unwrap();
        assert_eq!(records.len(), 2);

        let base = &records[0];
        assert_eq!(base.concept, ConceptCode::FullWorkday);
        assert_eq!(base.status, PayrollStatus::Payable);
        assert_eq!(base.summary_time, Some(t(8, 0)));
        assert_eq!(base.extra_hours, None);

        let extra = &records[1];
        assert_eq!(extra.concept, ConceptCode::Overtime);
        assert_eq!(extra.status, PayrollStatus::PendingValidation);
        assert_eq!(extra.summary_time, None);
        assert_eq!(extra.extra_hours, Some(t(0, 31)));
        assert_eq!(extra.notes, "El empleado realizó 0h 31m extra");
    }

    #[test]
    fn test_overtime_truncates_to_whole_minutes() {
        let day = monday();
        // 10h05m30s worked: the 30 seconds are dropped, not rounded up.
        let events = vec![
            Punch {
                at: day.and_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap()),
                direction: PunchDirection::In,
            },
            Punch {
                at: day.and_time(NaiveTime::from_hms_opt(18, 5, 30).unwrap()),
                direction: PunchDirection::Out,
            },
        ];
        let records = classify_day(day, ShiftKind::Day, &events, &[]).unwrap();
        assert_eq!(records[1].extra_hours, Some(t(2, 5)));
    }

    #[test]
    fn test_day_shift_takes_latest_same_day_out() {
        let day = monday();
        let events = vec![
            punch(day, 9, 0, PunchDirection::In),
            punch(day, 12, 0, PunchDirection::Out),
            punch(day, 17, 0, PunchDirection::Out),
        ];
        let records = classify_day(day, ShiftKind::Day, &events, &[]).unwrap();
        assert_eq!(records[0].last_check_out, Some(t(17, 0)));
    }

    #[test]
    fn test_day_shift_duplicate_ins_do_not_hide_the_exit() {
        let day = monday();
        // Three INs (badge retries) and one OUT: still a classified day,
        // measured from the earliest IN.
        let events = vec![
            punch(day, 9, 0, PunchDirection::In),
            punch(day, 9, 1, PunchDirection::In),
            punch(day, 9, 2, PunchDirection::In),
            punch(day, 17, 0, PunchDirection::Out),
        ];
        let records = classify_day(day, ShiftKind::Day, &events, &[]).unwrap();
        assert_eq!(records[0].concept, ConceptCode::FullWorkday);
        assert_eq!(records[0].first_check_in, Some(t(9, 0)));
        assert_eq!(records[0].check_count, 4);
    }

    #[test]
    fn test_evening_shift_crosses_midnight() {
        let day = monday();
        let next = d(Y, 6, 3);
        let today = vec![punch(day, 22, 0, PunchDirection::In)];
        let tomorrow = vec![punch(next, 6, 0, PunchDirection::Out)];
        let records = classify_day(day, ShiftKind::Evening, &today, &tomorrow).unwrap();
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.work_date, day);
        assert_eq!(rec.first_check_in, Some(t(22, 0)));
        assert_eq!(rec.last_check_out, Some(t(6, 0)));
        assert_eq!(rec.concept, ConceptCode::FullWorkday);
        assert_eq!(rec.status, PayrollStatus::Payable);
        assert_eq!(rec.summary_time, Some(t(8, 0)));
    }

    #[test]
    fn test_evening_shift_prefers_first_out_after_entry() {
        let day = monday();
        let next = d(Y, 6, 3);
        // A stale OUT before the IN must be ignored; the same-day OUT after
        // the IN wins over the next-day one.
        let today = vec![
            punch(day, 13, 0, PunchDirection::Out),
            punch(day, 14, 0, PunchDirection::In),
            punch(day, 22, 0, PunchDirection::Out),
        ];
        let tomorrow = vec![punch(next, 6, 0, PunchDirection::Out)];
        let records = classify_day(day, ShiftKind::Evening, &today, &tomorrow).unwrap();
        assert_eq!(records[0].last_check_out, Some(t(22, 0)));
        assert_eq!(records[0].summary_time, Some(t(8, 0)));
        assert_eq!(records[0].check_count, 4);
    }

    #[test]
    fn test_evening_shift_without_out_after_entry_is_no_exit() {
        let day = monday();
        let today = vec![
            punch(day, 13, 0, PunchDirection::Out),
            punch(day, 14, 0, PunchDirection::In),
        ];
        let records = classify_day(day, ShiftKind::Evening, &today, &[]).unwrap();
        assert_eq!(records[0].concept, ConceptCode::PresentNoCheckOut);
        assert_eq!(records[0].last_check_out, None);
    }

    #[test]
    fn test_night_shift_ignores_same_day_outs() {
        let day = monday();
        let next = d(Y, 6, 3);
        let today = vec![
            punch(day, 23, 0, PunchDirection::In),
            // A same-day OUT (e.g. a mispunch) must not count as the exit.
            punch(day, 23, 30, PunchDirection::Out),
        ];
        let tomorrow = vec![punch(next, 7, 0, PunchDirection::Out)];
        let records = classify_day(day, ShiftKind::Night, &today, &tomorrow).unwrap();
        assert_eq!(records[0].last_check_out, Some(t(7, 0)));
        assert_eq!(records[0].work_date, day);
        assert_eq!(records[0].summary_time, Some(t(8, 0)));
    }

    #[test]
    fn test_night_shift_without_next_day_out_is_no_exit() {
        let day = monday();
        let today = vec![
            punch(day, 23, 0, PunchDirection::In),
            punch(day, 23, 30, PunchDirection::Out),
        ];
        let records = classify_day(day, ShiftKind::Night, &today, &[]).unwrap();
        assert_eq!(records[0].concept, ConceptCode::PresentNoCheckOut);
    }

    #[test]
    fn test_inverted_range_is_an_error() {
        let day = monday();
        // Day shift where the only OUT precedes the IN.
        let events = vec![
            punch(day, 17, 0, PunchDirection::In),
            punch(day, 9, 0, PunchDirection::Out),
        ];
        let err = classify_day(day, ShiftKind::Day, &events, &[]).unwrap_err();
        assert!(matches!(err, ClassifyError::InvertedRange { .. }));
    }

    #[test]
    fn test_duration_of_24h_or_more_is_an_error() {
        let day = monday();
        let next = d(Y, 6, 3);
        let today = vec![punch(day, 1, 0, PunchDirection::In)];
        let tomorrow = vec![punch(next, 2, 0, PunchDirection::Out)];
        let err = classify_day(day, ShiftKind::Night, &today, &tomorrow).unwrap_err();
        assert!(matches!(err, ClassifyError::ExcessiveDuration { .. }));
    }

    #[test]
    fn test_day_shift_ignores_tomorrow_entirely() {
        let day = monday();
        let next = d(Y, 6, 3);
        let today = vec![
            punch(day, 9, 0, PunchDirection::In),
            punch(day, 17, 0, PunchDirection::Out),
        ];
        let tomorrow = vec![punch(next, 6, 0, PunchDirection::Out)];
        let records = classify_day(day, ShiftKind::Day, &today, &tomorrow).unwrap();
        assert_eq!(records[0].last_check_out, Some(t(17, 0)));
        // Tomorrow's events are not counted for a day shift.
        assert_eq!(records[0].check_count, 2);
    }
}
