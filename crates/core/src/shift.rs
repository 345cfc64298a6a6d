//! Shift topologies.
//!
//! A shift's topology decides which calendar day a scheduled exit can fall
//! on relative to the entry. The upstream shift table stores a free-form
//! `type` label; this module closes it into a tagged variant so the
//! classifier dispatch is total and explicit.

use serde::Serialize;

/// Closed set of shift topologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShiftKind {
    /// Entry and exit on the same calendar day (`"matutino"`).
    Day,
    /// Entry on day D; the exit may fall on D or slip past midnight to D+1
    /// (`"vespertino"`).
    Evening,
    /// Entry on day D, exit always on D+1. Any label other than the two
    /// known ones selects this variant.
    Night,
}

impl ShiftKind {
    /// Map the shift table's `type` label to a topology.
    ///
    /// Unrecognized labels fall through to [`ShiftKind::Night`], preserving
    /// the upstream catch-all, but the decision is made once here instead of
    /// at every dispatch site.
    pub fn from_type_label(label: &str) -> Self {
        match label {
            "matutino" => ShiftKind::Day,
            "vespertino" => ShiftKind::Evening,
            _ => ShiftKind::Night,
        }
    }

    /// Whether the classifier must also consider the following day's events.
    pub fn spans_midnight(self) -> bool {
        !matches!(self, ShiftKind::Day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_map_to_their_topology() {
        assert_eq!(ShiftKind::from_type_label("matutino"), ShiftKind::Day);
        assert_eq!(ShiftKind::from_type_label("vespertino"), ShiftKind::Evening);
        assert_eq!(ShiftKind::from_type_label("nocturno"), ShiftKind::Night);
    }

    #[test]
    fn test_unknown_label_falls_back_to_night() {
        assert_eq!(ShiftKind::from_type_label(""), ShiftKind::Night);
        assert_eq!(ShiftKind::from_type_label("rotativo"), ShiftKind::Night);
    }

    #[test]
    fn test_only_day_shift_stays_within_one_date() {
        assert!(!ShiftKind::Day.spans_midnight());
        assert!(ShiftKind::Evening.spans_midnight());
        assert!(ShiftKind::Night.spans_midnight());
    }
}
