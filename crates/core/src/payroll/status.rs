//! Pay-eligibility lifecycle of a computed hour-record.
//!
//! The status is an explicit state machine rather than a free-form string:
//! recomputation replaces every non-archived record of a day wholesale, and
//! the only true transitions are the ones an external validation action may
//! take out of `PendingValidation`. `Archived` is terminal and immutable.

use serde::{Deserialize, Serialize};

/// Pay-eligibility state of an hour-record.
///
/// Stored as TEXT; the spellings (including spaces) predate this service
/// and are shared with the validation frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayrollStatus {
    #[serde(rename = "payable")]
    Payable,
    #[serde(rename = "not payable")]
    NotPayable,
    #[serde(rename = "archived")]
    Archived,
    #[serde(rename = "pending validation")]
    PendingValidation,
}

impl PayrollStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PayrollStatus::Payable => "payable",
            PayrollStatus::NotPayable => "not payable",
            PayrollStatus::Archived => "archived",
            PayrollStatus::PendingValidation => "pending validation",
        }
    }

    /// Whether an external validation action may move `self` to `target`.
    ///
    /// Only `pending validation` records await a decision; every other
    /// state is settled (or, for `archived`, frozen).
    pub fn can_transition_to(self, target: PayrollStatus) -> bool {
        matches!(
            (self, target),
            (
                PayrollStatus::PendingValidation,
                PayrollStatus::Payable | PayrollStatus::NotPayable | PayrollStatus::Archived,
            )
        )
    }

    /// Whether recomputation may delete and supersede a record in this state.
    pub fn replaceable_on_recompute(self) -> bool {
        self != PayrollStatus::Archived
    }
}

impl TryFrom<String> for PayrollStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "payable" => Ok(PayrollStatus::Payable),
            "not payable" => Ok(PayrollStatus::NotPayable),
            "archived" => Ok(PayrollStatus::Archived),
            "pending validation" => Ok(PayrollStatus::PendingValidation),
            other => Err(format!("unknown payroll status '{other}'")),
        }
    }
}

/// Coarse category of a day's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegisterType {
    #[serde(rename = "AUSENCIA")]
    Ausencia,
    #[serde(rename = "PRESENCIA")]
    Presencia,
    #[serde(rename = "DIA NO HABIL")]
    DiaNoHabil,
}

impl RegisterType {
    pub fn as_str(self) -> &'static str {
        match self {
            RegisterType::Ausencia => "AUSENCIA",
            RegisterType::Presencia => "PRESENCIA",
            RegisterType::DiaNoHabil => "DIA NO HABIL",
        }
    }
}

impl TryFrom<String> for RegisterType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "AUSENCIA" => Ok(RegisterType::Ausencia),
            "PRESENCIA" => Ok(RegisterType::Presencia),
            "DIA NO HABIL" => Ok(RegisterType::DiaNoHabil),
            other => Err(format!("unknown register type '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_validation_may_settle() {
        let pending = PayrollStatus::PendingValidation;
        assert!(pending.can_transition_to(PayrollStatus::Payable));
        assert!(pending.can_transition_to(PayrollStatus::NotPayable));
        assert!(pending.can_transition_to(PayrollStatus::Archived));
    }

    #[test]
    fn test_settled_states_do_not_transition() {
        for from in [
            PayrollStatus::Payable,
            PayrollStatus::NotPayable,
            PayrollStatus::Archived,
        ] {
            for to in [
                PayrollStatus::Payable,
                PayrollStatus::NotPayable,
                PayrollStatus::Archived,
                PayrollStatus::PendingValidation,
            ] {
                assert!(!from.can_transition_to(to), "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn test_archived_is_immune_to_recompute() {
        assert!(!PayrollStatus::Archived.replaceable_on_recompute());
        assert!(PayrollStatus::Payable.replaceable_on_recompute());
        assert!(PayrollStatus::PendingValidation.replaceable_on_recompute());
    }

    #[test]
    fn test_status_round_trips_through_db_spelling() {
        for status in [
            PayrollStatus::Payable,
            PayrollStatus::NotPayable,
            PayrollStatus::Archived,
            PayrollStatus::PendingValidation,
        ] {
            assert_eq!(
                PayrollStatus::try_from(status.as_str().to_string()).unwrap(),
                status
            );
        }
        assert!(PayrollStatus::try_from("paid".to_string()).is_err());
    }

    #[test]
    fn test_register_type_spellings() {
        assert_eq!(RegisterType::DiaNoHabil.as_str(), "DIA NO HABIL");
        assert!(RegisterType::try_from("FERIADO".to_string()).is_err());
    }
}
