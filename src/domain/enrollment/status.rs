//! Enrollment status state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Enrollment lifecycle status.
///
/// An enrollment starts active and ends in exactly one of two terminal
/// states: expired (its end date passed) or cancelled (an explicit
/// request).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    /// Paid and within the billing period.
    Active,

    /// The billing period ended without renewal.
    Expired,

    /// Cancelled on request. Terminal.
    Cancelled,
}

impl EnrollmentStatus {
    /// Returns true while the enrollment grants gym access.
    pub fn is_active(&self) -> bool {
        matches!(self, EnrollmentStatus::Active)
    }

    /// Returns the wire name for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Expired => "expired",
            EnrollmentStatus::Cancelled => "cancelled",
        }
    }
}

impl StateMachine for EnrollmentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use EnrollmentStatus::*;
        matches!((self, target), (Active, Expired) | (Active, Cancelled))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use EnrollmentStatus::*;
        match self {
            Active => vec![Expired, Cancelled],
            Expired | Cancelled => vec![],
        }
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_can_expire_or_cancel() {
        let status = EnrollmentStatus::Active;
        assert!(status.can_transition_to(&EnrollmentStatus::Expired));
        assert!(status.can_transition_to(&EnrollmentStatus::Cancelled));
    }

    #[test]
    fn expired_and_cancelled_are_terminal() {
        assert!(EnrollmentStatus::Expired.is_terminal());
        assert!(EnrollmentStatus::Cancelled.is_terminal());
        assert!(!EnrollmentStatus::Active.is_terminal());
    }

    #[test]
    fn terminal_states_reject_transitions() {
        let result = EnrollmentStatus::Expired.transition_to(EnrollmentStatus::Active);
        assert!(result.is_err());

        let result = EnrollmentStatus::Cancelled.transition_to(EnrollmentStatus::Expired);
        assert!(result.is_err());
    }

    #[test]
    fn only_active_grants_access() {
        assert!(EnrollmentStatus::Active.is_active());
        assert!(!EnrollmentStatus::Expired.is_active());
        assert!(!EnrollmentStatus::Cancelled.is_active());
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&EnrollmentStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
        let parsed: EnrollmentStatus = serde_json::from_str("\"expired\"").unwrap();
        assert_eq!(parsed, EnrollmentStatus::Expired);
    }

    #[test]
    fn valid_transitions_are_consistent_with_can_transition_to() {
        for status in [
            EnrollmentStatus::Active,
            EnrollmentStatus::Expired,
            EnrollmentStatus::Cancelled,
        ] {
            for valid_target in status.valid_transitions() {
                assert!(
                    status.can_transition_to(&valid_target),
                    "can_transition_to should return true for {:?} -> {:?}",
                    status,
                    valid_target
                );
            }
        }
    }
}
