//! Enrollment status state machine.
//!
//! Transitions are monotonic toward `Completed`, with the exception that a
//! payment-gated enrollment resolves to `Active` before it can complete.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Status of a student's enrollment in a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    /// Free course, awaiting admin activation.
    Pending,

    /// Paid course, payment not yet confirmed. No access.
    PendingPayment,

    /// Student has access to the course content.
    Active,

    /// All lectures finished. Access continues; terminal.
    Completed,
}

impl EnrollmentStatus {
    /// Returns true if this status grants access to course content.
    pub fn has_access(&self) -> bool {
        matches!(self, EnrollmentStatus::Active | EnrollmentStatus::Completed)
    }

    /// Wire representation used by the API and database.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::PendingPayment => "pending_payment",
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Completed => "completed",
        }
    }

    /// Parses the wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(EnrollmentStatus::Pending),
            "pending_payment" => Some(EnrollmentStatus::PendingPayment),
            "active" => Some(EnrollmentStatus::Active),
            "completed" => Some(EnrollmentStatus::Completed),
            _ => None,
        }
    }
}

impl StateMachine for EnrollmentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use EnrollmentStatus::*;
        matches!(
            (self, target),
            // Admin activation of a free enrollment
            (Pending, Active)
            // Payment confirmation
                | (PendingPayment, Active)
            // All lectures finished
                | (Active, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use EnrollmentStatus::*;
        match self {
            Pending => vec![Active],
            PendingPayment => vec![Active],
            Active => vec![Completed],
            Completed => vec![],
        }
    }
}
