//! Enrollment aggregate entity.
//!
//! An Enrollment records a student's relationship to a course and its access
//! state. At most one Enrollment exists per (student, course) pair; the
//! database enforces this with a unique constraint.

use crate::domain::foundation::{
    CourseId, DomainError, EnrollmentId, ErrorCode, OrganizationId, StateMachine, Timestamp,
    UserId,
};
use serde::{Deserialize, Serialize};

use super::EnrollmentStatus;

/// Enrollment aggregate - a student's membership in one course.
///
/// # Invariants
///
/// - `(student_id, course_id)` is unique
/// - Status transitions follow the state machine rules
/// - `completed_at` is set exactly once, on the transition into `Completed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,

    pub student_id: UserId,

    pub course_id: CourseId,

    /// Tenant the course belonged to at enrollment time.
    pub organization_id: Option<OrganizationId>,

    pub status: EnrollmentStatus,

    pub enrolled_at: Timestamp,

    /// Set exactly once when all lectures are finished.
    pub completed_at: Option<Timestamp>,
}

impl Enrollment {
    /// Creates a new enrollment.
    ///
    /// Starts in `PendingPayment` when the course is priced, `Pending`
    /// otherwise.
    pub fn new(
        student_id: UserId,
        course_id: CourseId,
        organization_id: Option<OrganizationId>,
        requires_payment: bool,
    ) -> Self {
        let status = if requires_payment {
            EnrollmentStatus::PendingPayment
        } else {
            EnrollmentStatus::Pending
        };
        Self {
            id: EnrollmentId::new(),
            student_id,
            course_id,
            organization_id,
            status,
            enrolled_at: Timestamp::now(),
            completed_at: None,
        }
    }

    /// Returns true if the student currently has access to course content.
    pub fn has_access(&self) -> bool {
        self.status.has_access()
    }

    /// Activate this enrollment after payment confirmation or admin action.
    ///
    /// # Errors
    ///
    /// Returns error if the current status does not allow activation.
    pub fn activate(&mut self) -> Result<(), DomainError> {
        self.transition_to(EnrollmentStatus::Active)
    }

    /// Mark this enrollment completed. Idempotent: completing an already
    /// completed enrollment is a no-op and `completed_at` is preserved.
    ///
    /// # Errors
    ///
    /// Returns error if the enrollment was never active.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        if self.status == EnrollmentStatus::Completed {
            return Ok(());
        }
        self.transition_to(EnrollmentStatus::Completed)?;
        self.completed_at = Some(Timestamp::now());
        Ok(())
    }

    fn transition_to(&mut self, target: EnrollmentStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot transition enrollment from {:?} to {:?}",
                    self.status, target
                ),
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_enrollment() -> Enrollment {
        Enrollment::new(UserId::new(), CourseId::new(), None, false)
    }

    fn paid_enrollment() -> Enrollment {
        Enrollment::new(UserId::new(), CourseId::new(), None, true)
    }

    #[test]
    fn free_course_starts_pending() {
        let enrollment = free_enrollment();
        assert_eq!(enrollment.status, EnrollmentStatus::Pending);
        assert!(enrollment.completed_at.is_none());
    }

    #[test]
    fn priced_course_starts_pending_payment() {
        let enrollment = paid_enrollment();
        assert_eq!(enrollment.status, EnrollmentStatus::PendingPayment);
    }

    #[test]
    fn pending_payment_activates_on_confirmation() {
        let mut enrollment = paid_enrollment();
        enrollment.activate().unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::Active);
        assert!(enrollment.has_access());
    }

    #[test]
    fn active_enrollment_completes_with_timestamp() {
        let mut enrollment = paid_enrollment();
        enrollment.activate().unwrap();
        enrollment.complete().unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::Completed);
        assert!(enrollment.completed_at.is_some());
    }

    #[test]
    fn completing_twice_preserves_completed_at() {
        let mut enrollment = paid_enrollment();
        enrollment.activate().unwrap();
        enrollment.complete().unwrap();
        let first = enrollment.completed_at;
        enrollment.complete().unwrap();
        assert_eq!(enrollment.completed_at, first);
    }

    #[test]
    fn pending_payment_cannot_complete_directly() {
        let mut enrollment = paid_enrollment();
        let result = enrollment.complete();
        assert!(result.is_err());
        assert_eq!(enrollment.status, EnrollmentStatus::PendingPayment);
        assert!(enrollment.completed_at.is_none());
    }

    #[test]
    fn pending_enrollment_grants_no_access() {
        assert!(!free_enrollment().has_access());
        assert!(!paid_enrollment().has_access());
    }
}
