//! Enrollment persistence port.

use async_trait::async_trait;

use crate::domain::enrollment::Enrollment;
use crate::domain::foundation::{CourseId, DomainError, EnrollmentId, UserId};

/// Persistent storage for Enrollment aggregates.
///
/// Implementations enforce the unique constraint on (student, course);
/// `save` of a duplicate pair surfaces as a `Conflict`.
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Persists a new enrollment.
    async fn save(&self, enrollment: &Enrollment) -> Result<(), DomainError>;

    /// Updates an existing enrollment.
    async fn update(&self, enrollment: &Enrollment) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &EnrollmentId) -> Result<Option<Enrollment>, DomainError>;

    async fn find_by_student_and_course(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, DomainError>;
}
