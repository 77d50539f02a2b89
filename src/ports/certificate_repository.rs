//! Certificate persistence port.

use async_trait::async_trait;

use crate::domain::certificate::Certificate;
use crate::domain::foundation::{CertificateId, CourseId, DomainError, UserId};

/// Persistent storage for certificate records.
///
/// The unique constraint on (student, course) is the final arbiter for
/// concurrent issuance: `insert` of a duplicate pair (or a colliding
/// certificate number) must fail with `Conflict`, never silently succeed.
#[async_trait]
pub trait CertificateRepository: Send + Sync {
    /// Inserts a new certificate. Fails with `Conflict` on a duplicate
    /// (student, course) pair or certificate number.
    async fn insert(&self, certificate: &Certificate) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &CertificateId) -> Result<Option<Certificate>, DomainError>;

    async fn find_by_student_and_course(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Certificate>, DomainError>;

    /// Lists a student's certificates, newest first.
    async fn list_for_student(&self, student_id: &UserId)
        -> Result<Vec<Certificate>, DomainError>;
}
