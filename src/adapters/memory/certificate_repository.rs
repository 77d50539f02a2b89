//! In-memory CertificateRepository.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::certificate::Certificate;
use crate::domain::foundation::{CertificateId, CourseId, DomainError, UserId};
use crate::ports::CertificateRepository;

/// Mutex-guarded in-memory certificate store.
///
/// Enforces the (student, course) and certificate-number uniqueness
/// constraints, surfacing duplicates as `Conflict` exactly like the SQL
/// implementation.
#[derive(Default)]
pub struct InMemoryCertificateRepository {
    certificates: Mutex<Vec<Certificate>>,
}

impl InMemoryCertificateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all stored certificates, for assertions in tests.
    pub fn all(&self) -> Vec<Certificate> {
        self.certificates.lock().unwrap().clone()
    }
}

#[async_trait]
impl CertificateRepository for InMemoryCertificateRepository {
    async fn insert(&self, certificate: &Certificate) -> Result<(), DomainError> {
        let mut certificates = self.certificates.lock().unwrap();
        let duplicate_pair = certificates.iter().any(|c| {
            c.student_id == certificate.student_id && c.course_id == certificate.course_id
        });
        if duplicate_pair {
            return Err(DomainError::conflict(
                "Certificate already exists for this student and course",
            ));
        }
        if certificates
            .iter()
            .any(|c| c.certificate_no == certificate.certificate_no)
        {
            return Err(DomainError::conflict("Certificate number already in use"));
        }
        certificates.push(certificate.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CertificateId) -> Result<Option<Certificate>, DomainError> {
        let certificates = self.certificates.lock().unwrap();
        Ok(certificates.iter().find(|c| &c.id == id).cloned())
    }

    async fn find_by_student_and_course(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Certificate>, DomainError> {
        let certificates = self.certificates.lock().unwrap();
        Ok(certificates
            .iter()
            .find(|c| &c.student_id == student_id && &c.course_id == course_id)
            .cloned())
    }

    async fn list_for_student(
        &self,
        student_id: &UserId,
    ) -> Result<Vec<Certificate>, DomainError> {
        let certificates = self.certificates.lock().unwrap();
        let mut result: Vec<Certificate> = certificates
            .iter()
            .filter(|c| &c.student_id == student_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
        Ok(result)
    }
}
