//! Certificate queries: list a student's certificates, download an artifact.

use std::sync::Arc;

use crate::domain::certificate::Certificate;
use crate::domain::foundation::{CertificateId, DomainError, UserId};
use crate::ports::{ArtifactStorage, CertificateRepository};

/// Handler for listing a student's certificates.
pub struct ListCertificatesHandler {
    certificates: Arc<dyn CertificateRepository>,
}

impl ListCertificatesHandler {
    pub fn new(certificates: Arc<dyn CertificateRepository>) -> Self {
        Self { certificates }
    }

    pub async fn handle(&self, student_id: &UserId) -> Result<Vec<Certificate>, DomainError> {
        self.certificates.list_for_student(student_id).await
    }
}

/// A downloadable certificate artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateDownload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Handler for downloading a certificate artifact.
pub struct DownloadCertificateHandler {
    certificates: Arc<dyn CertificateRepository>,
    storage: Arc<dyn ArtifactStorage>,
}

impl DownloadCertificateHandler {
    pub fn new(
        certificates: Arc<dyn CertificateRepository>,
        storage: Arc<dyn ArtifactStorage>,
    ) -> Self {
        Self {
            certificates,
            storage,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` - certificate absent, owned by another student, or its
    ///   artifact is missing from storage
    pub async fn handle(
        &self,
        student_id: &UserId,
        certificate_id: &CertificateId,
    ) -> Result<CertificateDownload, DomainError> {
        let certificate = self
            .certificates
            .find_by_id(certificate_id)
            .await?
            .filter(|c| &c.student_id == student_id)
            .ok_or_else(|| DomainError::not_found("Certificate"))?;

        let bytes = self
            .storage
            .load(&certificate.artifact_path)
            .await?
            .ok_or_else(|| DomainError::not_found("Certificate artifact"))?;

        Ok(CertificateDownload {
            filename: certificate.artifact_filename(),
            bytes,
        })
    }
}
