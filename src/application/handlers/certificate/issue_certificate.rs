//! IssueCertificateHandler - get-or-create certificate issuance.
//!
//! Issuance happens in response to a course completion signal. Two
//! completion triggers can race here; the repository's uniqueness
//! constraint on (student, course) decides the winner and the loser
//! re-fetches the winning record instead of erroring out.

use std::sync::Arc;

use crate::domain::certificate::{
    generate_certificate_no, Certificate, CertificateContent,
};
use crate::domain::foundation::{
    CourseId, DomainError, ErrorCode, Timestamp, UserId,
};
use crate::ports::{
    ArtifactStorage, CatalogReader, CertificateRenderer, CertificateRepository, UserDirectory,
};

/// Issuer display settings stamped onto every certificate.
#[derive(Debug, Clone)]
pub struct CertificateSettings {
    pub issuer_name: String,
    /// Optional signature image overlay, as a storage path.
    pub signature_image_path: Option<String>,
}

/// Handler for certificate issuance.
pub struct IssueCertificateHandler {
    certificates: Arc<dyn CertificateRepository>,
    users: Arc<dyn UserDirectory>,
    catalog: Arc<dyn CatalogReader>,
    renderer: Arc<dyn CertificateRenderer>,
    storage: Arc<dyn ArtifactStorage>,
    settings: CertificateSettings,
}

impl IssueCertificateHandler {
    pub fn new(
        certificates: Arc<dyn CertificateRepository>,
        users: Arc<dyn UserDirectory>,
        catalog: Arc<dyn CatalogReader>,
        renderer: Arc<dyn CertificateRenderer>,
        storage: Arc<dyn ArtifactStorage>,
        settings: CertificateSettings,
    ) -> Self {
        Self {
            certificates,
            users,
            catalog,
            renderer,
            storage,
            settings,
        }
    }

    /// Returns the certificate for (student, course), creating it at most
    /// once.
    ///
    /// # Errors
    ///
    /// - `DataMissing` - the student or course vanished between the
    ///   completion check and issuance
    /// - `Conflict` - certificate number collision (retryable)
    pub async fn issue_or_get(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> Result<Certificate, DomainError> {
        if let Some(existing) = self
            .certificates
            .find_by_student_and_course(&student_id, &course_id)
            .await?
        {
            return Ok(existing);
        }

        let student = self
            .users
            .find_by_id(&student_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::DataMissing, "Student missing"))?;
        let course = self
            .catalog
            .find_course(&course_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::DataMissing, "Course missing"))?;

        let issued_at = Timestamp::now();
        let certificate_no = generate_certificate_no(&issued_at);
        let content = CertificateContent {
            student_name: student.full_name,
            course_title: course.title,
            certificate_no: certificate_no.clone(),
            issued_on: issued_at.date_display(),
            issuer_name: self.settings.issuer_name.clone(),
            signature_image_path: self.settings.signature_image_path.clone(),
        };

        let bytes = self.renderer.render(&content)?;
        let artifact_path = format!("certificates/{}.html", certificate_no);
        self.storage.store(&artifact_path, &bytes).await?;

        let certificate =
            Certificate::new(student_id, course_id, certificate_no, artifact_path);
        match self.certificates.insert(&certificate).await {
            Ok(()) => Ok(certificate),
            Err(err) if err.code == ErrorCode::Conflict => {
                // Lost a race: the other trigger's record wins
                self.certificates
                    .find_by_student_and_course(&student_id, &course_id)
                    .await?
                    .ok_or(err)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::certificate::HtmlCertificateRenderer;
    use crate::adapters::memory::{
        InMemoryArtifactStorage, InMemoryCatalog, InMemoryCertificateRepository,
        InMemoryUserDirectory,
    };
    use crate::domain::catalog::Course;
    use crate::domain::foundation::Role;
    use crate::ports::UserAccount;

    struct Fixture {
        certificates: Arc<InMemoryCertificateRepository>,
        users: Arc<InMemoryUserDirectory>,
        catalog: Arc<InMemoryCatalog>,
        storage: Arc<InMemoryArtifactStorage>,
        handler: IssueCertificateHandler,
    }

    fn fixture() -> Fixture {
        let certificates = Arc::new(InMemoryCertificateRepository::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let catalog = Arc::new(InMemoryCatalog::new());
        let storage = Arc::new(InMemoryArtifactStorage::new());
        let handler = IssueCertificateHandler::new(
            certificates.clone(),
            users.clone(),
            catalog.clone(),
            Arc::new(HtmlCertificateRenderer::new()),
            storage.clone(),
            CertificateSettings {
                issuer_name: "Arts Faculty".to_string(),
                signature_image_path: None,
            },
        );
        Fixture {
            certificates,
            users,
            catalog,
            storage,
            handler,
        }
    }

    fn seed_student(fx: &Fixture) -> UserId {
        let id = UserId::new();
        fx.users.add(UserAccount {
            id,
            role: Role::Student,
            organization_id: None,
            full_name: "Priya Sharma".to_string(),
            email: "priya@example.com".to_string(),
            phone: None,
            is_active: true,
        });
        id
    }

    fn seed_course(fx: &Fixture) -> CourseId {
        let course = Course {
            id: CourseId::new(),
            organization_id: None,
            title: "Charcoal Sketching".to_string(),
            description: None,
            level: "beginner".to_string(),
            price: 0,
            created_at: Timestamp::now(),
        };
        let id = course.id;
        fx.catalog.add_course(course);
        id
    }

    #[tokio::test]
    async fn issues_certificate_with_stored_artifact() {
        let fx = fixture();
        let student = seed_student(&fx);
        let course = seed_course(&fx);

        let cert = fx.handler.issue_or_get(student, course).await.unwrap();

        assert!(cert.certificate_no.starts_with("CERT-"));
        let artifact = fx.storage.load(&cert.artifact_path).await.unwrap().unwrap();
        let html = String::from_utf8(artifact).unwrap();
        assert!(html.contains("Priya Sharma"));
        assert!(html.contains("Charcoal Sketching"));
        assert!(html.contains(&cert.certificate_no));
    }

    #[tokio::test]
    async fn second_call_returns_same_certificate() {
        let fx = fixture();
        let student = seed_student(&fx);
        let course = seed_course(&fx);

        let first = fx.handler.issue_or_get(student, course).await.unwrap();
        let second = fx.handler.issue_or_get(student, course).await.unwrap();

        assert_eq!(first.certificate_no, second.certificate_no);
        assert_eq!(fx.certificates.all().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_issuance_produces_single_certificate() {
        let fx = fixture();
        let student = seed_student(&fx);
        let course = seed_course(&fx);
        let handler = Arc::new(fx.handler);

        let mut handles = Vec::new();
        for _ in 0..4 {
            let handler = handler.clone();
            handles.push(tokio::spawn(async move {
                handler.issue_or_get(student, course).await.unwrap()
            }));
        }

        let mut numbers = Vec::new();
        for handle in handles {
            numbers.push(handle.await.unwrap().certificate_no);
        }
        numbers.dedup();
        assert_eq!(numbers.len(), 1);
        assert_eq!(fx.certificates.all().len(), 1);
    }

    #[tokio::test]
    async fn missing_student_is_data_missing() {
        let fx = fixture();
        let course = seed_course(&fx);

        let result = fx.handler.issue_or_get(UserId::new(), course).await;
        assert_eq!(result.unwrap_err().code, ErrorCode::DataMissing);
    }

    #[tokio::test]
    async fn missing_course_is_data_missing() {
        let fx = fixture();
        let student = seed_student(&fx);

        let result = fx.handler.issue_or_get(student, CourseId::new()).await;
        assert_eq!(result.unwrap_err().code, ErrorCode::DataMissing);
    }
}
