//! PostgreSQL implementation of CertificateRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::certificate::Certificate;
use crate::domain::foundation::{CertificateId, CourseId, DomainError, Timestamp, UserId};
use crate::ports::CertificateRepository;

use super::map_db_error;

/// sqlx-backed certificate store.
///
/// The unique indexes on (student_id, course_id) and certificate_no turn
/// issuance races into `Conflict` errors the issuer recovers from.
pub struct PostgresCertificateRepository {
    pool: PgPool,
}

impl PostgresCertificateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CertificateRow {
    id: Uuid,
    student_id: Uuid,
    course_id: Uuid,
    certificate_no: String,
    artifact_path: String,
    issued_at: DateTime<Utc>,
}

impl From<CertificateRow> for Certificate {
    fn from(row: CertificateRow) -> Self {
        Certificate {
            id: CertificateId::from_uuid(row.id),
            student_id: UserId::from_uuid(row.student_id),
            course_id: CourseId::from_uuid(row.course_id),
            certificate_no: row.certificate_no,
            artifact_path: row.artifact_path,
            issued_at: Timestamp::from_datetime(row.issued_at),
        }
    }
}

#[async_trait]
impl CertificateRepository for PostgresCertificateRepository {
    async fn insert(&self, certificate: &Certificate) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO certificates
                (id, student_id, course_id, certificate_no, artifact_path, issued_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(certificate.id.as_uuid())
        .bind(certificate.student_id.as_uuid())
        .bind(certificate.course_id.as_uuid())
        .bind(&certificate.certificate_no)
        .bind(&certificate.artifact_path)
        .bind(certificate.issued_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &CertificateId) -> Result<Option<Certificate>, DomainError> {
        let row: Option<CertificateRow> = sqlx::query_as(
            "SELECT id, student_id, course_id, certificate_no, artifact_path, issued_at
             FROM certificates WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(row.map(Certificate::from))
    }

    async fn find_by_student_and_course(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Certificate>, DomainError> {
        let row: Option<CertificateRow> = sqlx::query_as(
            "SELECT id, student_id, course_id, certificate_no, artifact_path, issued_at
             FROM certificates WHERE student_id = $1 AND course_id = $2",
        )
        .bind(student_id.as_uuid())
        .bind(course_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(row.map(Certificate::from))
    }

    async fn list_for_student(
        &self,
        student_id: &UserId,
    ) -> Result<Vec<Certificate>, DomainError> {
        let rows: Vec<CertificateRow> = sqlx::query_as(
            "SELECT id, student_id, course_id, certificate_no, artifact_path, issued_at
             FROM certificates WHERE student_id = $1 ORDER BY issued_at DESC",
        )
        .bind(student_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(rows.into_iter().map(Certificate::from).collect())
    }
}
