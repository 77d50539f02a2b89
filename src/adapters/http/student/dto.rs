//! Request/response DTOs for student endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::enrollment::{CheckoutDetails, EnrollmentResult};
use crate::domain::certificate::Certificate;
use crate::domain::foundation::{CertificateId, CourseId, EnrollmentId, Timestamp};
use crate::domain::progress::LectureProgress;
use uuid::Uuid;

/// Response for an enroll call.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollResponse {
    pub id: EnrollmentId,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<CheckoutDetails>,
}

impl From<EnrollmentResult> for EnrollResponse {
    fn from(result: EnrollmentResult) -> Self {
        Self {
            id: result.enrollment.id,
            status: result.enrollment.status.as_str().to_string(),
            payment: result.checkout,
        }
    }
}

/// Body of a progress report.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressUpdateRequest {
    pub watched_seconds: i64,
}

/// Response for a progress report.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    pub id: Uuid,
    pub completed: bool,
    pub watched_seconds: i64,
}

impl From<LectureProgress> for ProgressResponse {
    fn from(progress: LectureProgress) -> Self {
        Self {
            id: progress.id,
            completed: progress.completed,
            watched_seconds: progress.watched_seconds,
        }
    }
}

/// Response for an explicit lecture completion.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteResponse {
    pub completed: bool,
}

/// One certificate in the student's list.
#[derive(Debug, Clone, Serialize)]
pub struct CertificateSummary {
    pub id: CertificateId,
    pub course_id: CourseId,
    pub certificate_no: String,
    pub issued_at: Timestamp,
}

impl From<Certificate> for CertificateSummary {
    fn from(certificate: Certificate) -> Self {
        Self {
            id: certificate.id,
            course_id: certificate.course_id,
            certificate_no: certificate.certificate_no,
            issued_at: certificate.issued_at,
        }
    }
}
