//! Completion certificates.
//!
//! At most one certificate exists per (student, course); issuance is a
//! get-or-create operation with the storage uniqueness constraint as the
//! final arbiter under concurrent completion triggers.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CertificateId, CourseId, Timestamp, UserId};

/// A certificate record referencing its rendered artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: CertificateId,

    pub student_id: UserId,

    pub course_id: CourseId,

    /// Globally unique certificate number, e.g. `CERT-20260315-9F2A41BC`.
    pub certificate_no: String,

    /// Storage path of the rendered artifact.
    pub artifact_path: String,

    pub issued_at: Timestamp,
}

impl Certificate {
    pub fn new(
        student_id: UserId,
        course_id: CourseId,
        certificate_no: impl Into<String>,
        artifact_path: impl Into<String>,
    ) -> Self {
        Self {
            id: CertificateId::new(),
            student_id,
            course_id,
            certificate_no: certificate_no.into(),
            artifact_path: artifact_path.into(),
            issued_at: Timestamp::now(),
        }
    }

    /// Filename for artifact download.
    pub fn artifact_filename(&self) -> String {
        format!("{}.html", self.certificate_no)
    }
}

/// Generates a date-stamped certificate number with a random suffix.
///
/// Collisions are statistically negligible but not impossible; the unique
/// constraint on `certificate_no` surfaces one as a retryable conflict.
pub fn generate_certificate_no(issued_at: &Timestamp) -> String {
    let suffix: u32 = rand::thread_rng().gen();
    format!("CERT-{}-{:08X}", issued_at.date_compact(), suffix)
}

/// Inputs for rendering a certificate artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateContent {
    pub student_name: String,
    pub course_title: String,
    pub certificate_no: String,
    pub issued_on: String,
    pub issuer_name: String,
    /// Optional signature image to overlay, as a storage path.
    pub signature_image_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certificate_no_embeds_issue_date() {
        let ts = Timestamp::from_unix_secs(1705276800); // 2024-01-15
        let no = generate_certificate_no(&ts);
        assert!(no.starts_with("CERT-20240115-"), "got {}", no);
    }

    #[test]
    fn certificate_no_suffix_is_eight_hex_chars() {
        let no = generate_certificate_no(&Timestamp::now());
        let suffix = no.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn certificate_numbers_differ_across_calls() {
        let ts = Timestamp::now();
        let a = generate_certificate_no(&ts);
        let b = generate_certificate_no(&ts);
        assert_ne!(a, b);
    }

    #[test]
    fn artifact_filename_derives_from_number() {
        let cert = Certificate::new(UserId::new(), CourseId::new(), "CERT-20240115-AB12CD34", "certificates/x.html");
        assert_eq!(cert.artifact_filename(), "CERT-20240115-AB12CD34.html");
    }
}
