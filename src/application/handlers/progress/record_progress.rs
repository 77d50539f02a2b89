//! RecordProgressHandler - applies playback telemetry reports.

use std::sync::Arc;

use crate::application::handlers::certificate::IssueCertificateHandler;
use crate::domain::foundation::{
    DomainError, ErrorCode, LectureId, UserId, ValidationError,
};
use crate::domain::progress::LectureProgress;
use crate::ports::{CatalogReader, EnrollmentRepository, ProgressRepository};

use super::complete_course::CourseCompletionHandler;

/// Command carrying a playback telemetry report.
#[derive(Debug, Clone)]
pub struct RecordProgressCommand {
    pub student_id: UserId,
    pub lecture_id: LectureId,
    pub watched_seconds: i64,
}

/// Handler for progress reports.
///
/// When a report completes the last outstanding lecture of a course, the
/// completion check promotes the enrollment and certificate issuance runs
/// within the same request.
pub struct RecordProgressHandler {
    catalog: Arc<dyn CatalogReader>,
    enrollments: Arc<dyn EnrollmentRepository>,
    progress: Arc<dyn ProgressRepository>,
    completion: Arc<CourseCompletionHandler>,
    certificates: Arc<IssueCertificateHandler>,
}

impl RecordProgressHandler {
    pub fn new(
        catalog: Arc<dyn CatalogReader>,
        enrollments: Arc<dyn EnrollmentRepository>,
        progress: Arc<dyn ProgressRepository>,
        completion: Arc<CourseCompletionHandler>,
        certificates: Arc<IssueCertificateHandler>,
    ) -> Self {
        Self {
            catalog,
            enrollments,
            progress,
            completion,
            certificates,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` - lecture absent
    /// - `Forbidden` - no currently-valid enrollment for the lecture's course
    /// - `ValidationFailed` - negative watched seconds
    pub async fn handle(
        &self,
        cmd: RecordProgressCommand,
    ) -> Result<LectureProgress, DomainError> {
        if cmd.watched_seconds < 0 {
            return Err(ValidationError::negative("watched_seconds", cmd.watched_seconds).into());
        }

        let lecture = self
            .catalog
            .find_lecture(&cmd.lecture_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Lecture"))?;

        let enrolled = self
            .enrollments
            .find_by_student_and_course(&cmd.student_id, &lecture.course_id)
            .await?
            .map(|e| e.has_access())
            .unwrap_or(false);
        if !enrolled {
            return Err(DomainError::new(ErrorCode::Forbidden, "Not enrolled"));
        }

        let mut record = self
            .progress
            .find_by_student_and_lecture(&cmd.student_id, &cmd.lecture_id)
            .await?
            .unwrap_or_else(|| LectureProgress::new(cmd.student_id, cmd.lecture_id));
        record.record(cmd.watched_seconds, lecture.duration_secs);
        self.progress.upsert(&record).await?;

        if record.completed
            && self
                .completion
                .check(&cmd.student_id, &lecture.course_id)
                .await?
        {
            self.certificates
                .issue_or_get(cmd.student_id, lecture.course_id)
                .await?;
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::progress::test_support::{seed_student, ProgressFixture};

    #[tokio::test]
    async fn report_updates_watched_seconds() {
        let fx = ProgressFixture::with_lectures(2);
        let student = seed_student(&fx);
        fx.enroll_active(student).await;

        let record = fx
            .record_handler()
            .handle(RecordProgressCommand {
                student_id: student,
                lecture_id: fx.lectures[0],
                watched_seconds: 120,
            })
            .await
            .unwrap();

        assert_eq!(record.watched_seconds, 120);
        assert!(!record.completed);
    }

    #[tokio::test]
    async fn stale_report_does_not_lose_progress() {
        let fx = ProgressFixture::with_lectures(1);
        let student = seed_student(&fx);
        fx.enroll_active(student).await;
        let handler = fx.record_handler();

        handler
            .handle(RecordProgressCommand {
                student_id: student,
                lecture_id: fx.lectures[0],
                watched_seconds: 300,
            })
            .await
            .unwrap();
        let record = handler
            .handle(RecordProgressCommand {
                student_id: student,
                lecture_id: fx.lectures[0],
                watched_seconds: 40,
            })
            .await
            .unwrap();

        assert_eq!(record.watched_seconds, 300);
    }

    #[tokio::test]
    async fn unknown_lecture_is_not_found() {
        let fx = ProgressFixture::with_lectures(1);
        let student = seed_student(&fx);
        fx.enroll_active(student).await;

        let result = fx
            .record_handler()
            .handle(RecordProgressCommand {
                student_id: student,
                lecture_id: LectureId::new(),
                watched_seconds: 10,
            })
            .await;
        assert_eq!(result.unwrap_err().code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn report_without_enrollment_is_forbidden() {
        let fx = ProgressFixture::with_lectures(1);
        let student = seed_student(&fx);

        let result = fx
            .record_handler()
            .handle(RecordProgressCommand {
                student_id: student,
                lecture_id: fx.lectures[0],
                watched_seconds: 10,
            })
            .await;
        assert_eq!(result.unwrap_err().code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn negative_report_is_rejected() {
        let fx = ProgressFixture::with_lectures(1);
        let student = seed_student(&fx);
        fx.enroll_active(student).await;

        let result = fx
            .record_handler()
            .handle(RecordProgressCommand {
                student_id: student,
                lecture_id: fx.lectures[0],
                watched_seconds: -1,
            })
            .await;
        assert_eq!(result.unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn finishing_last_lecture_completes_course_and_issues_certificate() {
        let fx = ProgressFixture::with_lectures(2);
        let student = seed_student(&fx);
        fx.enroll_active(student).await;
        let handler = fx.record_handler();

        handler
            .handle(RecordProgressCommand {
                student_id: student,
                lecture_id: fx.lectures[0],
                watched_seconds: 600,
            })
            .await
            .unwrap();
        assert!(fx.certificates.all().is_empty());

        let record = handler
            .handle(RecordProgressCommand {
                student_id: student,
                lecture_id: fx.lectures[1],
                watched_seconds: 600,
            })
            .await
            .unwrap();

        assert!(record.completed);
        assert_eq!(fx.certificates.all().len(), 1);
        let enrollment = fx
            .enrollments
            .find_by_student_and_course(&student, &fx.course_id)
            .await
            .unwrap()
            .unwrap();
        assert!(enrollment.completed_at.is_some());
    }
}
