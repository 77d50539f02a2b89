//! MarkLectureCompleteHandler - explicit "I finished this lecture" action.

use std::sync::Arc;

use crate::application::handlers::certificate::IssueCertificateHandler;
use crate::domain::foundation::{DomainError, ErrorCode, LectureId, UserId};
use crate::domain::progress::LectureProgress;
use crate::ports::{CatalogReader, EnrollmentRepository, ProgressRepository};

use super::complete_course::CourseCompletionHandler;

/// Command to force-complete a lecture, independent of playback telemetry.
#[derive(Debug, Clone)]
pub struct MarkLectureCompleteCommand {
    pub student_id: UserId,
    pub lecture_id: LectureId,
}

/// Handler for the explicit completion override.
pub struct MarkLectureCompleteHandler {
    catalog: Arc<dyn CatalogReader>,
    enrollments: Arc<dyn EnrollmentRepository>,
    progress: Arc<dyn ProgressRepository>,
    completion: Arc<CourseCompletionHandler>,
    certificates: Arc<IssueCertificateHandler>,
}

impl MarkLectureCompleteHandler {
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
    pub async fn handle(
        &self,
        cmd: MarkLectureCompleteCommand,
    ) -> Result<LectureProgress, DomainError> {
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
        record.force_complete(lecture.duration_secs);
        self.progress.upsert(&record).await?;

        if self
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
