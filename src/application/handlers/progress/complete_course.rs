//! Course completion check.
//!
//! Decides whether a student has finished every lecture of a course, and on
//! the transition to "finished" promotes the enrollment to `completed`.

use std::sync::Arc;

use crate::domain::foundation::{CourseId, DomainError, UserId};
use crate::ports::{CatalogReader, EnrollmentRepository, ProgressRepository};

/// Handler for the course completion check.
pub struct CourseCompletionHandler {
    catalog: Arc<dyn CatalogReader>,
    progress: Arc<dyn ProgressRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl CourseCompletionHandler {
    pub fn new(
        catalog: Arc<dyn CatalogReader>,
        progress: Arc<dyn ProgressRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            catalog,
            progress,
            enrollments,
        }
    }

    /// Returns true iff every lecture of the course is completed for this
    /// student. A course with zero lectures is never completed; vacuous
    /// completion would award certificates for empty courses.
    ///
    /// On completion, an existing non-completed enrollment is promoted to
    /// `completed` with `completed_at` set. Repeated calls after completion
    /// are no-ops returning true.
    pub async fn check(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<bool, DomainError> {
        let lecture_ids = self.catalog.lecture_ids_for_course(course_id).await?;
        if lecture_ids.is_empty() {
            return Ok(false);
        }

        let completed = self
            .progress
            .count_completed(student_id, &lecture_ids)
            .await?;
        if completed < lecture_ids.len() {
            return Ok(false);
        }

        if let Some(mut enrollment) = self
            .enrollments
            .find_by_student_and_course(student_id, course_id)
            .await?
        {
            if enrollment.completed_at.is_none() {
                match enrollment.complete() {
                    Ok(()) => self.enrollments.update(&enrollment).await?,
                    Err(err) => {
                        // An enrollment that was never active cannot complete;
                        // the completion signal itself still stands
                        tracing::warn!(
                            enrollment_id = %enrollment.id,
                            error = %err,
                            "course finished but enrollment could not be completed"
                        );
                    }
                }
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryCatalog, InMemoryEnrollmentRepository, InMemoryProgressRepository,
    };
    use crate::domain::catalog::{Course, Lecture};
    use crate::domain::enrollment::{Enrollment, EnrollmentStatus};
    use crate::domain::foundation::{LectureId, Timestamp};
    use crate::domain::progress::LectureProgress;

    struct Fixture {
        catalog: Arc<InMemoryCatalog>,
        progress: Arc<InMemoryProgressRepository>,
        enrollments: Arc<InMemoryEnrollmentRepository>,
        handler: CourseCompletionHandler,
    }

    fn fixture() -> Fixture {
        let catalog = Arc::new(InMemoryCatalog::new());
        let progress = Arc::new(InMemoryProgressRepository::new());
        let enrollments = Arc::new(InMemoryEnrollmentRepository::new());
        let handler = CourseCompletionHandler::new(
            catalog.clone(),
            progress.clone(),
            enrollments.clone(),
        );
        Fixture {
            catalog,
            progress,
            enrollments,
            handler,
        }
    }

    fn seed_course_with_lectures(fx: &Fixture, count: usize) -> (CourseId, Vec<LectureId>) {
        let course = Course {
            id: CourseId::new(),
            organization_id: None,
            title: "Pottery".to_string(),
            description: None,
            level: "beginner".to_string(),
            price: 0,
            created_at: Timestamp::now(),
        };
        let course_id = course.id;
        fx.catalog.add_course(course);

        let mut lecture_ids = Vec::new();
        for n in 0..count {
            let lecture = Lecture {
                id: LectureId::new(),
                course_id,
                title: format!("Lecture {}", n + 1),
                video_key: None,
                duration_secs: 600,
                order_index: n as i32 + 1,
            };
            lecture_ids.push(lecture.id);
            fx.catalog.add_lecture(lecture);
        }
        (course_id, lecture_ids)
    }

    async fn complete_lecture(fx: &Fixture, student: UserId, lecture: LectureId) {
        let mut record = LectureProgress::new(student, lecture);
        record.force_complete(600);
        fx.progress.upsert(&record).await.unwrap();
    }

    #[tokio::test]
    async fn zero_lecture_course_is_never_completed() {
        let fx = fixture();
        let (course_id, _) = seed_course_with_lectures(&fx, 0);

        let done = fx.handler.check(&UserId::new(), &course_id).await.unwrap();
        assert!(!done);
    }

    #[tokio::test]
    async fn partial_progress_is_not_completion() {
        let fx = fixture();
        let (course_id, lectures) = seed_course_with_lectures(&fx, 2);
        let student = UserId::new();
        complete_lecture(&fx, student, lectures[0]).await;

        let done = fx.handler.check(&student, &course_id).await.unwrap();
        assert!(!done);
    }

    #[tokio::test]
    async fn all_lectures_completed_promotes_enrollment() {
        let fx = fixture();
        let (course_id, lectures) = seed_course_with_lectures(&fx, 2);
        let student = UserId::new();

        let mut enrollment = Enrollment::new(student, course_id, None, false);
        enrollment.activate().unwrap();
        fx.enrollments.save(&enrollment).await.unwrap();

        for lecture in &lectures {
            complete_lecture(&fx, student, *lecture).await;
        }

        let done = fx.handler.check(&student, &course_id).await.unwrap();
        assert!(done);

        let stored = fx.enrollments.find_by_id(&enrollment.id).await.unwrap().unwrap();
        assert_eq!(stored.status, EnrollmentStatus::Completed);
        assert!(stored.completed_at.is_some());
    }

    #[tokio::test]
    async fn repeated_check_preserves_completed_at() {
        let fx = fixture();
        let (course_id, lectures) = seed_course_with_lectures(&fx, 1);
        let student = UserId::new();

        let mut enrollment = Enrollment::new(student, course_id, None, false);
        enrollment.activate().unwrap();
        fx.enrollments.save(&enrollment).await.unwrap();
        complete_lecture(&fx, student, lectures[0]).await;

        assert!(fx.handler.check(&student, &course_id).await.unwrap());
        let first = fx
            .enrollments
            .find_by_id(&enrollment.id)
            .await
            .unwrap()
            .unwrap()
            .completed_at;

        assert!(fx.handler.check(&student, &course_id).await.unwrap());
        let second = fx
            .enrollments
            .find_by_id(&enrollment.id)
            .await
            .unwrap()
            .unwrap()
            .completed_at;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn completion_without_enrollment_still_reports_true() {
        let fx = fixture();
        let (course_id, lectures) = seed_course_with_lectures(&fx, 1);
        let student = UserId::new();
        complete_lecture(&fx, student, lectures[0]).await;

        let done = fx.handler.check(&student, &course_id).await.unwrap();
        assert!(done);
    }
}
