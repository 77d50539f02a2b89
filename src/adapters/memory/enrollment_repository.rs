//! In-memory EnrollmentRepository.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::enrollment::Enrollment;
use crate::domain::foundation::{CourseId, DomainError, EnrollmentId, UserId};
use crate::ports::EnrollmentRepository;

/// Mutex-guarded in-memory enrollment store.
#[derive(Default)]
pub struct InMemoryEnrollmentRepository {
    enrollments: Mutex<Vec<Enrollment>>,
}

impl InMemoryEnrollmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all stored enrollments, for assertions in tests.
    pub fn all(&self) -> Vec<Enrollment> {
        self.enrollments.lock().unwrap().clone()
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentRepository {
    async fn save(&self, enrollment: &Enrollment) -> Result<(), DomainError> {
        let mut enrollments = self.enrollments.lock().unwrap();
        let duplicate = enrollments.iter().any(|e| {
            e.student_id == enrollment.student_id && e.course_id == enrollment.course_id
        });
        if duplicate {
            return Err(DomainError::conflict(
                "Enrollment already exists for this student and course",
            ));
        }
        enrollments.push(enrollment.clone());
        Ok(())
    }

    async fn update(&self, enrollment: &Enrollment) -> Result<(), DomainError> {
        let mut enrollments = self.enrollments.lock().unwrap();
        match enrollments.iter_mut().find(|e| e.id == enrollment.id) {
            Some(existing) => {
                *existing = enrollment.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("Enrollment")),
        }
    }

    async fn find_by_id(&self, id: &EnrollmentId) -> Result<Option<Enrollment>, DomainError> {
        let enrollments = self.enrollments.lock().unwrap();
        Ok(enrollments.iter().find(|e| &e.id == id).cloned())
    }

    async fn find_by_student_and_course(
        &self,
        student_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<Enrollment>, DomainError> {
        let enrollments = self.enrollments.lock().unwrap();
        Ok(enrollments
            .iter()
            .find(|e| &e.student_id == student_id && &e.course_id == course_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_and_find_round_trips() {
        let repo = InMemoryEnrollmentRepository::new();
        let enrollment = Enrollment::new(UserId::new(), CourseId::new(), None, false);

        repo.save(&enrollment).await.unwrap();

        let found = repo.find_by_id(&enrollment.id).await.unwrap();
        assert_eq!(found, Some(enrollment));
    }

    #[tokio::test]
    async fn duplicate_pair_conflicts() {
        let repo = InMemoryEnrollmentRepository::new();
        let student = UserId::new();
        let course = CourseId::new();

        repo.save(&Enrollment::new(student, course, None, false))
            .await
            .unwrap();
        let result = repo.save(&Enrollment::new(student, course, None, true)).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn update_of_unknown_enrollment_fails() {
        let repo = InMemoryEnrollmentRepository::new();
        let enrollment = Enrollment::new(UserId::new(), CourseId::new(), None, false);
        assert!(repo.update(&enrollment).await.is_err());
    }
}
