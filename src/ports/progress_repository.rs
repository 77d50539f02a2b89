//! Lecture progress persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LectureId, UserId};
use crate::domain::progress::LectureProgress;

/// Persistent storage for lecture progress records.
///
/// Implementations enforce the unique constraint on (student, lecture).
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Inserts or updates the record for its (student, lecture) pair.
    async fn upsert(&self, progress: &LectureProgress) -> Result<(), DomainError>;

    async fn find_by_student_and_lecture(
        &self,
        student_id: &UserId,
        lecture_id: &LectureId,
    ) -> Result<Option<LectureProgress>, DomainError>;

    /// Counts how many of the given lectures the student has completed.
    async fn count_completed(
        &self,
        student_id: &UserId,
        lecture_ids: &[LectureId],
    ) -> Result<usize, DomainError>;
}
