//! Read access to the course catalog.
//!
//! The enrollment engine only reads courses and lectures; editing them is
//! an external concern.

use async_trait::async_trait;

use crate::domain::catalog::{Course, Lecture};
use crate::domain::foundation::{CourseId, DomainError, LectureId};

/// Read-only catalog access for pricing and completion arithmetic.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    async fn find_course(&self, id: &CourseId) -> Result<Option<Course>, DomainError>;

    async fn find_lecture(&self, id: &LectureId) -> Result<Option<Lecture>, DomainError>;

    /// All lecture ids belonging to a course.
    async fn lecture_ids_for_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<LectureId>, DomainError>;
}
