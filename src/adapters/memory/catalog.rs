//! In-memory CatalogReader.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::catalog::{Course, Lecture};
use crate::domain::foundation::{CourseId, DomainError, LectureId};
use crate::ports::CatalogReader;

/// Mutex-guarded in-memory catalog, seeded by tests or a dev bootstrap.
#[derive(Default)]
pub struct InMemoryCatalog {
    courses: Mutex<Vec<Course>>,
    lectures: Mutex<Vec<Lecture>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_course(&self, course: Course) {
        self.courses.lock().unwrap().push(course);
    }

    pub fn add_lecture(&self, lecture: Lecture) {
        self.lectures.lock().unwrap().push(lecture);
    }
}

#[async_trait]
impl CatalogReader for InMemoryCatalog {
    async fn find_course(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        let courses = self.courses.lock().unwrap();
        Ok(courses.iter().find(|c| &c.id == id).cloned())
    }

    async fn find_lecture(&self, id: &LectureId) -> Result<Option<Lecture>, DomainError> {
        let lectures = self.lectures.lock().unwrap();
        Ok(lectures.iter().find(|l| &l.id == id).cloned())
    }

    async fn lecture_ids_for_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<LectureId>, DomainError> {
        let mut lectures: Vec<Lecture> = self
            .lectures
            .lock()
            .unwrap()
            .iter()
            .filter(|l| &l.course_id == course_id)
            .cloned()
            .collect();
        lectures.sort_by_key(|l| l.order_index);
        Ok(lectures.into_iter().map(|l| l.id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn course() -> Course {
        Course {
            id: CourseId::new(),
            organization_id: None,
            title: "Figure Drawing".to_string(),
            description: None,
            level: "intermediate".to_string(),
            price: 0,
            created_at: Timestamp::now(),
        }
    }

    fn lecture(course_id: CourseId, order_index: i32) -> Lecture {
        Lecture {
            id: LectureId::new(),
            course_id,
            title: format!("Lecture {}", order_index),
            video_key: None,
            duration_secs: 600,
            order_index,
        }
    }

    #[tokio::test]
    async fn finds_seeded_course() {
        let catalog = InMemoryCatalog::new();
        let c = course();
        catalog.add_course(c.clone());

        assert_eq!(catalog.find_course(&c.id).await.unwrap(), Some(c));
        assert!(catalog.find_course(&CourseId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lecture_ids_are_ordered_by_index() {
        let catalog = InMemoryCatalog::new();
        let c = course();
        let second = lecture(c.id, 2);
        let first = lecture(c.id, 1);
        catalog.add_course(c.clone());
        catalog.add_lecture(second.clone());
        catalog.add_lecture(first.clone());
        catalog.add_lecture(lecture(CourseId::new(), 1));

        let ids = catalog.lecture_ids_for_course(&c.id).await.unwrap();
        assert_eq!(ids, vec![first.id, second.id]);
    }
}
