//! In-memory ProgressRepository.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LectureId, UserId};
use crate::domain::progress::LectureProgress;
use crate::ports::ProgressRepository;

/// Mutex-guarded in-memory progress store.
#[derive(Default)]
pub struct InMemoryProgressRepository {
    records: Mutex<Vec<LectureProgress>>,
}

impl InMemoryProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn upsert(&self, progress: &LectureProgress) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| {
            r.student_id == progress.student_id && r.lecture_id == progress.lecture_id
        }) {
            Some(existing) => *existing = progress.clone(),
            None => records.push(progress.clone()),
        }
        Ok(())
    }

    async fn find_by_student_and_lecture(
        &self,
        student_id: &UserId,
        lecture_id: &LectureId,
    ) -> Result<Option<LectureProgress>, DomainError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|r| &r.student_id == student_id && &r.lecture_id == lecture_id)
            .cloned())
    }

    async fn count_completed(
        &self,
        student_id: &UserId,
        lecture_ids: &[LectureId],
    ) -> Result<usize, DomainError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| {
                &r.student_id == student_id && r.completed && lecture_ids.contains(&r.lecture_id)
            })
            .count())
    }
}
