//! PostgreSQL implementation of ProgressRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, LectureId, Timestamp, UserId};
use crate::domain::progress::LectureProgress;
use crate::ports::ProgressRepository;

use super::map_db_error;

/// sqlx-backed lecture progress store.
pub struct PostgresProgressRepository {
    pool: PgPool,
}

impl PostgresProgressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProgressRow {
    id: Uuid,
    student_id: Uuid,
    lecture_id: Uuid,
    watched_seconds: i64,
    completed: bool,
    completed_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl From<ProgressRow> for LectureProgress {
    fn from(row: ProgressRow) -> Self {
        LectureProgress {
            id: row.id,
            student_id: UserId::from_uuid(row.student_id),
            lecture_id: LectureId::from_uuid(row.lecture_id),
            watched_seconds: row.watched_seconds,
            completed: row.completed,
            completed_at: row.completed_at.map(Timestamp::from_datetime),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[async_trait]
impl ProgressRepository for PostgresProgressRepository {
    async fn upsert(&self, progress: &LectureProgress) -> Result<(), DomainError> {
        // The monotonic clamp is also enforced here with GREATEST, so a
        // stale writer can never shrink a concurrently grown value
        sqlx::query(
            r#"
            INSERT INTO lecture_progress
                (id, student_id, lecture_id, watched_seconds, completed, completed_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (student_id, lecture_id) DO UPDATE
            SET watched_seconds = GREATEST(lecture_progress.watched_seconds, EXCLUDED.watched_seconds),
                completed = lecture_progress.completed OR EXCLUDED.completed,
                completed_at = COALESCE(lecture_progress.completed_at, EXCLUDED.completed_at),
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(progress.id)
        .bind(progress.student_id.as_uuid())
        .bind(progress.lecture_id.as_uuid())
        .bind(progress.watched_seconds)
        .bind(progress.completed)
        .bind(progress.completed_at.as_ref().map(|t| *t.as_datetime()))
        .bind(progress.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(())
    }

    async fn find_by_student_and_lecture(
        &self,
        student_id: &UserId,
        lecture_id: &LectureId,
    ) -> Result<Option<LectureProgress>, DomainError> {
        let row: Option<ProgressRow> = sqlx::query_as(
            "SELECT id, student_id, lecture_id, watched_seconds, completed, completed_at, updated_at
             FROM lecture_progress WHERE student_id = $1 AND lecture_id = $2",
        )
        .bind(student_id.as_uuid())
        .bind(lecture_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(row.map(LectureProgress::from))
    }

    async fn count_completed(
        &self,
        student_id: &UserId,
        lecture_ids: &[LectureId],
    ) -> Result<usize, DomainError> {
        let ids: Vec<Uuid> = lecture_ids.iter().map(|l| *l.as_uuid()).collect();
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM lecture_progress
             WHERE student_id = $1 AND completed AND lecture_id = ANY($2)",
        )
        .bind(student_id.as_uuid())
        .bind(&ids)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(count as usize)
    }
}
