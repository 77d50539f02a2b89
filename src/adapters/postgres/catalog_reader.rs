//! PostgreSQL implementation of CatalogReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{Course, Lecture};
use crate::domain::foundation::{CourseId, DomainError, LectureId, OrganizationId, Timestamp};
use crate::ports::CatalogReader;

use super::map_db_error;

/// sqlx-backed read access to courses and lectures.
pub struct PostgresCatalogReader {
    pool: PgPool,
}

impl PostgresCatalogReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CourseRow {
    id: Uuid,
    organization_id: Option<Uuid>,
    title: String,
    description: Option<String>,
    level: String,
    price: i64,
    created_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: CourseId::from_uuid(row.id),
            organization_id: row.organization_id.map(OrganizationId::from_uuid),
            title: row.title,
            description: row.description,
            level: row.level,
            price: row.price,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LectureRow {
    id: Uuid,
    course_id: Uuid,
    title: String,
    video_key: Option<String>,
    duration_secs: i64,
    order_index: i32,
}

impl From<LectureRow> for Lecture {
    fn from(row: LectureRow) -> Self {
        Lecture {
            id: LectureId::from_uuid(row.id),
            course_id: CourseId::from_uuid(row.course_id),
            title: row.title,
            video_key: row.video_key,
            duration_secs: row.duration_secs,
            order_index: row.order_index,
        }
    }
}

#[async_trait]
impl CatalogReader for PostgresCatalogReader {
    async fn find_course(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        let row: Option<CourseRow> = sqlx::query_as(
            "SELECT id, organization_id, title, description, level, price, created_at
             FROM courses WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(row.map(Course::from))
    }

    async fn find_lecture(&self, id: &LectureId) -> Result<Option<Lecture>, DomainError> {
        let row: Option<LectureRow> = sqlx::query_as(
            "SELECT id, course_id, title, video_key, duration_secs, order_index
             FROM lectures WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(row.map(Lecture::from))
    }

    async fn lecture_ids_for_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<LectureId>, DomainError> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT id FROM lectures WHERE course_id = $1 ORDER BY order_index ASC",
        )
        .bind(course_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;
        Ok(ids.into_iter().map(LectureId::from_uuid).collect())
    }
}
