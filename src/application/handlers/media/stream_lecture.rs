//! StreamLectureHandler - token-gated video delivery.
//!
//! Token validity alone is not sufficient: the enrollment is re-checked at
//! request time, so revoking an enrollment cuts off access on the next
//! stream request even while issued tokens are still fresh.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, LectureId};
use crate::domain::media::VideoTokenService;
use crate::ports::{ArtifactStorage, CatalogReader, EnrollmentRepository};

/// A streamable video payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoStream {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Handler for stream requests.
pub struct StreamLectureHandler {
    catalog: Arc<dyn CatalogReader>,
    enrollments: Arc<dyn EnrollmentRepository>,
    tokens: Arc<VideoTokenService>,
    storage: Arc<dyn ArtifactStorage>,
}

impl StreamLectureHandler {
    pub fn new(
        catalog: Arc<dyn CatalogReader>,
        enrollments: Arc<dyn EnrollmentRepository>,
        tokens: Arc<VideoTokenService>,
        storage: Arc<dyn ArtifactStorage>,
    ) -> Self {
        Self {
            catalog,
            enrollments,
            tokens,
            storage,
        }
    }

    /// # Errors
    ///
    /// - `Forbidden` - token invalid, expired, bound to another lecture, or
    ///   the enrollment is no longer valid
    /// - `NotFound` - lecture or its video file absent
    pub async fn handle(
        &self,
        lecture_id: LectureId,
        token: &str,
    ) -> Result<VideoStream, DomainError> {
        let claims = self
            .tokens
            .verify(token)
            .filter(|c| c.lecture_id == lecture_id)
            .ok_or_else(|| DomainError::new(ErrorCode::Forbidden, "Invalid token"))?;

        let lecture = self
            .catalog
            .find_lecture(&lecture_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Video"))?;
        let video_key = lecture
            .video_key
            .ok_or_else(|| DomainError::not_found("Video"))?;

        let enrolled = self
            .enrollments
            .find_by_student_and_course(&claims.user_id, &lecture.course_id)
            .await?
            .map(|e| e.has_access())
            .unwrap_or(false);
        if !enrolled {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Enrollment required",
            ));
        }

        let bytes = self
            .storage
            .load(&video_key)
            .await?
            .ok_or_else(|| DomainError::not_found("Video file"))?;

        let filename = video_key
            .rsplit('/')
            .next()
            .unwrap_or(video_key.as_str())
            .to_string();
        Ok(VideoStream { filename, bytes })
    }
}
