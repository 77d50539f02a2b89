//! PlayLectureHandler - issues a signed playback URL for a lecture.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, LectureId, Timestamp, UserId};
use crate::domain::media::VideoTokenService;
use crate::ports::{CatalogReader, EnrollmentRepository, UserDirectory};

/// Playback settings shared by all play requests.
#[derive(Debug, Clone)]
pub struct PlaybackSettings {
    /// Public base URL the signed stream URL is built on.
    pub public_base_url: String,
    /// Token lifetime in seconds.
    pub token_ttl_secs: i64,
}

/// Response for a play request.
///
/// The signed URL is a bearer credential for a fixed window; it must not be
/// cached or logged by intermediaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayResponse {
    pub signed_url: String,
    pub watermark_text: String,
    pub watermark_course: String,
    pub expires_in: i64,
}

/// Handler for play requests.
pub struct PlayLectureHandler {
    catalog: Arc<dyn CatalogReader>,
    enrollments: Arc<dyn EnrollmentRepository>,
    users: Arc<dyn UserDirectory>,
    tokens: Arc<VideoTokenService>,
    settings: PlaybackSettings,
}

impl PlayLectureHandler {
    pub fn new(
        catalog: Arc<dyn CatalogReader>,
        enrollments: Arc<dyn EnrollmentRepository>,
        users: Arc<dyn UserDirectory>,
        tokens: Arc<VideoTokenService>,
        settings: PlaybackSettings,
    ) -> Self {
        Self {
            catalog,
            enrollments,
            users,
            tokens,
            settings,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` - lecture absent
    /// - `Forbidden` - no currently-valid enrollment
    /// - `InvalidInput` - lecture has no uploaded video
    pub async fn handle(
        &self,
        student_id: UserId,
        lecture_id: LectureId,
    ) -> Result<PlayResponse, DomainError> {
        let lecture = self
            .catalog
            .find_lecture(&lecture_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Lecture"))?;

        let enrolled = self
            .enrollments
            .find_by_student_and_course(&student_id, &lecture.course_id)
            .await?
            .map(|e| e.has_access())
            .unwrap_or(false);
        if !enrolled {
            return Err(DomainError::new(ErrorCode::Forbidden, "Not enrolled"));
        }

        if lecture.video_key.is_none() {
            return Err(DomainError::new(
                ErrorCode::InvalidInput,
                "Video not uploaded",
            ));
        }

        let course_title = self
            .catalog
            .find_course(&lecture.course_id)
            .await?
            .map(|c| c.title)
            .unwrap_or_else(|| "Course".to_string());

        let watermark_text = match self.users.find_by_id(&student_id).await? {
            Some(account) => format!(
                "{} | {} UTC",
                account.email,
                Timestamp::now().as_datetime().format("%Y-%m-%d %H:%M:%S")
            ),
            None => format!(
                "{} | {} UTC",
                student_id,
                Timestamp::now().as_datetime().format("%Y-%m-%d %H:%M:%S")
            ),
        };

        let token = self
            .tokens
            .issue(lecture_id, student_id, self.settings.token_ttl_secs);
        Ok(PlayResponse {
            signed_url: format!(
                "{}/media/stream/{}?token={}",
                self.settings.public_base_url, lecture_id, token
            ),
            watermark_text,
            watermark_course: course_title,
            expires_in: self.settings.token_ttl_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::media::test_support::{seed_student, MediaFixture};

    #[tokio::test]
    async fn play_returns_signed_url_and_watermark() {
        let fx = MediaFixture::new();
        let student = seed_student(&fx);
        fx.enroll_active(student).await;

        let response = fx
            .play_handler()
            .handle(student, fx.lecture_id)
            .await
            .unwrap();

        assert!(response
            .signed_url
            .starts_with(&format!("http://localhost:8080/media/stream/{}?token=", fx.lecture_id)));
        assert!(response.watermark_text.contains("arjun@example.com"));
        assert_eq!(response.watermark_course, "Still Life Painting");
        assert_eq!(response.expires_in, 900);

        // The embedded token verifies against the same service
        let token = response.signed_url.split("token=").nth(1).unwrap();
        let claims = fx.tokens.verify(token).unwrap();
        assert_eq!(claims.lecture_id, fx.lecture_id);
        assert_eq!(claims.user_id, student);
    }

    #[tokio::test]
    async fn play_without_enrollment_is_forbidden() {
        let fx = MediaFixture::new();
        let student = seed_student(&fx);

        let result = fx.play_handler().handle(student, fx.lecture_id).await;
        assert_eq!(result.unwrap_err().code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn play_of_unknown_lecture_is_not_found() {
        let fx = MediaFixture::new();
        let student = seed_student(&fx);
        fx.enroll_active(student).await;

        let result = fx.play_handler().handle(student, LectureId::new()).await;
        assert_eq!(result.unwrap_err().code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn play_without_video_is_invalid_input() {
        let fx = MediaFixture::without_video();
        let student = seed_student(&fx);
        fx.enroll_active(student).await;

        let result = fx.play_handler().handle(student, fx.lecture_id).await;
        assert_eq!(result.unwrap_err().code, ErrorCode::InvalidInput);
    }
}
