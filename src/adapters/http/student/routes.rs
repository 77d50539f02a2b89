//! Axum router for student endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::state::AppState;

use super::handlers::{
    complete_lecture, download_certificate, enroll, list_certificates, play_lecture,
    update_progress,
};

/// Student API routes, mounted under `/api`.
///
/// All routes require an authenticated, active student.
///
/// - `POST /courses/:course_id/enroll` - enroll (or resume checkout)
/// - `POST /lectures/:lecture_id/progress` - report watch progress
/// - `POST /lectures/:lecture_id/complete` - force-complete a lecture
/// - `GET  /lectures/:lecture_id/play` - obtain a signed playback URL
/// - `GET  /certificates` - list own certificates
/// - `GET  /certificates/:certificate_id/download` - download artifact
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/courses/:course_id/enroll", post(enroll))
        .route("/lectures/:lecture_id/progress", post(update_progress))
        .route("/lectures/:lecture_id/complete", post(complete_lecture))
        .route("/lectures/:lecture_id/play", get(play_lecture))
        .route("/certificates", get(list_certificates))
        .route("/certificates/:certificate_id/download", get(download_certificate))
}
