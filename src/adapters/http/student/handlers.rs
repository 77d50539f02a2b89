//! HTTP handlers for student endpoints.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::auth::RequireStudent;
use crate::adapters::http::state::AppState;
use crate::application::handlers::enrollment::EnrollCommand;
use crate::application::handlers::progress::{
    MarkLectureCompleteCommand, RecordProgressCommand,
};
use crate::domain::foundation::{CertificateId, CourseId, LectureId};

use super::dto::{
    CertificateSummary, CompleteResponse, EnrollResponse, ProgressResponse,
    ProgressUpdateRequest,
};

/// POST /api/courses/:course_id/enroll
pub async fn enroll(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Path(course_id): Path<CourseId>,
) -> Result<Json<EnrollResponse>, ApiError> {
    let result = state
        .enroll_handler()
        .handle(EnrollCommand {
            student_id: user.user_id,
            organization_id: user.organization_id,
            course_id,
        })
        .await?;
    Ok(Json(result.into()))
}

/// POST /api/lectures/:lecture_id/progress
pub async fn update_progress(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Path(lecture_id): Path<LectureId>,
    Json(body): Json<ProgressUpdateRequest>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let record = state
        .record_progress_handler()
        .handle(RecordProgressCommand {
            student_id: user.user_id,
            lecture_id,
            watched_seconds: body.watched_seconds,
        })
        .await?;
    Ok(Json(record.into()))
}

/// POST /api/lectures/:lecture_id/complete
pub async fn complete_lecture(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Path(lecture_id): Path<LectureId>,
) -> Result<Json<CompleteResponse>, ApiError> {
    let record = state
        .mark_lecture_complete_handler()
        .handle(MarkLectureCompleteCommand {
            student_id: user.user_id,
            lecture_id,
        })
        .await?;
    Ok(Json(CompleteResponse {
        completed: record.completed,
    }))
}

/// GET /api/lectures/:lecture_id/play
pub async fn play_lecture(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Path(lecture_id): Path<LectureId>,
) -> Result<impl IntoResponse, ApiError> {
    let response = state
        .play_lecture_handler()
        .handle(user.user_id, lecture_id)
        .await?;
    Ok(Json(response))
}

/// GET /api/certificates
pub async fn list_certificates(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
) -> Result<Json<Vec<CertificateSummary>>, ApiError> {
    let certificates = state
        .list_certificates_handler()
        .handle(&user.user_id)
        .await?;
    Ok(Json(
        certificates.into_iter().map(CertificateSummary::from).collect(),
    ))
}

/// GET /api/certificates/:certificate_id/download
pub async fn download_certificate(
    State(state): State<AppState>,
    RequireStudent(user): RequireStudent,
    Path(certificate_id): Path<CertificateId>,
) -> Result<impl IntoResponse, ApiError> {
    let download = state
        .download_certificate_handler()
        .handle(&user.user_id, &certificate_id)
        .await?;
    let headers = [
        (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download.filename),
        ),
    ];
    Ok((headers, download.bytes))
}
