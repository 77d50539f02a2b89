//! HTTP handlers for media delivery.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::domain::foundation::LectureId;

/// Query parameters of a stream request.
#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub token: String,
}

/// GET /media/stream/:lecture_id?token=...
///
/// The token is the only credential; enrollment validity is re-checked on
/// every request.
pub async fn stream_lecture(
    State(state): State<AppState>,
    Path(lecture_id): Path<LectureId>,
    Query(query): Query<StreamQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let stream = state
        .stream_lecture_handler()
        .handle(lecture_id, &query.token)
        .await?;
    let headers = [
        (header::CONTENT_TYPE, "video/mp4".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", stream.filename),
        ),
    ];
    Ok((headers, stream.bytes))
}
