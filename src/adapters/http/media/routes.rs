//! Axum router for media delivery.

use axum::routing::get;
use axum::Router;

use crate::adapters::http::state::AppState;

use super::handlers::stream_lecture;

/// Media routes, mounted under `/media`.
///
/// - `GET /stream/:lecture_id` - token-gated video delivery
pub fn media_routes() -> Router<AppState> {
    Router::new().route("/stream/:lecture_id", get(stream_lecture))
}
