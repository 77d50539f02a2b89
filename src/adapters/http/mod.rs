//! HTTP boundary: axum routers, handlers, DTOs, and extractors.

pub mod admin;
pub mod error;
pub mod media;
pub mod middleware;
pub mod payment;
pub mod state;
pub mod student;

use axum::Router;

use self::state::AppState;

/// Assembles the complete application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", student::student_routes())
        .nest("/api/payments", payment::payment_routes())
        .nest("/api/orgs", admin::admin_routes())
        .nest("/media", media::media_routes())
        .with_state(state)
}
