//! Axum router for super-admin endpoints.

use axum::routing::post;
use axum::Router;

use crate::adapters::http::state::AppState;

use super::handlers::create_admin;

/// Super-admin routes, mounted under `/api/orgs`.
///
/// - `POST /:org_id/admins` - provision an admin seat with a payment link
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/:org_id/admins", post(create_admin))
}
