//! Axum router for payment endpoints.

use axum::routing::post;
use axum::Router;

use crate::adapters::http::state::AppState;

use super::handlers::{payment_webhook, verify_payment};

/// Payment routes, mounted under `/api/payments`.
///
/// - `POST /verify` - client-submitted checkout confirmation (student auth)
/// - `POST /webhook` - provider webhook (signature-verified, no user auth)
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/verify", post(verify_payment))
        .route("/webhook", post(payment_webhook))
}
