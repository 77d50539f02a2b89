//! HTTP handlers for payment confirmation endpoints.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::auth::RequireStudent;
use crate::adapters::http::state::AppState;
use crate::application::handlers::enrollment::{ConfirmPaymentCommand, PaymentWebhookCommand};

use super::dto::{AckResponse, VerifyRequest};

/// Header carrying the provider's webhook signature.
const SIGNATURE_HEADER: &str = "X-Razorpay-Signature";

/// POST /api/payments/verify
pub async fn verify_payment(
    State(state): State<AppState>,
    RequireStudent(_user): RequireStudent,
    Json(body): Json<VerifyRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    state
        .confirm_payment_handler()
        .handle(ConfirmPaymentCommand {
            order_id: body.order_id,
            payment_id: body.payment_id,
            signature: body.signature,
        })
        .await?;
    Ok(Json(AckResponse::ok()))
}

/// POST /api/payments/webhook
///
/// No user authentication: authenticity comes from the body signature.
/// The body is taken raw because the signature covers the exact bytes.
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AckResponse>, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    state
        .payment_webhook_handler()
        .handle(PaymentWebhookCommand {
            body: body.to_vec(),
            signature,
        })
        .await?;
    Ok(Json(AckResponse::ok()))
}
