//! HandlePaymentWebhookHandler - provider-initiated confirmation path.
//!
//! Webhooks may be redelivered and may race the client verify call; the
//! shared settlement handler absorbs both. Only a signature failure rejects
//! the request; unknown event types and unresolvable references are
//! acknowledged so the provider does not build a retry backlog of traffic
//! we will never act on.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId};
use crate::domain::payment::{ProviderEvent, SignatureVerifier};
use crate::ports::PaymentRepository;

use super::settle_payment::SettlePaymentHandler;

/// Command carrying a raw webhook delivery.
#[derive(Debug, Clone)]
pub struct PaymentWebhookCommand {
    /// Raw request body, exactly as received (it is the signed message).
    pub body: Vec<u8>,
    /// Signature header value, if present.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentWebhookResult {
    /// A payment intent was settled (or found already settled).
    Settled { payment_id: PaymentId },
    /// Recognized event, but no intent could be resolved for it.
    Acknowledged,
    /// Unrecognized event type.
    Ignored,
}

/// Handler for provider webhook deliveries.
pub struct HandlePaymentWebhookHandler {
    payments: Arc<dyn PaymentRepository>,
    verifier: Arc<SignatureVerifier>,
    settlement: Arc<SettlePaymentHandler>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        verifier: Arc<SignatureVerifier>,
        settlement: Arc<SettlePaymentHandler>,
    ) -> Self {
        Self {
            payments,
            verifier,
            settlement,
        }
    }

    /// # Errors
    ///
    /// - `InvalidSignature` - the delivery is not authentic; it is dropped
    ///   with no side effect and the provider will retry per its own policy
    /// - `InvalidInput` - authentic but malformed body
    pub async fn handle(
        &self,
        cmd: PaymentWebhookCommand,
    ) -> Result<PaymentWebhookResult, DomainError> {
        if !self
            .verifier
            .verify_webhook(&cmd.body, cmd.signature.as_deref())
        {
            return Err(DomainError::new(
                ErrorCode::InvalidSignature,
                "Invalid webhook signature",
            ));
        }

        match ProviderEvent::parse(&cmd.body)? {
            ProviderEvent::PaymentCaptured {
                order_id,
                payment_id,
            } => {
                let Some(intent) = self.payments.find_by_order_id(&order_id).await? else {
                    tracing::warn!(order_id, "webhook for unknown order acknowledged");
                    return Ok(PaymentWebhookResult::Acknowledged);
                };
                self.settlement
                    .settle(&intent, payment_id.as_deref(), None)
                    .await?;
                Ok(PaymentWebhookResult::Settled {
                    payment_id: intent.id,
                })
            }
            ProviderEvent::PaymentLinkPaid {
                reference_id,
                payment_id,
            } => {
                let Some(intent_id) = reference_id.as_deref().and_then(parse_reference) else {
                    tracing::warn!(
                        reference_id = reference_id.as_deref().unwrap_or(""),
                        "payment link webhook without usable reference acknowledged"
                    );
                    return Ok(PaymentWebhookResult::Acknowledged);
                };
                let Some(intent) = self.payments.find_by_id(&intent_id).await? else {
                    return Ok(PaymentWebhookResult::Acknowledged);
                };
                self.settlement
                    .settle(&intent, payment_id.as_deref(), None)
                    .await?;
                Ok(PaymentWebhookResult::Settled {
                    payment_id: intent.id,
                })
            }
            ProviderEvent::Unrecognized(event) => {
                tracing::debug!(event, "unrecognized webhook event acknowledged");
                Ok(PaymentWebhookResult::Ignored)
            }
        }
    }
}

/// Payment links are created with the intent id as their reference.
fn parse_reference(reference_id: &str) -> Option<PaymentId> {
    reference_id.parse().ok()
}
