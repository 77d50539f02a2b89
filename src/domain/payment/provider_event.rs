//! Provider webhook event model.
//!
//! Parses the provider's webhook payload into the events the settlement
//! path understands. Unknown event types parse successfully into
//! [`ProviderEvent::Unrecognized`] so the boundary can acknowledge them;
//! rejecting unknown traffic would break forward compatibility with
//! provider additions.

use serde::Deserialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// A recognized (or explicitly unrecognized) provider webhook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// A payment against an order was captured or authorized.
    PaymentCaptured {
        order_id: String,
        payment_id: Option<String>,
    },

    /// A payment link was paid. `reference_id` carries the intent id the
    /// link was created with.
    PaymentLinkPaid {
        reference_id: Option<String>,
        payment_id: Option<String>,
    },

    /// Any other event type. Acknowledged, never acted on.
    Unrecognized(String),
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    event: String,
    #[serde(default)]
    payload: RawPayload,
}

#[derive(Debug, Default, Deserialize)]
struct RawPayload {
    #[serde(default)]
    payment: Option<RawEntity<RawPaymentEntity>>,
    #[serde(default)]
    payment_link: Option<RawEntity<RawPaymentLinkEntity>>,
}

#[derive(Debug, Deserialize)]
struct RawEntity<T> {
    entity: T,
}

#[derive(Debug, Deserialize)]
struct RawPaymentEntity {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    order_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPaymentLinkEntity {
    #[serde(default)]
    reference_id: Option<String>,
}

impl ProviderEvent {
    /// Parses a webhook body. Call only after signature verification.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the body is not valid JSON of the expected
    /// envelope shape.
    pub fn parse(body: &[u8]) -> Result<Self, DomainError> {
        let raw: RawEvent = serde_json::from_slice(body).map_err(|e| {
            DomainError::new(ErrorCode::InvalidInput, format!("Malformed webhook body: {}", e))
        })?;

        let payment_id = raw
            .payload
            .payment
            .as_ref()
            .and_then(|p| p.entity.id.clone());

        match raw.event.as_str() {
            "payment.captured" | "payment.authorized" => {
                let order_id = raw
                    .payload
                    .payment
                    .as_ref()
                    .and_then(|p| p.entity.order_id.clone());
                match order_id {
                    Some(order_id) => Ok(ProviderEvent::PaymentCaptured {
                        order_id,
                        payment_id,
                    }),
                    // Captured payment without an order reference: nothing to
                    // settle against
                    None => Ok(ProviderEvent::Unrecognized(raw.event)),
                }
            }
            "payment_link.paid" => {
                let reference_id = raw
                    .payload
                    .payment_link
                    .and_then(|l| l.entity.reference_id);
                Ok(ProviderEvent::PaymentLinkPaid {
                    reference_id,
                    payment_id,
                })
            }
            _ => Ok(ProviderEvent::Unrecognized(raw.event)),
        }
    }
}
