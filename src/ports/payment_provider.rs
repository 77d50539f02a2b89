//! Payment provider port for external payment processing.
//!
//! Defines the contract for the payment gateway integration. The engine
//! uses two provider primitives: orders (embedded checkout) and payment
//! links (hosted checkout sent by email).
//!
//! # Design
//!
//! - **Gateway agnostic**: the interface carries no provider-specific types
//! - **No retries**: a failed call surfaces as an error to the caller; the
//!   enrollment it belongs to stays open for a later retry
//! - **Bounded latency**: implementations apply a request timeout so
//!   provider unavailability is a request-level failure, not a hang

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for the payment provider integration.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Creates a provider order for an embedded checkout.
    async fn create_order(&self, request: CreateOrderRequest)
        -> Result<ProviderOrder, ProviderError>;

    /// Creates a hosted payment link.
    async fn create_payment_link(
        &self,
        request: CreatePaymentLinkRequest,
    ) -> Result<ProviderPaymentLink, ProviderError>;
}

/// Request to create a provider order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Amount in whole currency units; the adapter converts to minor units.
    pub amount: i64,

    pub currency: String,

    /// Caller-side receipt reference.
    pub receipt: String,

    /// Free-form metadata echoed back by the provider.
    pub notes: serde_json::Value,
}

/// An order created at the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderOrder {
    /// Provider's order id.
    pub id: String,

    /// Amount in minor currency units, as the provider reports it.
    pub amount_minor: i64,

    pub currency: String,
}

/// Request to create a hosted payment link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentLinkRequest {
    pub amount: i64,

    pub currency: String,

    pub description: String,

    /// Reference id echoed back in the `payment_link.paid` webhook; carries
    /// the payment intent id.
    pub reference_id: String,

    pub customer_name: String,

    pub customer_email: String,

    pub customer_phone: Option<String>,

    pub notes: serde_json::Value,
}

/// A payment link created at the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderPaymentLink {
    /// Provider's payment-link id.
    pub id: String,

    /// URL for the customer to complete payment.
    pub url: String,
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Provider keys are not configured.
    #[error("Payment provider is not configured")]
    NotConfigured,

    /// Network failure or timeout reaching the provider.
    #[error("Payment provider unreachable: {0}")]
    Unreachable(String),

    /// The provider rejected the request.
    #[error("Payment provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The provider response could not be interpreted.
    #[error("Unexpected payment provider response: {0}")]
    UnexpectedResponse(String),
}

impl From<ProviderError> for DomainError {
    fn from(err: ProviderError) -> Self {
        DomainError::new(ErrorCode::UpstreamUnavailable, err.to_string())
    }
}
