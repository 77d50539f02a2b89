//! Razorpay payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Razorpay REST API.
//! Orders back the embedded checkout widget; payment links cover hosted
//! checkouts (admin seat subscriptions).
//!
//! # Security
//!
//! - API key secret held as `secrecy::SecretString`
//! - All calls authenticated with HTTP basic auth (key id / key secret)
//!
//! # Failure model
//!
//! Calls carry a bounded timeout. No retries happen here: failures surface
//! to the caller, which decides what survives (an enrollment awaiting
//! payment is kept, the HTTP request itself fails).

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ports::{
    CreateOrderRequest, CreatePaymentLinkRequest, PaymentProvider, ProviderError, ProviderOrder,
    ProviderPaymentLink,
};

/// Request timeout for provider calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Public key id (also embedded in the client checkout widget).
    key_id: String,

    /// API key secret.
    key_secret: SecretString,

    /// Base URL for the Razorpay API.
    api_base_url: String,
}

impl RazorpayConfig {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: SecretString::new(key_secret.into()),
            api_base_url: "https://api.razorpay.com/v1".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.key_id.is_empty() && !self.key_secret.expose_secret().is_empty()
    }
}

/// Razorpay payment provider adapter.
pub struct RazorpayClient {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    amount: i64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct PaymentLinkResponse {
    id: String,
    short_url: Option<String>,
    url: Option<String>,
}

impl RazorpayClient {
    pub fn new(config: RazorpayConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client builds with static configuration");
        Self {
            config,
            http_client,
        }
    }

    async fn post(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<reqwest::Response, ProviderError> {
        if !self.config.is_configured() {
            return Err(ProviderError::NotConfigured);
        }
        let url = format!("{}{}", self.config.api_base_url, path);
        let response = self
            .http_client
            .post(&url)
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            )
            .json(payload)
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl PaymentProvider for RazorpayClient {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<ProviderOrder, ProviderError> {
        let payload = serde_json::json!({
            "amount": request.amount * 100,
            "currency": request.currency,
            "receipt": request.receipt,
            "notes": request.notes,
        });
        let response = self.post("/orders", &payload).await?;
        let order: OrderResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::UnexpectedResponse(e.to_string()))?;
        Ok(ProviderOrder {
            id: order.id,
            amount_minor: order.amount,
            currency: order.currency,
        })
    }

    async fn create_payment_link(
        &self,
        request: CreatePaymentLinkRequest,
    ) -> Result<ProviderPaymentLink, ProviderError> {
        let payload = serde_json::json!({
            "amount": request.amount * 100,
            "currency": request.currency,
            "description": request.description,
            "reference_id": request.reference_id,
            "customer": {
                "name": request.customer_name,
                "email": request.customer_email,
                "contact": request.customer_phone,
            },
            "notify": {"sms": false, "email": true},
            "notes": request.notes,
        });
        let response = self.post("/payment_links", &payload).await?;
        let link: PaymentLinkResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::UnexpectedResponse(e.to_string()))?;
        let url = link
            .short_url
            .or(link.url)
            .ok_or_else(|| ProviderError::UnexpectedResponse("payment link without URL".into()))?;
        Ok(ProviderPaymentLink { id: link.id, url })
    }
}
