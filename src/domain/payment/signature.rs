//! Payment signature verification.
//!
//! Implements verification of provider-signed payloads using HMAC-SHA256
//! with constant-time comparison. Two message forms exist:
//!
//! - **Webhook**: the raw request body, signed with the webhook secret and
//!   delivered in a header as a hex digest.
//! - **Checkout confirmation**: `"{order_id}|{payment_id}"`, signed with the
//!   provider key secret and submitted by the client after checkout.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifier for provider payment signatures.
pub struct SignatureVerifier {
    /// Provider key secret, used for client-submitted checkout confirmations.
    key_secret: String,

    /// Webhook signing secret. `None` means no secret is configured.
    webhook_secret: Option<String>,

    /// Explicit opt-in for accepting unsigned webhooks when no secret is
    /// configured. Off by default: an unconfigured secret fails closed.
    allow_unverified_webhooks: bool,
}

impl SignatureVerifier {
    pub fn new(
        key_secret: impl Into<String>,
        webhook_secret: Option<String>,
        allow_unverified_webhooks: bool,
    ) -> Self {
        Self {
            key_secret: key_secret.into(),
            webhook_secret,
            allow_unverified_webhooks,
        }
    }

    /// Verifies a webhook signature over the raw request body.
    ///
    /// With no webhook secret configured this fails unless
    /// `allow_unverified_webhooks` was explicitly enabled. That permissive
    /// mode exists for local development only; running it in production
    /// accepts any payload as authentic.
    pub fn verify_webhook(&self, body: &[u8], signature: Option<&str>) -> bool {
        let secret = match &self.webhook_secret {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                if self.allow_unverified_webhooks {
                    tracing::warn!("accepting webhook without signature verification");
                    return true;
                }
                return false;
            }
        };
        let Some(signature) = signature else {
            return false;
        };
        verify_hex_digest(secret, body, signature)
    }

    /// Verifies a client-submitted checkout confirmation signature.
    ///
    /// Message form is `"{order_id}|{payment_id}"` with a literal separator.
    pub fn verify_checkout(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        let message = format!("{}|{}", order_id, payment_id);
        verify_hex_digest(&self.key_secret, message.as_bytes(), signature)
    }
}

/// Computes HMAC-SHA256 over `message` and compares the hex digest to the
/// candidate in constant time.
fn verify_hex_digest(secret: &str, message: &[u8], candidate: &str) -> bool {
    let Ok(candidate_bytes) = hex::decode(candidate) else {
        return false;
    };
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message);
    let expected = mac.finalize().into_bytes();
    constant_time_compare(&expected, &candidate_bytes)
}

/// Performs constant-time comparison of two byte slices.
///
/// This prevents timing attacks that could leak information about the
/// expected signature.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes an HMAC-SHA256 hex digest for use in test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, message: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}
