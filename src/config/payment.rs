//! Payment configuration (Razorpay).

use serde::Deserialize;

use super::error::ValidationError;

/// Payment provider configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Provider public key id. Empty means payments are not configured.
    #[serde(default)]
    pub key_id: String,

    /// Provider API key secret.
    #[serde(default)]
    pub key_secret: String,

    /// Webhook signing secret.
    #[serde(default)]
    pub webhook_secret: Option<String>,

    /// Explicit opt-in for accepting unsigned webhooks when no webhook
    /// secret is configured. Never enable outside local development.
    #[serde(default)]
    pub allow_unverified_webhooks: bool,

    /// Platform commission percentage on course payments.
    #[serde(default = "default_commission_pct")]
    pub commission_pct: i64,

    /// Admin seat subscription price in whole currency units.
    #[serde(default = "default_admin_seat_price")]
    pub admin_seat_price: i64,

    /// Currency code passed through to the provider.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_commission_pct() -> i64 {
    10
}

fn default_admin_seat_price() -> i64 {
    11000
}

fn default_currency() -> String {
    "INR".to_string()
}

impl PaymentConfig {
    /// True when provider API keys are present.
    pub fn is_configured(&self) -> bool {
        !self.key_id.is_empty() && !self.key_secret.is_empty()
    }

    pub fn validate(&self, is_production: bool) -> Result<(), ValidationError> {
        if !(0..=100).contains(&self.commission_pct) {
            return Err(ValidationError::invalid(
                "payment.commission_pct",
                "must be between 0 and 100",
            ));
        }
        if self.admin_seat_price < 0 {
            return Err(ValidationError::invalid(
                "payment.admin_seat_price",
                "must not be negative",
            ));
        }
        if is_production {
            if !self.is_configured() {
                return Err(ValidationError::MissingRequired("PAYMENT_KEY_ID"));
            }
            if self.allow_unverified_webhooks {
                return Err(ValidationError::invalid(
                    "payment.allow_unverified_webhooks",
                    "must not be enabled in production",
                ));
            }
            if self.webhook_secret.as_deref().unwrap_or("").is_empty() {
                return Err(ValidationError::MissingRequired("PAYMENT_WEBHOOK_SECRET"));
            }
        }
        Ok(())
    }
}
