//! Payment ledger: intents, signatures, and provider webhook events.

mod intent;
mod provider_event;
mod signature;

pub use intent::{PaymentIntent, PaymentPurpose, PaymentStatus, SettlementEffect};
pub use provider_event::ProviderEvent;
pub use signature::SignatureVerifier;

#[cfg(test)]
pub use signature::compute_test_signature;
