//! Enrollment orchestration: enroll, confirm, webhook, settle.

mod confirm_payment;
mod enroll;
mod handle_payment_webhook;
mod settle_payment;

pub use confirm_payment::{ConfirmPaymentCommand, ConfirmPaymentHandler};
pub use enroll::{CheckoutDetails, CheckoutSettings, EnrollCommand, EnrollHandler, EnrollmentResult};
pub use handle_payment_webhook::{
    HandlePaymentWebhookHandler, PaymentWebhookCommand, PaymentWebhookResult,
};
pub use settle_payment::{SettlePaymentHandler, SettlementOutcome};
