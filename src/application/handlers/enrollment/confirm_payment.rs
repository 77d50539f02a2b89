//! ConfirmPaymentHandler - client-initiated payment confirmation.
//!
//! After an embedded checkout completes, the client submits the provider's
//! (order id, payment id, signature) triple. The signature proves the
//! provider really issued this confirmation; settlement itself is shared
//! with the webhook path and idempotent.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::payment::SignatureVerifier;
use crate::ports::PaymentRepository;

use super::settle_payment::SettlePaymentHandler;

/// Command carrying a client-submitted checkout confirmation.
#[derive(Debug, Clone)]
pub struct ConfirmPaymentCommand {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Handler for the client verify path.
pub struct ConfirmPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    verifier: Arc<SignatureVerifier>,
    settlement: Arc<SettlePaymentHandler>,
}

impl ConfirmPaymentHandler {
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
    /// - `NotFound` - no intent carries this order id
    /// - `InvalidSignature` - the confirmation signature does not verify
    pub async fn handle(&self, cmd: ConfirmPaymentCommand) -> Result<(), DomainError> {
        let intent = self
            .payments
            .find_by_order_id(&cmd.order_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment"))?;

        if !self
            .verifier
            .verify_checkout(&cmd.order_id, &cmd.payment_id, &cmd.signature)
        {
            return Err(DomainError::new(
                ErrorCode::InvalidSignature,
                "Invalid payment signature",
            ));
        }

        self.settlement
            .settle(&intent, Some(&cmd.payment_id), Some(&cmd.signature))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryEnrollmentRepository, InMemoryPaymentRepository, InMemoryUserDirectory,
    };
    use crate::domain::enrollment::{Enrollment, EnrollmentStatus};
    use crate::domain::foundation::{CourseId, UserId};
    use crate::domain::payment::{compute_test_signature, PaymentIntent, PaymentPurpose};
    use crate::ports::EnrollmentRepository;

    const KEY_SECRET: &str = "rzp_secret_confirm_test";

    struct Fixture {
        payments: Arc<InMemoryPaymentRepository>,
        enrollments: Arc<InMemoryEnrollmentRepository>,
        handler: ConfirmPaymentHandler,
    }

    fn fixture() -> Fixture {
        let payments: Arc<InMemoryPaymentRepository> =
            Arc::new(InMemoryPaymentRepository::new());
        let enrollments = Arc::new(InMemoryEnrollmentRepository::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let settlement = Arc::new(SettlePaymentHandler::new(
            payments.clone(),
            enrollments.clone(),
            users,
        ));
        let verifier = Arc::new(SignatureVerifier::new(KEY_SECRET, None, false));
        let handler = ConfirmPaymentHandler::new(payments.clone(), verifier, settlement);
        Fixture {
            payments,
            enrollments,
            handler,
        }
    }

    async fn open_checkout(fx: &Fixture) -> (Enrollment, PaymentIntent) {
        let enrollment = Enrollment::new(UserId::new(), CourseId::new(), None, true);
        fx.enrollments.save(&enrollment).await.unwrap();

        let mut intent = PaymentIntent::new(
            PaymentPurpose::CourseEnrollment {
                enrollment_id: enrollment.id,
                course_id: enrollment.course_id,
            },
            None,
            500,
            "INR",
            10,
        );
        intent.attach_order("order_c1");
        fx.payments.save(&intent).await.unwrap();
        (enrollment, intent)
    }

    fn signed_command(order_id: &str, payment_id: &str) -> ConfirmPaymentCommand {
        let message = format!("{}|{}", order_id, payment_id);
        ConfirmPaymentCommand {
            order_id: order_id.to_string(),
            payment_id: payment_id.to_string(),
            signature: compute_test_signature(KEY_SECRET, message.as_bytes()),
        }
    }

    #[tokio::test]
    async fn valid_confirmation_settles_and_activates() {
        let fx = fixture();
        let (enrollment, intent) = open_checkout(&fx).await;

        fx.handler
            .handle(signed_command("order_c1", "pay_c1"))
            .await
            .unwrap();

        let paid = fx.payments.find_by_id(&intent.id).await.unwrap().unwrap();
        assert!(paid.is_paid());
        assert_eq!(paid.provider_signature.as_deref().map(|s| s.len()), Some(64));
        let stored = fx.enrollments.find_by_id(&enrollment.id).await.unwrap().unwrap();
        assert_eq!(stored.status, EnrollmentStatus::Active);
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let fx = fixture();
        let result = fx.handler.handle(signed_command("order_ghost", "pay_1")).await;
        assert_eq!(result.unwrap_err().code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn bad_signature_is_rejected_without_side_effects() {
        let fx = fixture();
        let (enrollment, intent) = open_checkout(&fx).await;

        let cmd = ConfirmPaymentCommand {
            order_id: "order_c1".to_string(),
            payment_id: "pay_c1".to_string(),
            signature: "0".repeat(64),
        };
        let result = fx.handler.handle(cmd).await;

        assert_eq!(result.unwrap_err().code, ErrorCode::InvalidSignature);
        let stored_intent = fx.payments.find_by_id(&intent.id).await.unwrap().unwrap();
        assert!(!stored_intent.is_paid());
        let stored = fx.enrollments.find_by_id(&enrollment.id).await.unwrap().unwrap();
        assert_eq!(stored.status, EnrollmentStatus::PendingPayment);
    }

    #[tokio::test]
    async fn replayed_confirmation_is_accepted_as_no_op() {
        let fx = fixture();
        let (_, intent) = open_checkout(&fx).await;
        let cmd = signed_command("order_c1", "pay_c1");

        fx.handler.handle(cmd.clone()).await.unwrap();
        fx.handler.handle(cmd).await.unwrap();

        let paid = fx.payments.find_by_id(&intent.id).await.unwrap().unwrap();
        assert!(paid.is_paid());
        assert_eq!(paid.provider_payment_id.as_deref(), Some("pay_c1"));
    }
}
