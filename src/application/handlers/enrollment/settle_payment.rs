//! SettlePaymentHandler - applies a confirmed payment exactly once.
//!
//! Both confirmation paths (client verify and provider webhook) end here.
//! The repository's conditional claim is the arbiter under concurrency: of
//! any number of racing confirmations for one intent, exactly one performs
//! the purpose side effect; the rest observe an idempotent no-op.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::payment::{PaymentIntent, SettlementEffect};
use crate::ports::{EnrollmentRepository, PaymentRepository, UserDirectory};

/// Result of a settlement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// This call performed the transition and applied the side effect.
    Settled,

    /// The intent was already paid; nothing changed.
    AlreadyPaid,
}

/// Handler that settles a payment intent.
pub struct SettlePaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    users: Arc<dyn UserDirectory>,
}

impl SettlePaymentHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            payments,
            enrollments,
            users,
        }
    }

    /// Settles `intent`, storing any supplied provider identifiers.
    pub async fn settle(
        &self,
        intent: &PaymentIntent,
        provider_payment_id: Option<&str>,
        provider_signature: Option<&str>,
    ) -> Result<SettlementOutcome, DomainError> {
        if intent.is_paid() {
            return Ok(SettlementOutcome::AlreadyPaid);
        }

        let claimed = self
            .payments
            .claim_created(&intent.id, provider_payment_id, provider_signature)
            .await?;
        if !claimed {
            // A concurrent confirmation won the claim
            return Ok(SettlementOutcome::AlreadyPaid);
        }

        self.apply_effect(intent).await?;

        tracing::info!(
            payment_id = %intent.id,
            purpose = intent.purpose.as_str(),
            "payment settled"
        );
        Ok(SettlementOutcome::Settled)
    }

    async fn apply_effect(&self, intent: &PaymentIntent) -> Result<(), DomainError> {
        match intent.purpose.settlement_effect() {
            SettlementEffect::ActivateEnrollment(enrollment_id) => {
                let Some(mut enrollment) = self.enrollments.find_by_id(&enrollment_id).await?
                else {
                    tracing::warn!(
                        payment_id = %intent.id,
                        enrollment_id = %enrollment_id,
                        "paid intent references a missing enrollment"
                    );
                    return Ok(());
                };
                if enrollment.has_access() {
                    return Ok(());
                }
                enrollment.activate()?;
                self.enrollments.update(&enrollment).await
            }
            SettlementEffect::ActivateUser(user_id) => {
                match self.users.activate(&user_id).await {
                    Ok(()) => Ok(()),
                    Err(err) if err.code == ErrorCode::NotFound => {
                        tracing::warn!(
                            payment_id = %intent.id,
                            user_id = %user_id,
                            "paid intent references a missing user"
                        );
                        Ok(())
                    }
                    Err(err) => Err(err),
                }
            }
        }
    }
}
