//! PaymentIntent persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EnrollmentId, PaymentId};
use crate::domain::payment::PaymentIntent;

/// Persistent storage for PaymentIntent aggregates.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn save(&self, intent: &PaymentIntent) -> Result<(), DomainError>;

    async fn update(&self, intent: &PaymentIntent) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<PaymentIntent>, DomainError>;

    /// Looks up the intent carrying the given provider order id.
    async fn find_by_order_id(&self, order_id: &str)
        -> Result<Option<PaymentIntent>, DomainError>;

    /// Looks up the open intent linked to an enrollment, if any.
    async fn find_by_enrollment(
        &self,
        enrollment_id: &EnrollmentId,
    ) -> Result<Option<PaymentIntent>, DomainError>;

    /// Atomically flips the intent from `created` to `paid`, recording the
    /// supplied provider identifiers.
    ///
    /// Returns `true` for exactly one caller per intent: the implementation
    /// must perform a conditional update (`status = 'paid' WHERE status =
    /// 'created'`, affected-rows check) or hold an equivalent row lock, so a
    /// racing webhook and client verify cannot both win. Callers that
    /// receive `false` treat the confirmation as an idempotent no-op.
    async fn claim_created(
        &self,
        id: &PaymentId,
        provider_payment_id: Option<&str>,
        provider_signature: Option<&str>,
    ) -> Result<bool, DomainError>;
}
