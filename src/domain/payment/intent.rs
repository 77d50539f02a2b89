//! PaymentIntent aggregate entity.
//!
//! A PaymentIntent represents one attempt to collect money for a purpose,
//! independent of how many confirmation signals arrive for it. Intents are
//! never deleted; they are the durable audit trail.
//!
//! # Design Decisions
//!
//! - **Money in whole units**: amounts stored as i64 whole currency units;
//!   the provider checkout payload converts to minor units
//! - **`created → paid` exactly once**: repeated confirmations are no-ops;
//!   under concurrency the repository's conditional update is the arbiter
//! - **Purpose-keyed side effect**: what success triggers is derived from
//!   the purpose tag, never from the confirmation call site

use crate::domain::foundation::{
    CourseId, EnrollmentId, OrganizationId, PaymentId, StateMachine, Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

/// What a payment intent is collecting money for, and which entity its
/// success activates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "purpose", rename_all = "snake_case")]
pub enum PaymentPurpose {
    /// Unlocks a student's enrollment in a priced course.
    CourseEnrollment {
        enrollment_id: EnrollmentId,
        course_id: CourseId,
    },

    /// Activates an admin seat account.
    AdminSubscription { user_id: UserId },
}

impl PaymentPurpose {
    /// Wire representation of the purpose tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentPurpose::CourseEnrollment { .. } => "course_enrollment",
            PaymentPurpose::AdminSubscription { .. } => "admin_subscription",
        }
    }

    /// The side effect a successful payment must apply.
    ///
    /// Adding a purpose means adding a variant here and an effect arm in the
    /// settlement handler; confirmation handling itself never changes.
    pub fn settlement_effect(&self) -> SettlementEffect {
        match self {
            PaymentPurpose::CourseEnrollment { enrollment_id, .. } => {
                SettlementEffect::ActivateEnrollment(*enrollment_id)
            }
            PaymentPurpose::AdminSubscription { user_id } => {
                SettlementEffect::ActivateUser(*user_id)
            }
        }
    }
}

/// Side effect dispatched exactly once when an intent is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementEffect {
    ActivateEnrollment(EnrollmentId),
    ActivateUser(UserId),
}

/// Status of a payment intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Created,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Created => "created",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created" => Some(PaymentStatus::Created),
            "paid" => Some(PaymentStatus::Paid),
            _ => None,
        }
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (PaymentStatus::Created, PaymentStatus::Paid))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            PaymentStatus::Created => vec![PaymentStatus::Paid],
            PaymentStatus::Paid => vec![],
        }
    }
}

/// PaymentIntent aggregate - one attempt to collect a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: PaymentId,

    pub purpose: PaymentPurpose,

    pub organization_id: Option<OrganizationId>,

    /// Amount in whole currency units.
    pub amount: i64,

    /// Platform cut, computed from the configured percentage at creation.
    pub commission: i64,

    /// Currency code passed through to the provider.
    pub currency: String,

    pub status: PaymentStatus,

    /// Provider order id, set once the provider order is created.
    pub provider_order_id: Option<String>,

    /// Provider payment id, recorded on confirmation.
    pub provider_payment_id: Option<String>,

    /// Client-submitted confirmation signature, recorded when present.
    pub provider_signature: Option<String>,

    /// Payment-link id and URL, for link-based purposes.
    pub payment_link_id: Option<String>,
    pub payment_link_url: Option<String>,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl PaymentIntent {
    /// Creates a new intent in `Created` status.
    ///
    /// Commission is `floor(amount × commission_pct / 100)`.
    pub fn new(
        purpose: PaymentPurpose,
        organization_id: Option<OrganizationId>,
        amount: i64,
        currency: impl Into<String>,
        commission_pct: i64,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: PaymentId::new(),
            purpose,
            organization_id,
            amount,
            commission: amount * commission_pct / 100,
            currency: currency.into(),
            status: PaymentStatus::Created,
            provider_order_id: None,
            provider_payment_id: None,
            provider_signature: None,
            payment_link_id: None,
            payment_link_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the intent has been settled.
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }

    /// Records the provider order created for this intent.
    pub fn attach_order(&mut self, order_id: impl Into<String>) {
        self.provider_order_id = Some(order_id.into());
        self.updated_at = Timestamp::now();
    }

    /// Records the provider payment link created for this intent.
    pub fn attach_payment_link(&mut self, link_id: impl Into<String>, url: impl Into<String>) {
        self.payment_link_id = Some(link_id.into());
        self.payment_link_url = Some(url.into());
        self.updated_at = Timestamp::now();
    }

    /// Marks this intent paid, storing any supplied provider identifiers.
    ///
    /// Returns `true` if this call performed the transition, `false` if the
    /// intent was already paid (idempotent no-op: a paid intent is immutable).
    pub fn mark_paid(
        &mut self,
        provider_payment_id: Option<String>,
        provider_signature: Option<String>,
    ) -> bool {
        if self.is_paid() {
            return false;
        }
        if let Some(payment_id) = provider_payment_id {
            self.provider_payment_id = Some(payment_id);
        }
        if let Some(signature) = provider_signature {
            self.provider_signature = Some(signature);
        }
        self.status = PaymentStatus::Paid;
        self.updated_at = Timestamp::now();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrollment_purpose() -> PaymentPurpose {
        PaymentPurpose::CourseEnrollment {
            enrollment_id: EnrollmentId::new(),
            course_id: CourseId::new(),
        }
    }

    fn intent() -> PaymentIntent {
        PaymentIntent::new(enrollment_purpose(), None, 500, "INR", 10)
    }

    #[test]
    fn new_intent_starts_created() {
        let intent = intent();
        assert_eq!(intent.status, PaymentStatus::Created);
        assert!(!intent.is_paid());
        assert!(intent.provider_order_id.is_none());
    }

    #[test]
    fn commission_is_floor_of_percentage() {
        let intent = PaymentIntent::new(enrollment_purpose(), None, 500, "INR", 10);
        assert_eq!(intent.commission, 50);

        // 333 * 7 / 100 = 23.31, floored
        let intent = PaymentIntent::new(enrollment_purpose(), None, 333, "INR", 7);
        assert_eq!(intent.commission, 23);
    }

    #[test]
    fn mark_paid_transitions_and_stores_identifiers() {
        let mut intent = intent();
        let changed = intent.mark_paid(Some("pay_123".to_string()), Some("sig".to_string()));

        assert!(changed);
        assert!(intent.is_paid());
        assert_eq!(intent.provider_payment_id.as_deref(), Some("pay_123"));
        assert_eq!(intent.provider_signature.as_deref(), Some("sig"));
    }

    #[test]
    fn mark_paid_is_idempotent() {
        let mut intent = intent();
        assert!(intent.mark_paid(Some("pay_123".to_string()), None));

        // Second confirmation: no transition, identifiers untouched
        let changed = intent.mark_paid(Some("pay_456".to_string()), None);
        assert!(!changed);
        assert_eq!(intent.provider_payment_id.as_deref(), Some("pay_123"));
    }

    #[test]
    fn mark_paid_without_identifiers_keeps_existing() {
        let mut intent = intent();
        intent.mark_paid(None, None);
        assert!(intent.is_paid());
        assert!(intent.provider_payment_id.is_none());
    }

    #[test]
    fn enrollment_purpose_activates_enrollment() {
        let enrollment_id = EnrollmentId::new();
        let purpose = PaymentPurpose::CourseEnrollment {
            enrollment_id,
            course_id: CourseId::new(),
        };
        assert_eq!(
            purpose.settlement_effect(),
            SettlementEffect::ActivateEnrollment(enrollment_id)
        );
        assert_eq!(purpose.as_str(), "course_enrollment");
    }

    #[test]
    fn admin_purpose_activates_user() {
        let user_id = UserId::new();
        let purpose = PaymentPurpose::AdminSubscription { user_id };
        assert_eq!(
            purpose.settlement_effect(),
            SettlementEffect::ActivateUser(user_id)
        );
        assert_eq!(purpose.as_str(), "admin_subscription");
    }

    #[test]
    fn paid_status_is_terminal() {
        assert!(PaymentStatus::Paid.is_terminal());
        assert!(PaymentStatus::Created.can_transition_to(&PaymentStatus::Paid));
    }

    #[test]
    fn attach_order_records_provider_id() {
        let mut intent = intent();
        intent.attach_order("order_abc");
        assert_eq!(intent.provider_order_id.as_deref(), Some("order_abc"));
    }

    #[test]
    fn attach_payment_link_records_id_and_url() {
        let mut intent = intent();
        intent.attach_payment_link("plink_1", "https://pay.example/plink_1");
        assert_eq!(intent.payment_link_id.as_deref(), Some("plink_1"));
        assert_eq!(
            intent.payment_link_url.as_deref(),
            Some("https://pay.example/plink_1")
        );
    }
}
