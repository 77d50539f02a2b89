//! In-memory PaymentRepository.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EnrollmentId, PaymentId, Timestamp};
use crate::domain::payment::{PaymentIntent, PaymentPurpose, PaymentStatus};
use crate::ports::PaymentRepository;

/// Mutex-guarded in-memory payment intent store.
///
/// `claim_created` performs its read-check-write under a single lock
/// acquisition, mirroring the conditional-update semantics of the SQL
/// implementation.
#[derive(Default)]
pub struct InMemoryPaymentRepository {
    intents: Mutex<Vec<PaymentIntent>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all stored intents, for assertions in tests.
    pub fn all(&self) -> Vec<PaymentIntent> {
        self.intents.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, intent: &PaymentIntent) -> Result<(), DomainError> {
        self.intents.lock().unwrap().push(intent.clone());
        Ok(())
    }

    async fn update(&self, intent: &PaymentIntent) -> Result<(), DomainError> {
        let mut intents = self.intents.lock().unwrap();
        match intents.iter_mut().find(|i| i.id == intent.id) {
            Some(existing) => {
                *existing = intent.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("PaymentIntent")),
        }
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<PaymentIntent>, DomainError> {
        let intents = self.intents.lock().unwrap();
        Ok(intents.iter().find(|i| &i.id == id).cloned())
    }

    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<PaymentIntent>, DomainError> {
        let intents = self.intents.lock().unwrap();
        Ok(intents
            .iter()
            .find(|i| i.provider_order_id.as_deref() == Some(order_id))
            .cloned())
    }

    async fn find_by_enrollment(
        &self,
        enrollment_id: &EnrollmentId,
    ) -> Result<Option<PaymentIntent>, DomainError> {
        let intents = self.intents.lock().unwrap();
        Ok(intents
            .iter()
            .find(|i| {
                matches!(
                    &i.purpose,
                    PaymentPurpose::CourseEnrollment { enrollment_id: id, .. } if id == enrollment_id
                )
            })
            .cloned())
    }

    async fn claim_created(
        &self,
        id: &PaymentId,
        provider_payment_id: Option<&str>,
        provider_signature: Option<&str>,
    ) -> Result<bool, DomainError> {
        let mut intents = self.intents.lock().unwrap();
        let intent = intents
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| DomainError::not_found("PaymentIntent"))?;

        if intent.status != PaymentStatus::Created {
            return Ok(false);
        }
        intent.status = PaymentStatus::Paid;
        if let Some(payment_id) = provider_payment_id {
            intent.provider_payment_id = Some(payment_id.to_string());
        }
        if let Some(signature) = provider_signature {
            intent.provider_signature = Some(signature.to_string());
        }
        intent.updated_at = Timestamp::now();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CourseId;
    use std::sync::Arc;

    fn intent() -> PaymentIntent {
        PaymentIntent::new(
            PaymentPurpose::CourseEnrollment {
                enrollment_id: EnrollmentId::new(),
                course_id: CourseId::new(),
            },
            None,
            500,
            "INR",
            10,
        )
    }

    #[tokio::test]
    async fn claim_created_wins_once() {
        let repo = InMemoryPaymentRepository::new();
        let intent = intent();
        repo.save(&intent).await.unwrap();

        assert!(repo.claim_created(&intent.id, Some("pay_1"), None).await.unwrap());
        assert!(!repo.claim_created(&intent.id, Some("pay_2"), None).await.unwrap());

        let stored = repo.find_by_id(&intent.id).await.unwrap().unwrap();
        assert!(stored.is_paid());
        assert_eq!(stored.provider_payment_id.as_deref(), Some("pay_1"));
    }

    #[tokio::test]
    async fn concurrent_claims_produce_exactly_one_winner() {
        let repo = Arc::new(InMemoryPaymentRepository::new());
        let intent = intent();
        repo.save(&intent).await.unwrap();

        let mut handles = Vec::new();
        for n in 0..8 {
            let repo = repo.clone();
            let id = intent.id;
            handles.push(tokio::spawn(async move {
                repo.claim_created(&id, Some(&format!("pay_{}", n)), None)
                    .await
                    .unwrap()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn find_by_order_id_matches_attached_order() {
        let repo = InMemoryPaymentRepository::new();
        let mut intent = intent();
        intent.attach_order("order_77");
        repo.save(&intent).await.unwrap();

        let found = repo.find_by_order_id("order_77").await.unwrap();
        assert_eq!(found.map(|i| i.id), Some(intent.id));
        assert!(repo.find_by_order_id("order_88").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_enrollment_matches_purpose_link() {
        let repo = InMemoryPaymentRepository::new();
        let enrollment_id = EnrollmentId::new();
        let intent = PaymentIntent::new(
            PaymentPurpose::CourseEnrollment {
                enrollment_id,
                course_id: CourseId::new(),
            },
            None,
            500,
            "INR",
            10,
        );
        repo.save(&intent).await.unwrap();

        let found = repo.find_by_enrollment(&enrollment_id).await.unwrap();
        assert_eq!(found.map(|i| i.id), Some(intent.id));
    }
}
