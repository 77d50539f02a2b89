//! EnrollHandler - creates or resumes a student's enrollment in a course.
//!
//! A priced course couples the enrollment to a payment intent and a
//! provider order. The enrollment is persisted before the provider is
//! called: a provider outage leaves a valid `pending_payment` enrollment
//! behind, and re-enrolling resumes the same checkout instead of creating
//! a second intent.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::catalog::Course;
use crate::domain::enrollment::{Enrollment, EnrollmentStatus};
use crate::domain::foundation::{CourseId, DomainError, OrganizationId, UserId};
use crate::domain::payment::{PaymentIntent, PaymentPurpose};
use crate::ports::{
    CatalogReader, CreateOrderRequest, EnrollmentRepository, PaymentProvider, PaymentRepository,
};

/// Checkout parameters shared by all enrollments.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    /// Provider public key id, embedded in the client checkout widget.
    pub key_id: String,
    pub currency: String,
    /// Platform commission percentage applied to course payments.
    pub commission_pct: i64,
}

/// Command to enroll the calling student in a course.
#[derive(Debug, Clone)]
pub struct EnrollCommand {
    pub student_id: UserId,
    pub organization_id: Option<OrganizationId>,
    pub course_id: CourseId,
}

/// Checkout details the client needs to open the provider widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutDetails {
    pub provider: &'static str,
    pub key_id: String,
    /// Amount in minor currency units, as the provider expects.
    pub amount: i64,
    pub currency: String,
    pub order_id: String,
    pub name: String,
    pub description: String,
}

/// Result of an enroll call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentResult {
    pub enrollment: Enrollment,
    /// Present when the enrollment is awaiting payment and a provider order
    /// is open for it.
    pub checkout: Option<CheckoutDetails>,
}

/// Handler for enrollment creation and checkout resumption.
pub struct EnrollHandler {
    catalog: Arc<dyn CatalogReader>,
    enrollments: Arc<dyn EnrollmentRepository>,
    payments: Arc<dyn PaymentRepository>,
    provider: Arc<dyn PaymentProvider>,
    settings: CheckoutSettings,
}

impl EnrollHandler {
    pub fn new(
        catalog: Arc<dyn CatalogReader>,
        enrollments: Arc<dyn EnrollmentRepository>,
        payments: Arc<dyn PaymentRepository>,
        provider: Arc<dyn PaymentProvider>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            catalog,
            enrollments,
            payments,
            provider,
            settings,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` - course absent or belongs to another organization
    /// - `UpstreamUnavailable` - provider order creation failed; the
    ///   enrollment stays in `pending_payment` for a later retry
    pub async fn handle(&self, cmd: EnrollCommand) -> Result<EnrollmentResult, DomainError> {
        let course = self
            .catalog
            .find_course(&cmd.course_id)
            .await?
            .filter(|c| c.visible_to(cmd.organization_id.as_ref()))
            .ok_or_else(|| DomainError::not_found("Course"))?;

        if let Some(existing) = self
            .enrollments
            .find_by_student_and_course(&cmd.student_id, &cmd.course_id)
            .await?
        {
            return self.resume(existing, &course).await;
        }

        let enrollment = Enrollment::new(
            cmd.student_id,
            cmd.course_id,
            course.organization_id,
            course.requires_payment(),
        );
        self.enrollments.save(&enrollment).await?;

        if !course.requires_payment() {
            return Ok(EnrollmentResult {
                enrollment,
                checkout: None,
            });
        }

        let checkout = self.open_checkout(&enrollment, &course).await?;
        Ok(EnrollmentResult {
            enrollment,
            checkout: Some(checkout),
        })
    }

    /// Idempotent re-enroll: an open checkout is re-returned, anything else
    /// reports the current status as-is.
    async fn resume(
        &self,
        enrollment: Enrollment,
        course: &Course,
    ) -> Result<EnrollmentResult, DomainError> {
        if enrollment.status != EnrollmentStatus::PendingPayment {
            return Ok(EnrollmentResult {
                enrollment,
                checkout: None,
            });
        }
        let checkout = self.open_checkout(&enrollment, course).await?;
        Ok(EnrollmentResult {
            enrollment,
            checkout: Some(checkout),
        })
    }

    /// Ensures a payment intent with a provider order exists for the
    /// enrollment and returns its checkout details.
    async fn open_checkout(
        &self,
        enrollment: &Enrollment,
        course: &Course,
    ) -> Result<CheckoutDetails, DomainError> {
        let mut intent = match self.payments.find_by_enrollment(&enrollment.id).await? {
            Some(intent) => intent,
            None => {
                let intent = PaymentIntent::new(
                    PaymentPurpose::CourseEnrollment {
                        enrollment_id: enrollment.id,
                        course_id: course.id,
                    },
                    course.organization_id,
                    course.price,
                    self.settings.currency.clone(),
                    self.settings.commission_pct,
                );
                self.payments.save(&intent).await?;
                intent
            }
        };

        let (order_id, amount_minor) = match &intent.provider_order_id {
            Some(order_id) => (order_id.clone(), intent.amount * 100),
            None => {
                let order = self
                    .provider
                    .create_order(CreateOrderRequest {
                        amount: intent.amount,
                        currency: intent.currency.clone(),
                        receipt: format!("enroll_{}", enrollment.id),
                        notes: serde_json::json!({
                            "payment_id": intent.id.to_string(),
                            "course_id": course.id.to_string(),
                            "student_id": enrollment.student_id.to_string(),
                        }),
                    })
                    .await?;
                intent.attach_order(order.id.clone());
                self.payments.update(&intent).await?;
                (order.id, order.amount_minor)
            }
        };

        Ok(CheckoutDetails {
            provider: "razorpay",
            key_id: self.settings.key_id.clone(),
            amount: amount_minor,
            currency: intent.currency.clone(),
            order_id,
            name: course.title.clone(),
            description: "Course enrollment".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryCatalog, InMemoryEnrollmentRepository, InMemoryPaymentRepository,
    };
    use crate::adapters::razorpay::MockPaymentProvider;
    use crate::domain::catalog::Course;
    use crate::domain::foundation::{ErrorCode, Timestamp};
    use crate::ports::ProviderError;

    struct Fixture {
        catalog: Arc<InMemoryCatalog>,
        enrollments: Arc<InMemoryEnrollmentRepository>,
        payments: Arc<InMemoryPaymentRepository>,
        handler: EnrollHandler,
    }

    fn settings() -> CheckoutSettings {
        CheckoutSettings {
            key_id: "rzp_test_key".to_string(),
            currency: "INR".to_string(),
            commission_pct: 10,
        }
    }

    fn fixture_with_provider(provider: Arc<dyn PaymentProvider>) -> Fixture {
        let catalog = Arc::new(InMemoryCatalog::new());
        let enrollments = Arc::new(InMemoryEnrollmentRepository::new());
        let payments: Arc<InMemoryPaymentRepository> =
            Arc::new(InMemoryPaymentRepository::new());
        let handler = EnrollHandler::new(
            catalog.clone(),
            enrollments.clone(),
            payments.clone(),
            provider,
            settings(),
        );
        Fixture {
            catalog,
            enrollments,
            payments,
            handler,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_provider(Arc::new(MockPaymentProvider::new()))
    }

    fn course(price: i64, org: Option<OrganizationId>) -> Course {
        Course {
            id: CourseId::new(),
            organization_id: org,
            title: "Oil Painting".to_string(),
            description: None,
            level: "beginner".to_string(),
            price,
            created_at: Timestamp::now(),
        }
    }

    fn command(student: UserId, course: &Course, org: Option<OrganizationId>) -> EnrollCommand {
        EnrollCommand {
            student_id: student,
            organization_id: org,
            course_id: course.id,
        }
    }

    #[tokio::test]
    async fn free_course_enrolls_as_pending_without_checkout() {
        let fx = fixture();
        let c = course(0, None);
        fx.catalog.add_course(c.clone());

        let result = fx.handler.handle(command(UserId::new(), &c, None)).await.unwrap();

        assert_eq!(result.enrollment.status, EnrollmentStatus::Pending);
        assert!(result.checkout.is_none());
        assert!(fx.payments.all().is_empty());
    }

    #[tokio::test]
    async fn priced_course_enrolls_as_pending_payment_with_checkout() {
        let fx = fixture();
        let c = course(500, None);
        fx.catalog.add_course(c.clone());

        let result = fx.handler.handle(command(UserId::new(), &c, None)).await.unwrap();

        assert_eq!(result.enrollment.status, EnrollmentStatus::PendingPayment);
        let checkout = result.checkout.unwrap();
        assert_eq!(checkout.provider, "razorpay");
        assert_eq!(checkout.amount, 50_000);
        assert_eq!(checkout.currency, "INR");
        assert_eq!(checkout.name, "Oil Painting");

        let intents = fx.payments.all();
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].amount, 500);
        assert_eq!(intents[0].commission, 50);
        assert_eq!(intents[0].provider_order_id.as_deref(), Some(checkout.order_id.as_str()));
    }

    #[tokio::test]
    async fn missing_course_is_not_found() {
        let fx = fixture();
        let c = course(0, None);
        let result = fx.handler.handle(command(UserId::new(), &c, None)).await;
        assert_eq!(result.unwrap_err().code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn cross_tenant_course_is_not_found() {
        let fx = fixture();
        let c = course(0, Some(OrganizationId::new()));
        fx.catalog.add_course(c.clone());

        let result = fx
            .handler
            .handle(command(UserId::new(), &c, Some(OrganizationId::new())))
            .await;
        assert_eq!(result.unwrap_err().code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn re_enroll_resumes_open_checkout_without_second_intent() {
        let fx = fixture();
        let c = course(500, None);
        fx.catalog.add_course(c.clone());
        let student = UserId::new();

        let first = fx.handler.handle(command(student, &c, None)).await.unwrap();
        let second = fx.handler.handle(command(student, &c, None)).await.unwrap();

        assert_eq!(first.enrollment.id, second.enrollment.id);
        assert_eq!(
            first.checkout.unwrap().order_id,
            second.checkout.unwrap().order_id
        );
        assert_eq!(fx.payments.all().len(), 1);
    }

    #[tokio::test]
    async fn re_enroll_in_free_course_returns_status_as_is() {
        let fx = fixture();
        let c = course(0, None);
        fx.catalog.add_course(c.clone());
        let student = UserId::new();

        fx.handler.handle(command(student, &c, None)).await.unwrap();
        let again = fx.handler.handle(command(student, &c, None)).await.unwrap();

        assert_eq!(again.enrollment.status, EnrollmentStatus::Pending);
        assert!(again.checkout.is_none());
        assert_eq!(fx.enrollments.all().len(), 1);
    }

    #[tokio::test]
    async fn provider_failure_keeps_enrollment_for_retry() {
        let fx = fixture_with_provider(Arc::new(MockPaymentProvider::failing(
            ProviderError::Unreachable("connect timeout".to_string()),
        )));
        let c = course(500, None);
        fx.catalog.add_course(c.clone());
        let student = UserId::new();

        let result = fx.handler.handle(command(student, &c, None)).await;
        assert_eq!(result.unwrap_err().code, ErrorCode::UpstreamUnavailable);

        // The enrollment and intent survive; only the provider order is missing
        let enrollment = fx
            .enrollments
            .find_by_student_and_course(&student, &c.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::PendingPayment);
        let intents = fx.payments.all();
        assert_eq!(intents.len(), 1);
        assert!(intents[0].provider_order_id.is_none());
    }

    #[tokio::test]
    async fn retry_after_provider_failure_reuses_intent_and_creates_order() {
        let fx = fixture_with_provider(Arc::new(MockPaymentProvider::failing(
            ProviderError::Unreachable("connect timeout".to_string()),
        )));
        let c = course(500, None);
        fx.catalog.add_course(c.clone());
        let student = UserId::new();
        fx.handler.handle(command(student, &c, None)).await.unwrap_err();

        // Provider comes back: same fixture state, working provider
        let retry_handler = EnrollHandler::new(
            fx.catalog.clone(),
            fx.enrollments.clone(),
            fx.payments.clone(),
            Arc::new(MockPaymentProvider::new()),
            settings(),
        );
        let result = retry_handler.handle(command(student, &c, None)).await.unwrap();

        assert!(result.checkout.is_some());
        let intents = fx.payments.all();
        assert_eq!(intents.len(), 1);
        assert!(intents[0].provider_order_id.is_some());
    }
}
