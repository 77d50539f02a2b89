//! ProvisionAdminHandler - super-admin seat provisioning.
//!
//! Creates an inactive admin account plus an `admin_subscription` payment
//! intent, and sends the seat price through a hosted payment link. The
//! `payment_link.paid` webhook later activates the account through the
//! shared settlement path.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, OrganizationId, Role, UserId};
use crate::domain::payment::{PaymentIntent, PaymentPurpose};
use crate::ports::{
    CreatePaymentLinkRequest, PaymentProvider, PaymentRepository, UserAccount, UserDirectory,
};

/// Seat pricing settings.
#[derive(Debug, Clone)]
pub struct AdminSeatSettings {
    /// Seat price in whole currency units.
    pub price: i64,
    pub currency: String,
}

/// Command to provision an admin seat in an organization.
#[derive(Debug, Clone)]
pub struct ProvisionAdminCommand {
    pub organization_id: OrganizationId,
    pub organization_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Result of seat provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedAdmin {
    pub user_id: UserId,
    pub email: String,
    pub payment_link_url: String,
}

/// Handler for admin seat provisioning.
pub struct ProvisionAdminHandler {
    users: Arc<dyn UserDirectory>,
    payments: Arc<dyn PaymentRepository>,
    provider: Arc<dyn PaymentProvider>,
    settings: AdminSeatSettings,
}

impl ProvisionAdminHandler {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        payments: Arc<dyn PaymentRepository>,
        provider: Arc<dyn PaymentProvider>,
        settings: AdminSeatSettings,
    ) -> Self {
        Self {
            users,
            payments,
            provider,
            settings,
        }
    }

    /// # Errors
    ///
    /// - `Conflict` - email already registered
    /// - `UpstreamUnavailable` - payment link creation failed; the account
    ///   and intent survive for manual follow-up
    pub async fn handle(
        &self,
        cmd: ProvisionAdminCommand,
    ) -> Result<ProvisionedAdmin, DomainError> {
        let account = UserAccount {
            id: UserId::new(),
            role: Role::Admin,
            organization_id: Some(cmd.organization_id),
            full_name: cmd.full_name.clone(),
            email: cmd.email.clone(),
            phone: cmd.phone.clone(),
            is_active: false,
        };
        self.users.create_inactive_admin(&account).await?;

        let mut intent = PaymentIntent::new(
            PaymentPurpose::AdminSubscription {
                user_id: account.id,
            },
            Some(cmd.organization_id),
            self.settings.price,
            self.settings.currency.clone(),
            0,
        );
        self.payments.save(&intent).await?;

        let link = self
            .provider
            .create_payment_link(CreatePaymentLinkRequest {
                amount: intent.amount,
                currency: intent.currency.clone(),
                description: format!("Admin subscription for {}", cmd.organization_name),
                reference_id: intent.id.to_string(),
                customer_name: cmd.full_name,
                customer_email: cmd.email.clone(),
                customer_phone: cmd.phone,
                notes: serde_json::json!({
                    "purpose": "admin_subscription",
                    "admin_user_id": account.id.to_string(),
                    "org_id": cmd.organization_id.to_string(),
                }),
            })
            .await?;

        intent.attach_payment_link(link.id, link.url.clone());
        self.payments.update(&intent).await?;

        Ok(ProvisionedAdmin {
            user_id: account.id,
            email: cmd.email,
            payment_link_url: link.url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryPaymentRepository, InMemoryUserDirectory};
    use crate::adapters::razorpay::MockPaymentProvider;
    use crate::domain::foundation::ErrorCode;
    use crate::ports::ProviderError;

    fn settings() -> AdminSeatSettings {
        AdminSeatSettings {
            price: 11000,
            currency: "INR".to_string(),
        }
    }

    fn command() -> ProvisionAdminCommand {
        ProvisionAdminCommand {
            organization_id: OrganizationId::new(),
            organization_name: "Riverside Arts".to_string(),
            full_name: "Neha Verma".to_string(),
            email: "neha@riverside.example".to_string(),
            phone: Some("9000000001".to_string()),
        }
    }

    #[tokio::test]
    async fn provisions_inactive_admin_with_payment_link() {
        let users = Arc::new(InMemoryUserDirectory::new());
        let payments: Arc<InMemoryPaymentRepository> =
            Arc::new(InMemoryPaymentRepository::new());
        let handler = ProvisionAdminHandler::new(
            users.clone(),
            payments.clone(),
            Arc::new(MockPaymentProvider::new()),
            settings(),
        );

        let provisioned = handler.handle(command()).await.unwrap();

        let account = users.find_by_id(&provisioned.user_id).await.unwrap().unwrap();
        assert!(!account.is_active);
        assert_eq!(account.role, Role::Admin);

        let intents = payments.all();
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].amount, 11000);
        assert_eq!(intents[0].commission, 0);
        assert_eq!(
            intents[0].payment_link_url.as_deref(),
            Some(provisioned.payment_link_url.as_str())
        );
        // The link reference carries the intent id for webhook resolution
        assert!(provisioned
            .payment_link_url
            .contains(&intents[0].id.to_string()));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let users = Arc::new(InMemoryUserDirectory::new());
        let payments: Arc<InMemoryPaymentRepository> =
            Arc::new(InMemoryPaymentRepository::new());
        let handler = ProvisionAdminHandler::new(
            users,
            payments,
            Arc::new(MockPaymentProvider::new()),
            settings(),
        );

        handler.handle(command()).await.unwrap();
        let result = handler.handle(command()).await;
        assert_eq!(result.unwrap_err().code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn provider_failure_surfaces_but_keeps_account_and_intent() {
        let users = Arc::new(InMemoryUserDirectory::new());
        let payments: Arc<InMemoryPaymentRepository> =
            Arc::new(InMemoryPaymentRepository::new());
        let handler = ProvisionAdminHandler::new(
            users.clone(),
            payments.clone(),
            Arc::new(MockPaymentProvider::failing(ProviderError::NotConfigured)),
            settings(),
        );

        let result = handler.handle(command()).await;
        assert_eq!(result.unwrap_err().code, ErrorCode::UpstreamUnavailable);

        let intents = payments.all();
        assert_eq!(intents.len(), 1);
        assert!(intents[0].payment_link_url.is_none());
    }
}
