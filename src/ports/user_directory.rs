//! Read and activation access to user accounts.
//!
//! The engine consumes verified identities; this port covers the two
//! touch points it still needs on accounts: reading display/contact data
//! and flipping the active flag when an admin subscription settles.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrganizationId, Role, UserId};

/// A user account as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: UserId,
    pub role: Role,
    pub organization_id: Option<OrganizationId>,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_active: bool,
}

/// Directory of user accounts.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError>;

    /// Sets the account's active flag. Activating an already active account
    /// is a no-op.
    async fn activate(&self, id: &UserId) -> Result<(), DomainError>;

    /// Creates an inactive admin seat account in an organization.
    ///
    /// Fails with `Conflict` if the email is already registered.
    async fn create_inactive_admin(&self, account: &UserAccount) -> Result<(), DomainError>;
}
