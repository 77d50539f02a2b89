//! In-memory UserDirectory.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{UserAccount, UserDirectory};

/// Mutex-guarded in-memory user directory.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    accounts: Mutex<Vec<UserAccount>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, account: UserAccount) {
        self.accounts.lock().unwrap().push(account);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, DomainError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| &a.id == id).cloned())
    }

    async fn activate(&self, id: &UserId) -> Result<(), DomainError> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.iter_mut().find(|a| &a.id == id) {
            Some(account) => {
                account.is_active = true;
                Ok(())
            }
            None => Err(DomainError::not_found("User")),
        }
    }

    async fn create_inactive_admin(&self, account: &UserAccount) -> Result<(), DomainError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(DomainError::conflict("Email already registered"));
        }
        accounts.push(account.clone());
        Ok(())
    }
}
