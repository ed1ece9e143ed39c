//! Process-local account store, used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{AccountStore, AuthError};
use crate::database::Account;

#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    by_email: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        Ok(self.by_email.read().get(email).cloned())
    }

    async fn insert(&self, account: &Account) -> Result<(), AuthError> {
        let mut accounts = self.by_email.write();
        if accounts.contains_key(&account.email) {
            return Err(AuthError::EmailTaken);
        }
        accounts.insert(account.email.clone(), account.clone());
        Ok(())
    }
}
