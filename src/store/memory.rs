//! In-memory Account Store
//!
//! Same contract as the PostgreSQL store, for tests and local runs. Each
//! primitive runs inside one critical section that never spans an await.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::Account;

use super::{AccountStore, StoreError};

/// Account store over a process-local map
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: Mutex<HashMap<String, Decimal>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-seeded with accounts.
    pub fn with_accounts<I, S>(accounts: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let accounts = accounts
            .into_iter()
            .map(|(username, balance)| (username.into(), balance))
            .collect();
        Self {
            accounts: Mutex::new(accounts),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts().is_empty()
    }

    fn accounts(&self) -> MutexGuard<'_, HashMap<String, Decimal>> {
        // No method panics while holding the guard, so the map is never torn.
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts()
            .get(username)
            .map(|balance| Account::new(username, *balance)))
    }

    async fn insert(&self, username: &str, balance: Decimal) -> Result<(), StoreError> {
        let mut accounts = self.accounts();
        if accounts.contains_key(username) {
            return Err(StoreError::AlreadyExists(username.to_string()));
        }
        accounts.insert(username.to_string(), balance);
        Ok(())
    }

    async fn increment_if_non_negative(
        &self,
        username: &str,
        delta: Decimal,
    ) -> Result<u64, StoreError> {
        let mut accounts = self.accounts();
        let Some(balance) = accounts.get_mut(username) else {
            return Ok(0);
        };
        match balance.checked_add(delta) {
            Some(updated) if updated >= Decimal::ZERO => {
                *balance = updated;
                Ok(1)
            }
            Some(_) => Ok(0),
            None => Err(StoreError::Overflow(username.to_string())),
        }
    }
}
