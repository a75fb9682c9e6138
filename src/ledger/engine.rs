//! Ledger Engine
//!
//! Applies signed balance deltas without application-level locking. The
//! non-negative balance invariant is enforced by the store's conditional
//! update; its affected-row count is the only success oracle.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio::time::Instant;

use crate::domain::{Account, Amount, LedgerError};
use crate::store::{AccountStore, StoreError};

/// Ledger engine bound to an explicit storage handle
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn AccountStore>,
    timeout: Option<Duration>,
}

impl Ledger {
    /// Create a ledger over a storage handle, with no deadline.
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self {
            store,
            timeout: None,
        }
    }

    /// Bound each ledger operation by `timeout`.
    ///
    /// The budget covers the whole operation: `apply` issues up to three
    /// statements and all of them share one deadline taken when it starts.
    /// A caller wanting a per-request deadline sets it on a clone. An expired
    /// call surfaces as `StoreError::Timeout`; a single statement either
    /// committed or it did not, so nothing is left half-applied.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    // =========================================================================
    // Account Store Accessor
    // =========================================================================

    /// Look up the account for `username`. Absence is `Ok(None)`, not an error.
    pub async fn find(&self, username: &str) -> Result<Option<Account>, LedgerError> {
        self.find_before(username, self.deadline()).await
    }

    async fn find_before(
        &self,
        username: &str,
        deadline: Option<Deadline>,
    ) -> Result<Option<Account>, LedgerError> {
        bounded("find", deadline, self.store.find(username)).await
    }

    // =========================================================================
    // Account Provisioner
    // =========================================================================

    /// Insert a new account with `initial_balance`.
    ///
    /// Losing a race against a concurrent insert for the same username is
    /// reported as a storage error for which `is_already_exists()` holds.
    pub async fn create(
        &self,
        username: &str,
        initial_balance: Decimal,
    ) -> Result<(), LedgerError> {
        bounded(
            "create",
            self.deadline(),
            self.store.insert(username, initial_balance),
        )
        .await
    }

    // =========================================================================
    // Transaction Engine
    // =========================================================================

    /// Apply a signed delta to the account and return the stored balance.
    ///
    /// Never provisions a missing account. Zero affected rows from the
    /// conditional update is reported as `InsufficientFunds`; a row removed
    /// between lookup and update is indistinguishable from that case.
    pub async fn apply(
        &self,
        username: &str,
        delta: impl Into<Decimal>,
    ) -> Result<Decimal, LedgerError> {
        let delta = delta.into();
        let deadline = self.deadline();

        if self.find_before(username, deadline).await?.is_none() {
            return Err(LedgerError::UserNotFound(username.to_string()));
        }

        let rows_affected = bounded(
            "apply",
            deadline,
            self.store.increment_if_non_negative(username, delta),
        )
        .await?;

        if rows_affected == 0 {
            return Err(LedgerError::InsufficientFunds(username.to_string()));
        }

        // Re-read: the stored numeric value is the source of truth.
        let account = self
            .find_before(username, deadline)
            .await?
            .ok_or_else(|| LedgerError::UserNotFound(username.to_string()))?;

        Ok(account.balance)
    }

    /// `apply(username, +amount)`
    pub async fn deposit(&self, username: &str, amount: Amount) -> Result<Decimal, LedgerError> {
        self.apply(username, amount.credit()).await
    }

    /// `apply(username, -amount)`
    pub async fn withdraw(&self, username: &str, amount: Amount) -> Result<Decimal, LedgerError> {
        self.apply(username, amount.debit()).await
    }

    fn deadline(&self) -> Option<Deadline> {
        self.timeout.map(|limit| Deadline {
            at: Instant::now() + limit,
            limit,
        })
    }
}

/// Point in time an operation must finish by, with the budget it came from
#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    limit: Duration,
}

async fn bounded<T, F>(
    operation: &'static str,
    deadline: Option<Deadline>,
    call: F,
) -> Result<T, LedgerError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    let result = match deadline {
        Some(deadline) => match tokio::time::timeout_at(deadline.at, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(deadline.limit)),
        },
        None => call.await,
    };

    result.map_err(|source| LedgerError::storage(operation, source))
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
