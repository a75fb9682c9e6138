//! Account Store module
//!
//! Storage seam for the ledger core. Every method maps to exactly one
//! storage statement so that the conditional update stays atomic.

mod error;
mod memory;
mod postgres;

pub use error::StoreError;
pub use memory::MemoryAccountStore;
pub use postgres::PgAccountStore;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::Account;

/// Storage primitives over the account table
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Read the row for `username`; `Ok(None)` when no row matches.
    async fn find(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Insert a new row. A row that already exists yields `StoreError::AlreadyExists`.
    async fn insert(&self, username: &str, balance: Decimal) -> Result<(), StoreError>;

    /// Add `delta` to the stored balance only if the result stays `>= 0`.
    ///
    /// Returns the affected-row count: `1` when applied, `0` when the guard
    /// rejected the update or no row matched.
    async fn increment_if_non_negative(
        &self,
        username: &str,
        delta: Decimal,
    ) -> Result<u64, StoreError>;
}
