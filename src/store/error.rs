//! Account Store Errors

use std::time::Duration;

/// Errors that can occur in the account store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Provisioning insert hit an existing row
    #[error("Account already exists: {0}")]
    AlreadyExists(String),

    /// Balance arithmetic left the representable numeric range
    #[error("Balance overflow for account: {0}")]
    Overflow(String),

    /// Storage call exceeded the caller's deadline
    #[error("Storage call timed out after {0:?}")]
    Timeout(Duration),
}
