//! Ledger Error Types
//!
//! The only failure surface the ledger core exposes to its callers.

use thiserror::Error;

use crate::store::StoreError;

/// Classified outcome of a failed ledger operation.
///
/// `UserNotFound` and `InsufficientFunds` are expected domain outcomes.
/// `Storage` wraps every other storage-level fault together with the name of
/// the operation that hit it.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No account row exists for the username
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// The conditional update rejected the mutation
    #[error("Insufficient funds for user: {0}")]
    InsufficientFunds(String),

    /// Unexpected storage failure (connectivity, malformed row, timeout, duplicate insert)
    #[error("Storage error during {operation}: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

impl LedgerError {
    pub fn storage(operation: &'static str, source: StoreError) -> Self {
        Self::Storage { operation, source }
    }

    pub fn is_user_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_))
    }

    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::InsufficientFunds(_))
    }

    /// True when a provisioning insert lost a race against another insert.
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            Self::Storage {
                source: StoreError::AlreadyExists(_),
                ..
            }
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Storage {
                source: StoreError::Timeout(_),
                ..
            }
        )
    }
}
