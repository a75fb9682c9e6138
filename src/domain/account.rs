//! Account row
//!
//! One row of the `account` table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single monetary account keyed by its qualified username.
///
/// # Invariants
/// - `qualified_username` is unique and never changes once stored
/// - `balance` is never negative after a completed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub qualified_username: String,
    pub balance: Decimal,
}

impl Account {
    pub fn new(qualified_username: impl Into<String>, balance: Decimal) -> Self {
        Self {
            qualified_username: qualified_username.into(),
            balance,
        }
    }
}
