//! Command definitions
//!
//! Commands represent intentions to change an account balance.

use rust_decimal::Decimal;

use crate::domain::Amount;

/// Direction of a balance change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "deposit"),
            TransactionKind::Withdraw => write!(f, "withdraw"),
        }
    }
}

/// Command to deposit into or withdraw from an account
#[derive(Debug, Clone)]
pub struct TransactionCommand {
    pub username: String,
    pub kind: TransactionKind,
    pub amount: Amount,
}

impl TransactionCommand {
    pub fn deposit(username: impl Into<String>, amount: Amount) -> Self {
        Self {
            username: username.into(),
            kind: TransactionKind::Deposit,
            amount,
        }
    }

    pub fn withdraw(username: impl Into<String>, amount: Amount) -> Self {
        Self {
            username: username.into(),
            kind: TransactionKind::Withdraw,
            amount,
        }
    }

    /// Signed delta handed to the ledger
    pub fn delta(&self) -> Decimal {
        match self.kind {
            TransactionKind::Deposit => self.amount.credit(),
            TransactionKind::Withdraw => self.amount.debit(),
        }
    }
}

/// Result of a successful transaction
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionResult {
    pub username: String,
    pub balance: Decimal,
    /// Whether the account was created by this request
    pub provisioned: bool,
}
