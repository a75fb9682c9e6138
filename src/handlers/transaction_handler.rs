//! Transaction Handler
//!
//! Deposits and withdrawals with provision-on-first-use.

use rust_decimal::Decimal;

use crate::domain::LedgerError;
use crate::error::AppError;
use crate::ledger::Ledger;

use super::{TransactionCommand, TransactionResult};

/// Handler for deposit and withdraw commands
#[derive(Debug, Clone)]
pub struct TransactionHandler {
    ledger: Ledger,
    initial_balance: Decimal,
}

impl TransactionHandler {
    pub fn new(ledger: Ledger, initial_balance: Decimal) -> Self {
        Self {
            ledger,
            initial_balance,
        }
    }

    /// Execute the command.
    ///
    /// An unknown username is provisioned with the configured initial
    /// balance and the transaction is retried exactly once.
    pub async fn execute(&self, command: TransactionCommand) -> Result<TransactionResult, AppError> {
        if command.username.trim().is_empty() {
            return Err(AppError::InvalidRequest("username must not be empty".to_string()));
        }

        let delta = command.delta();

        match self.ledger.apply(&command.username, delta).await {
            Ok(balance) => {
                return Ok(TransactionResult {
                    username: command.username,
                    balance,
                    provisioned: false,
                })
            }
            Err(LedgerError::UserNotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }

        self.provision(&command.username).await?;

        let balance = self.ledger.apply(&command.username, delta).await?;

        tracing::info!(
            username = %command.username,
            kind = %command.kind,
            amount = %command.amount,
            balance = %balance,
            "Transaction applied to newly provisioned account"
        );

        Ok(TransactionResult {
            username: command.username,
            balance,
            provisioned: true,
        })
    }

    /// Create the account, tolerating a concurrent insert for the same username.
    async fn provision(&self, username: &str) -> Result<(), AppError> {
        match self.ledger.create(username, self.initial_balance).await {
            Ok(()) => {
                tracing::info!(
                    username = %username,
                    initial_balance = %self.initial_balance,
                    "Provisioned account"
                );
                Ok(())
            }
            Err(e) if e.is_already_exists() => {
                tracing::debug!(username = %username, "Account provisioned concurrently");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
