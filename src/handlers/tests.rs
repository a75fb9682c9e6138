//! Handler tests against the in-memory store

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal_macros::dec;

    use crate::domain::{Amount, LedgerError};
    use crate::error::AppError;
    use crate::handlers::{TransactionCommand, TransactionHandler, TransactionKind};
    use crate::ledger::Ledger;
    use crate::store::{AccountStore, MemoryAccountStore};

    fn handler(store: Arc<MemoryAccountStore>) -> TransactionHandler {
        TransactionHandler::new(Ledger::new(store), dec!(1000))
    }

    fn amount(value: i64) -> Amount {
        Amount::new(value).unwrap()
    }

    // =========================================================================
    // Commands
    // =========================================================================

    #[test]
    fn test_command_delta_sign() {
        let deposit = TransactionCommand::deposit("alice", amount(30));
        assert_eq!(deposit.kind, TransactionKind::Deposit);
        assert_eq!(deposit.delta(), dec!(30));

        let withdraw = TransactionCommand::withdraw("alice", amount(30));
        assert_eq!(withdraw.kind, TransactionKind::Withdraw);
        assert_eq!(withdraw.delta(), dec!(-30));
    }

    #[test]
    fn test_transaction_kind_display() {
        assert_eq!(TransactionKind::Deposit.to_string(), "deposit");
        assert_eq!(TransactionKind::Withdraw.to_string(), "withdraw");
    }

    // =========================================================================
    // Existing accounts
    // =========================================================================

    #[tokio::test]
    async fn test_deposit_existing_account() {
        let store = Arc::new(MemoryAccountStore::with_accounts([("alice", dec!(100))]));
        let handler = handler(store);

        let result = handler
            .execute(TransactionCommand::deposit("alice", amount(50)))
            .await
            .unwrap();

        assert_eq!(result.balance, dec!(150));
        assert!(!result.provisioned);
    }

    #[tokio::test]
    async fn test_withdraw_insufficient_funds() {
        let store = Arc::new(MemoryAccountStore::with_accounts([("alice", dec!(150))]));
        let handler = handler(store.clone());

        let result = handler
            .execute(TransactionCommand::withdraw("alice", amount(200)))
            .await;

        match result {
            Err(AppError::Ledger(LedgerError::InsufficientFunds(username))) => {
                assert_eq!(username, "alice");
            }
            other => panic!("Expected InsufficientFunds, got: {:?}", other),
        }

        let account = store.find("alice").await.unwrap().unwrap();
        assert_eq!(account.balance, dec!(150));
    }

    // =========================================================================
    // Provisioning
    // =========================================================================

    #[tokio::test]
    async fn test_unknown_user_is_provisioned_then_applied() {
        let store = Arc::new(MemoryAccountStore::new());
        let handler = handler(store.clone());

        let result = handler
            .execute(TransactionCommand::deposit("bob", amount(10)))
            .await
            .unwrap();

        assert_eq!(result.balance, dec!(1010));
        assert!(result.provisioned);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_withdraw_beyond_initial_balance_on_new_account() {
        let store = Arc::new(MemoryAccountStore::new());
        let handler = handler(store.clone());

        let result = handler
            .execute(TransactionCommand::withdraw("carol", amount(5000)))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Ledger(LedgerError::InsufficientFunds(_)))
        ));

        // Account stays provisioned with its untouched starting balance
        let account = store.find("carol").await.unwrap().unwrap();
        assert_eq!(account.balance, dec!(1000));
    }

    #[tokio::test]
    async fn test_concurrent_first_use_provisions_once() {
        let store = Arc::new(MemoryAccountStore::new());
        let handler = handler(store.clone());

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let handler = handler.clone();
            tasks.push(tokio::spawn(async move {
                handler
                    .execute(TransactionCommand::deposit("dave", amount(1)))
                    .await
            }));
        }

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let account = store.find("dave").await.unwrap().unwrap();
        assert_eq!(account.balance, dec!(1008));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_username_rejected() {
        let store = Arc::new(MemoryAccountStore::new());
        let handler = handler(store.clone());

        let result = handler
            .execute(TransactionCommand::deposit("  ", amount(1)))
            .await;

        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        assert!(store.is_empty());
    }
}
