//! PostgreSQL Account Store
//!
//! `account (qualified_username TEXT PRIMARY KEY, balance NUMERIC NOT NULL)`

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::Account;

use super::{AccountStore, StoreError};

/// Account store backed by a shared `PgPool`
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let account: Option<Account> = sqlx::query_as(
            r#"
            SELECT qualified_username, balance
            FROM account
            WHERE qualified_username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn insert(&self, username: &str, balance: Decimal) -> Result<(), StoreError> {
        let rows_affected = sqlx::query(
            r#"
            INSERT INTO account (qualified_username, balance)
            VALUES ($1, $2)
            ON CONFLICT (qualified_username) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(balance)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows_affected == 0 {
            return Err(StoreError::AlreadyExists(username.to_string()));
        }

        Ok(())
    }

    async fn increment_if_non_negative(
        &self,
        username: &str,
        delta: Decimal,
    ) -> Result<u64, StoreError> {
        // The guard is re-evaluated against the locked row, so concurrent
        // debits cannot both pass on a stale balance.
        let rows_affected = sqlx::query(
            r#"
            UPDATE account
            SET balance = balance + $2
            WHERE qualified_username = $1 AND balance + $2 >= 0
            "#,
        )
        .bind(username)
        .bind(delta)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected)
    }
}
