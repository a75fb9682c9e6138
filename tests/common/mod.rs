//! Common test utilities

#![allow(dead_code)]

use std::sync::Arc;

use ledger_service::{db, Ledger, PgAccountStore};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connect to the test database and make sure the account table exists
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    db::ensure_schema(&pool).await.expect("Failed to create schema");

    pool
}

pub fn pg_ledger(pool: PgPool) -> Ledger {
    Ledger::new(Arc::new(PgAccountStore::new(pool)))
}

/// Username that no other test run will collide with
pub fn unique_username(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}
