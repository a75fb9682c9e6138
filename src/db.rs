//! Database module
//!
//! Pool construction and schema utilities.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;

/// Schema for the account table
const CREATE_ACCOUNT_TABLE: &str = include_str!("../migrations/0001_create_account.sql");

/// Open a pool sized from configuration
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let mut options = PgPoolOptions::new().max_connections(config.database_max_connections);
    if let Some(timeout) = config.storage_timeout {
        options = options.acquire_timeout(timeout);
    }
    options.connect(&config.database_url).await
}

/// Verify database connectivity
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}

/// Check if the account table exists
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name = 'account'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !exists {
        tracing::warn!("Required table 'account' does not exist");
    }

    Ok(exists)
}

/// Create the account table if it is missing
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    if check_schema(pool).await? {
        return Ok(());
    }

    sqlx::query(CREATE_ACCOUNT_TABLE).execute(pool).await?;
    tracing::info!("Created table 'account'");

    Ok(())
}
