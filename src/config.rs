//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum database connections in pool.
    /// 1 serializes all storage access; larger values are safe because the
    /// conditional update guards the balance.
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Starting balance for accounts provisioned on first use
    pub initial_balance: Decimal,

    /// Deadline for each storage call (`None` disables)
    pub storage_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::MissingEnv("DATABASE_URL"))?;

        let database_max_connections: u32 =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", "1")?;
        if database_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"));
        }

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = parse_or(&lookup, "PORT", "8080")?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let initial_balance: Decimal = parse_or(&lookup, "INITIAL_BALANCE", "100000")?;
        if initial_balance < Decimal::ZERO {
            return Err(ConfigError::InvalidValue("INITIAL_BALANCE"));
        }

        let storage_timeout_ms: u64 = parse_or(&lookup, "STORAGE_TIMEOUT_MS", "5000")?;
        let storage_timeout = (storage_timeout_ms > 0).then(|| Duration::from_millis(storage_timeout_ms));

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            environment,
            initial_balance,
            storage_timeout,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key))
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
