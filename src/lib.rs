//! ledger-service Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod domain;
pub mod handlers;
pub mod ledger;
pub mod store;

pub mod config;
pub mod db;
mod error;

pub use config::Config;
pub use domain::{Account, Amount, AmountError, LedgerError};
pub use error::AppError;
pub use ledger::Ledger;
pub use store::{AccountStore, MemoryAccountStore, PgAccountStore, StoreError};
