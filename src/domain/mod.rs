//! Domain module
//!
//! Core domain types shared by the ledger core and its callers.

pub mod account;
pub mod amount;
pub mod error;

pub use account::Account;
pub use amount::{Amount, AmountError};
pub use error::LedgerError;
