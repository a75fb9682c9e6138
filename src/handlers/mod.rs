//! Command Handlers module
//!
//! Request-level policy on top of the ledger core: provisioning unknown
//! accounts and retrying the transaction once.

mod commands;
mod transaction_handler;

#[cfg(test)]
mod tests;

pub use commands::*;
pub use transaction_handler::TransactionHandler;
