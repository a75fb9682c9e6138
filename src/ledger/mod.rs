//! Ledger module
//!
//! Transaction engine over an `AccountStore`: lookup, conditional balance
//! mutation and authoritative re-read.

mod engine;

pub use engine::Ledger;
