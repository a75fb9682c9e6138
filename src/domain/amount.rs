//! Amount type
//!
//! Transaction magnitude accepted at the boundary. All amounts are validated
//! at construction time; the sign is applied afterwards by `credit`/`debit`.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Amount is a non-negative whole number of currency units.
///
/// # Example
/// ```
/// use ledger_service::domain::Amount;
///
/// let amount: Amount = "50".parse().unwrap();
/// assert_eq!(amount.debit(), rust_decimal::Decimal::from(-50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

/// Errors that can occur when creating an Amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must not be negative (got {0})")]
    Negative(i64),

    #[error("Invalid amount format: {0}")]
    ParseError(String),
}

impl Amount {
    /// Create a new Amount with validation.
    pub fn new(value: i64) -> Result<Self, AmountError> {
        if value < 0 {
            return Err(AmountError::Negative(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Signed delta for a deposit.
    pub fn credit(&self) -> Decimal {
        Decimal::from(self.0)
    }

    /// Signed delta for a withdrawal.
    pub fn debit(&self) -> Decimal {
        -Decimal::from(self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|e| AmountError::ParseError(format!("{:?}: {}", s, e)))?;
        Amount::new(value)
    }
}
