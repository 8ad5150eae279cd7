//! The module contains the errors the engine can return.
//!
//! Only construction of values can fail: once an [`Expense`] exists, the
//! balance aggregator and the settlement planner are infallible.
//!
//! - [`InvalidExpense`] returned when an expense field is missing or malformed.
//! - [`DegenerateSplit`] returned when an expense has nobody to split with.
//! - [`InvalidAmount`] returned when a money string cannot be parsed.
//! - [`LedgerOverflow`] returned when a ledger's total would not fit in `i64`
//!   minor units.
//!
//!  [`InvalidExpense`]: EngineError::InvalidExpense
//!  [`DegenerateSplit`]: EngineError::DegenerateSplit
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`LedgerOverflow`]: EngineError::LedgerOverflow
//!  [`Expense`]: crate::Expense
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),
    #[error("Expense must be split among at least one participant")]
    DegenerateSplit,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Ledger total too large: {0}")]
    LedgerOverflow(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}
