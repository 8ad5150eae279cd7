//! Ledger-and-settlement engine for shared expenses.
//!
//! The engine is a pair of pure functions plus the types they exchange:
//!
//! - [`compute_balances`] folds a list of [`Expense`]s into a [`BalanceMap`]
//! - [`compute_settlements`] turns a [`BalanceMap`] into the
//!   [`SettlementTransfer`]s that zero it
//!
//! [`Ledger`] is a convenience owner of an append-only expense list for
//! callers that don't keep their own. All amounts are integer minor units
//! ([`Money`]), so "settled" means exactly zero.
//!
//! ```rust
//! use engine::{Currency, Expense, Ledger, Money};
//!
//! let mut ledger = Ledger::new(Currency::Inr);
//! ledger.add_expense(Expense::new(
//!     "Dinner",
//!     Money::parse_major("300", Currency::Inr).unwrap(),
//!     "A",
//!     vec!["A".into(), "B".into(), "C".into()],
//! ).unwrap()).unwrap();
//!
//! let plan = ledger.settlements();
//! assert_eq!(plan.len(), 2);
//! assert!(plan.iter().all(|t| t.to == "A"));
//! ```

pub use balances::{Balance, BalanceMap, BalanceStatus, compute_balances};
pub use currency::Currency;
pub use error::EngineError;
pub use expense::Expense;
pub use ledger::{Ledger, LedgerSummary};
pub use money::Money;
pub use settlement::{SettlementTransfer, compute_settlements};

mod balances;
mod currency;
mod error;
mod expense;
mod ledger;
mod money;
mod settlement;

pub type ResultEngine<T> = Result<T, EngineError>;
