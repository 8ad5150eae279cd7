//! Expense records.
//!
//! An [`Expense`] is one shared cost event: somebody (the payer) fronted
//! `amount`, and the cost is shared evenly by `participants`. The payer may or
//! may not be one of the participants.
//!
//! Expenses are validated once, in [`Expense::new`], and are immutable
//! afterwards. The balance aggregator relies on that: an expense with no
//! participants cannot exist, so splitting never divides by zero.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExpense")]
pub struct Expense {
    id: Uuid,
    description: String,
    amount: Money,
    payer: String,
    participants: Vec<String>,
}

/// Unvalidated shape used when deserializing, so loaded expenses go through
/// the same checks as freshly created ones.
#[derive(Deserialize)]
struct RawExpense {
    #[serde(default)]
    id: Option<Uuid>,
    description: String,
    amount: Money,
    payer: String,
    participants: Vec<String>,
}

impl TryFrom<RawExpense> for Expense {
    type Error = EngineError;

    fn try_from(raw: RawExpense) -> Result<Self, Self::Error> {
        let mut expense = Expense::new(raw.description, raw.amount, raw.payer, raw.participants)?;
        if let Some(id) = raw.id {
            expense.id = id;
        }
        Ok(expense)
    }
}

impl Expense {
    /// Creates a validated expense.
    ///
    /// - `description` and `payer` must be non-blank (they are stored trimmed)
    /// - `amount` must be strictly positive
    /// - `participants` must be non-empty, with no blank or repeated names
    ///
    /// Identifiers are opaque and case-sensitive: `"Anna"` and `"anna"` are two
    /// different participants.
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        payer: impl Into<String>,
        participants: Vec<String>,
    ) -> ResultEngine<Self> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(EngineError::InvalidExpense(
                "description must not be empty".to_string(),
            ));
        }
        if !amount.is_positive() {
            return Err(EngineError::InvalidExpense(format!(
                "amount must be > 0, got {amount}"
            )));
        }
        let payer = payer.into().trim().to_string();
        if payer.is_empty() {
            return Err(EngineError::InvalidExpense(
                "payer must not be empty".to_string(),
            ));
        }
        if participants.is_empty() {
            return Err(EngineError::DegenerateSplit);
        }
        for (index, name) in participants.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(EngineError::InvalidExpense(
                    "participant names must not be empty".to_string(),
                ));
            }
            if participants[..index].contains(name) {
                return Err(EngineError::InvalidExpense(format!(
                    "participant '{name}' listed more than once"
                )));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            description,
            amount,
            payer,
            participants,
        })
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Total cost of the expense (not the per-person share).
    #[must_use]
    pub fn amount(&self) -> Money {
        self.amount
    }

    #[must_use]
    pub fn payer(&self) -> &str {
        &self.payer
    }

    #[must_use]
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    /// Per-participant shares, in participant order.
    ///
    /// Shares differ by at most one minor unit and always sum to
    /// [`amount`](Self::amount); see [`Money::split_even`].
    pub fn shares(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.participants
            .iter()
            .map(String::as_str)
            .zip(self.amount.split_even(self.participants.len()))
    }
}
