//! The `Ledger` holds the expenses of one group. It is owned by the caller,
//! append-only, and derives balances and settlements on demand.
//!
//! The sum of all expense amounts always fits in `i64` minor units. No
//! balance can exceed that sum in absolute value, so aggregation never
//! overflows.

use serde::{Deserialize, Serialize};

use crate::{
    BalanceMap, Currency, EngineError, Expense, Money, ResultEngine, SettlementTransfer,
    compute_balances, compute_settlements,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLedger")]
pub struct Ledger {
    currency: Currency,
    expenses: Vec<Expense>,
}

#[derive(Deserialize)]
struct RawLedger {
    #[serde(default)]
    currency: Currency,
    expenses: Vec<Expense>,
}

impl TryFrom<RawLedger> for Ledger {
    type Error = EngineError;

    fn try_from(raw: RawLedger) -> Result<Self, Self::Error> {
        let mut ledger = Ledger::new(raw.currency);
        for expense in raw.expenses {
            ledger.add_expense(expense)?;
        }
        Ok(ledger)
    }
}

/// Everything a caller needs to render the state of a ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub currency: Currency,
    pub total_spent: Money,
    pub balances: BalanceMap,
    pub settlements: Vec<SettlementTransfer>,
}

impl Ledger {
    #[must_use]
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            expenses: Vec::new(),
        }
    }

    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Appends an expense.
    ///
    /// Fails with [`EngineError::LedgerOverflow`] if the ledger total would no
    /// longer fit in `i64` minor units; the ledger is left unchanged.
    pub fn add_expense(&mut self, expense: Expense) -> ResultEngine<()> {
        if self.total_spent().checked_add(expense.amount()).is_none() {
            return Err(EngineError::LedgerOverflow(format!(
                "cannot add {} to {}",
                expense.amount(),
                self.total_spent()
            )));
        }
        tracing::debug!(
            id = %expense.id(),
            payer = expense.payer(),
            amount = expense.amount().minor(),
            participants = expense.participants().len(),
            "expense recorded"
        );
        self.expenses.push(expense);
        Ok(())
    }

    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Distinct participants and payers, in first-appearance order.
    #[must_use]
    pub fn participants(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for expense in &self.expenses {
            let names = expense
                .participants()
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(expense.payer()));
            for name in names {
                if !seen.contains(&name) {
                    seen.push(name);
                }
            }
        }
        seen
    }

    /// Sum of all expense amounts.
    #[must_use]
    pub fn total_spent(&self) -> Money {
        self.expenses.iter().map(Expense::amount).sum()
    }

    #[must_use]
    pub fn balances(&self) -> BalanceMap {
        compute_balances(&self.expenses)
    }

    #[must_use]
    pub fn settlements(&self) -> Vec<SettlementTransfer> {
        compute_settlements(&self.balances())
    }

    #[must_use]
    pub fn summary(&self) -> LedgerSummary {
        let balances = self.balances();
        let settlements = compute_settlements(&balances);
        tracing::trace!(
            expenses = self.expenses.len(),
            participants = balances.len(),
            transfers = settlements.len(),
            "ledger summary computed"
        );
        LedgerSummary {
            currency: self.currency,
            total_spent: self.total_spent(),
            balances,
            settlements,
        }
    }
}
