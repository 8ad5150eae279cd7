//! Balance aggregation.
//!
//! [`compute_balances`] folds a list of expenses into a [`BalanceMap`]: every
//! participant is debited their share of each expense and the payer is
//! credited the full amount. Shares are computed in minor units with
//! [`Money::split_even`], so the balances of a computed map always sum to
//! exactly zero.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::{Expense, Money, SettlementTransfer};

/// Net position of a participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    /// Others owe this participant.
    Creditor,
    /// This participant owes others.
    Debtor,
    Settled,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub participant: String,
    pub amount: Money,
}

impl Balance {
    #[must_use]
    pub fn status(&self) -> BalanceStatus {
        if self.amount.is_positive() {
            BalanceStatus::Creditor
        } else if self.amount.is_negative() {
            BalanceStatus::Debtor
        } else {
            BalanceStatus::Settled
        }
    }
}

/// Mapping from participant to signed net balance.
///
/// Iteration follows first-appearance order, which is also the tie-break
/// order used by the settlement planner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceMap {
    entries: Vec<Balance>,
    index: HashMap<String, usize>,
}

impl BalanceMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta` to the participant's balance, registering the participant
    /// on first sight.
    pub fn add(&mut self, participant: &str, delta: Money) {
        match self.index.get(participant) {
            Some(&position) => self.entries[position].amount += delta,
            None => {
                self.index
                    .insert(participant.to_string(), self.entries.len());
                self.entries.push(Balance {
                    participant: participant.to_string(),
                    amount: delta,
                });
            }
        }
    }

    #[must_use]
    pub fn get(&self, participant: &str) -> Option<Money> {
        self.index
            .get(participant)
            .map(|&position| self.entries[position].amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Balance> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances. Zero for any map produced by [`compute_balances`].
    #[must_use]
    pub fn total(&self) -> Money {
        self.entries.iter().map(|b| b.amount).sum()
    }

    /// `true` when nobody owes anything (including the empty map).
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.entries.iter().all(|b| b.amount.is_zero())
    }

    pub fn creditors(&self) -> impl Iterator<Item = &Balance> {
        self.entries.iter().filter(|b| b.amount.is_positive())
    }

    pub fn debtors(&self) -> impl Iterator<Item = &Balance> {
        self.entries.iter().filter(|b| b.amount.is_negative())
    }

    /// Applies a payment: the payer's debt shrinks and the receiver's credit
    /// shrinks by the same amount.
    pub fn apply(&mut self, transfer: &SettlementTransfer) {
        self.add(&transfer.from, transfer.amount);
        self.add(&transfer.to, -transfer.amount);
    }
}

impl FromIterator<(String, Money)> for BalanceMap {
    /// Repeated participants accumulate.
    fn from_iter<I: IntoIterator<Item = (String, Money)>>(iter: I) -> Self {
        let mut map = BalanceMap::new();
        for (participant, amount) in iter {
            map.add(&participant, amount);
        }
        map
    }
}

impl<'a> IntoIterator for &'a BalanceMap {
    type Item = &'a Balance;
    type IntoIter = std::slice::Iter<'a, Balance>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for BalanceMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}

/// Recomputes net balances from scratch.
///
/// For each expense, every participant is debited their share and the payer
/// is credited the full amount, whether or not the payer also participates
/// (in which case their own share nets out).
///
/// Assumes the sum of all expense amounts fits in `i64` minor units, which
/// [`Ledger::add_expense`](crate::Ledger::add_expense) guarantees; no balance
/// can then exceed that sum in absolute value.
#[must_use]
pub fn compute_balances(expenses: &[Expense]) -> BalanceMap {
    let mut balances = BalanceMap::new();
    for expense in expenses {
        for (participant, share) in expense.shares() {
            balances.add(participant, -share);
        }
        balances.add(expense.payer(), expense.amount());
    }
    balances
}
