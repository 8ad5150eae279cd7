//! Settlement planning.
//!
//! [`compute_settlements`] turns a [`BalanceMap`] into a list of payments that
//! brings every balance to zero, greedily matching the largest outstanding
//! creditor with the largest outstanding debtor. Each step zeroes at least one
//! party, so `N` non-zero participants need at most `N - 1` transfers. The
//! plan is not guaranteed to use the fewest possible transfers.

use serde::{Deserialize, Serialize};

use crate::{BalanceMap, Money};

/// A single payment instruction: `from` pays `amount` to `to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementTransfer {
    pub from: String,
    pub to: String,
    pub amount: Money,
}

struct Party<'a> {
    name: &'a str,
    remaining: Money,
}

/// Index of the party with the largest remaining amount; the earliest one
/// wins among equals.
fn largest(parties: &[Party<'_>]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (position, party) in parties.iter().enumerate() {
        match best {
            Some(current) if parties[current].remaining >= party.remaining => {}
            _ => best = Some(position),
        }
    }
    best
}

/// Recomputes the transfer plan from scratch.
///
/// Zero balances are ignored. Ties between equal amounts are broken by the
/// map's first-appearance order, so the plan is deterministic for a given
/// input. If the map does not sum to zero (only possible for hand-built maps),
/// the residual is left unsettled rather than emitted.
#[must_use]
pub fn compute_settlements(balances: &BalanceMap) -> Vec<SettlementTransfer> {
    let mut creditors: Vec<Party<'_>> = balances
        .creditors()
        .map(|b| Party {
            name: &b.participant,
            remaining: b.amount,
        })
        .collect();
    let mut debtors: Vec<Party<'_>> = balances
        .debtors()
        .map(|b| Party {
            name: &b.participant,
            remaining: -b.amount,
        })
        .collect();

    let mut transfers = Vec::new();
    while let (Some(c), Some(d)) = (largest(&creditors), largest(&debtors)) {
        let amount = creditors[c].remaining.min(debtors[d].remaining);

        transfers.push(SettlementTransfer {
            from: debtors[d].name.to_string(),
            to: creditors[c].name.to_string(),
            amount,
        });

        creditors[c].remaining -= amount;
        debtors[d].remaining -= amount;

        // `remove` keeps the remaining parties in order for the tie-break.
        if creditors[c].remaining.is_zero() {
            creditors.remove(c);
        }
        if debtors[d].remaining.is_zero() {
            debtors.remove(d);
        }
    }

    transfers
}
