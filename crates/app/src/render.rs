//! Plain-text views of a ledger: the expense table, the per-person summary and
//! the settlement plan.

use engine::{BalanceMap, BalanceStatus, Currency, Expense, Ledger, SettlementTransfer};

const HEADERS: [&str; 4] = ["Description", "Amount", "Paid By", "Participants"];

/// Joins lines, terminating each one with a newline.
fn block(lines: impl IntoIterator<Item = String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

pub fn expenses(expenses: &[Expense], currency: Currency) -> String {
    if expenses.is_empty() {
        return "No expenses yet.\n".to_string();
    }

    let rows: Vec<[String; 4]> = expenses
        .iter()
        .map(|expense| {
            [
                expense.description().to_string(),
                expense.amount().format(currency),
                expense.payer().to_string(),
                expense.participants().join(", "),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let header = table_row(&HEADERS.map(String::from), &widths);
    block(
        [header, rule.join("-+-")]
            .into_iter()
            .chain(rows.iter().map(|row| table_row(row, &widths))),
    )
}

fn table_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    padded.join(" | ").trim_end().to_string()
}

pub fn balances(balances: &BalanceMap, currency: Currency) -> String {
    if balances.is_empty() {
        return "No balances to calculate yet.\n".to_string();
    }

    block(balances.iter().map(|balance| {
        let name = &balance.participant;
        let amount = balance.amount.abs().format(currency);
        match balance.status() {
            BalanceStatus::Creditor => format!("{name} should receive {amount}"),
            BalanceStatus::Debtor => format!("{name} owes {amount}"),
            BalanceStatus::Settled => format!("{name} is settled up"),
        }
    }))
}

pub fn settlements(transfers: &[SettlementTransfer], currency: Currency) -> String {
    if transfers.is_empty() {
        return "Everyone is settled up!\n".to_string();
    }

    block(transfers.iter().map(|transfer| {
        format!(
            "{} pays {} to {}",
            transfer.from,
            transfer.amount.format(currency),
            transfer.to
        )
    }))
}

/// Full report: expenses, summary and settlements under section headings.
pub fn report(ledger: &Ledger) -> String {
    let currency = ledger.currency();
    let summary = ledger.summary();

    let mut out = String::from("== Expenses ==\n");
    out.push_str(&expenses(ledger.expenses(), currency));
    if !ledger.is_empty() {
        out.push_str(&format!("Total: {}\n", summary.total_spent.format(currency)));
    }
    out.push_str("\n== Summary ==\n");
    out.push_str(&balances(&summary.balances, currency));
    out.push_str("\n== Settlements ==\n");
    out.push_str(&settlements(&summary.settlements, currency));
    out
}

#[cfg(test)]
mod tests {
    use engine::Money;

    use super::*;

    fn ledger() -> Ledger {
        let mut ledger = Ledger::new(Currency::Inr);
        ledger.add_expense(
            Expense::new(
                "Dinner",
                Money::new(30_000),
                "A",
                vec!["A".into(), "B".into(), "C".into()],
            )
            .unwrap(),
        )
        .unwrap();
        ledger
    }

    #[test]
    fn empty_views_have_placeholders() {
        let ledger = Ledger::new(Currency::Inr);
        assert_eq!(expenses(ledger.expenses(), Currency::Inr), "No expenses yet.\n");
        assert_eq!(
            balances(&ledger.balances(), Currency::Inr),
            "No balances to calculate yet.\n"
        );
        assert_eq!(settlements(&[], Currency::Inr), "Everyone is settled up!\n");
    }

    #[test]
    fn expense_table_is_aligned() {
        let ledger = ledger();
        let table = expenses(ledger.expenses(), Currency::Inr);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Description | Amount  | Paid By | Participants");
        assert_eq!(lines[2], "Dinner      | ₹300.00 | A       | A, B, C");
    }

    #[test]
    fn balance_lines_describe_each_person() {
        let mut ledger = ledger();
        ledger.add_expense(
            Expense::new("Tea", Money::new(100), "D", vec!["D".into()]).unwrap(),
        )
        .unwrap();
        let text = balances(&ledger.balances(), Currency::Inr);
        assert_eq!(
            text,
            "A should receive ₹200.00\nB owes ₹100.00\nC owes ₹100.00\nD is settled up\n"
        );
    }

    #[test]
    fn settlement_lines_end_with_newlines() {
        let plan = ledger().settlements();
        assert_eq!(
            settlements(&plan, Currency::Eur),
            "B pays €100.00 to A\nC pays €100.00 to A\n"
        );
    }

    #[test]
    fn report_lists_transfers() {
        let text = report(&ledger());
        assert!(text.contains("Total: ₹300.00"));
        assert!(text.contains("B pays ₹100.00 to A\n"));
        assert!(text.contains("C pays ₹100.00 to A\n"));
    }
}
