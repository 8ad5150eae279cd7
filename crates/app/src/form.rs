use engine::{Currency, EngineError, Expense, Money};
use serde::Deserialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("please fill all fields ({0} is missing)")]
    MissingField(&'static str),
    #[error(transparent)]
    Invalid(#[from] EngineError),
}

/// Raw "add expense" input, exactly as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub description: String,
    pub amount: String,
    pub paid_by: String,
    /// Comma separated names.
    pub participants: String,
}

impl ExpenseForm {
    /// Validates the form and builds an [`Expense`].
    pub fn submit(&self, currency: Currency) -> Result<Expense, FormError> {
        build_expense(
            &self.description,
            &self.amount,
            &self.paid_by,
            self.participants.split(','),
            currency,
        )
    }
}

/// One expense as listed in an input file.
///
/// `amount` is in major units and may be a JSON number or string;
/// `participants` may be a list or a comma separated string.
#[derive(Debug, Deserialize)]
pub struct ExpenseRecord {
    pub description: String,
    pub amount: AmountField,
    #[serde(alias = "payer", alias = "paidBy")]
    pub paid_by: String,
    pub participants: ParticipantsField,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    Number(serde_json::Number),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ParticipantsField {
    List(Vec<String>),
    Text(String),
}

impl ExpenseRecord {
    pub fn into_expense(self, currency: Currency) -> Result<Expense, FormError> {
        let amount = match self.amount {
            AmountField::Number(number) => number.to_string(),
            AmountField::Text(text) => text,
        };
        match &self.participants {
            ParticipantsField::List(names) => build_expense(
                &self.description,
                &amount,
                &self.paid_by,
                names.iter().map(String::as_str),
                currency,
            ),
            ParticipantsField::Text(text) => build_expense(
                &self.description,
                &amount,
                &self.paid_by,
                text.split(','),
                currency,
            ),
        }
    }
}

/// Trims names, drops blanks and keeps the first occurrence of repeated
/// names.
pub fn normalize_participants<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut participants: Vec<String> = Vec::new();
    for name in names {
        let name = name.trim();
        if !name.is_empty() && !participants.iter().any(|p| p == name) {
            participants.push(name.to_string());
        }
    }
    participants
}

fn build_expense<'a>(
    description: &str,
    amount: &str,
    paid_by: &str,
    participants: impl IntoIterator<Item = &'a str>,
    currency: Currency,
) -> Result<Expense, FormError> {
    if description.trim().is_empty() {
        return Err(FormError::MissingField("description"));
    }
    if amount.trim().is_empty() {
        return Err(FormError::MissingField("amount"));
    }
    if paid_by.trim().is_empty() {
        return Err(FormError::MissingField("paid by"));
    }
    let participants = normalize_participants(participants);
    if participants.is_empty() {
        return Err(FormError::MissingField("participants"));
    }

    let amount = Money::parse_major(amount, currency)?;
    Ok(Expense::new(description, amount, paid_by, participants)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(description: &str, amount: &str, paid_by: &str, participants: &str) -> ExpenseForm {
        ExpenseForm {
            description: description.to_string(),
            amount: amount.to_string(),
            paid_by: paid_by.to_string(),
            participants: participants.to_string(),
        }
    }

    #[test]
    fn submit_builds_expense() {
        let expense = form("Groceries", "45.50", " Ravi ", " Ravi, Meena ,, Ravi,Joy ")
            .submit(Currency::Inr)
            .unwrap();
        assert_eq!(expense.description(), "Groceries");
        assert_eq!(expense.amount(), Money::new(4_550));
        assert_eq!(expense.payer(), "Ravi");
        assert_eq!(
            expense.participants(),
            &["Ravi".to_string(), "Meena".to_string(), "Joy".to_string()]
        );
    }

    #[test]
    fn submit_requires_every_field() {
        assert_eq!(
            form("", "10", "A", "A").submit(Currency::Inr),
            Err(FormError::MissingField("description"))
        );
        assert_eq!(
            form("x", " ", "A", "A").submit(Currency::Inr),
            Err(FormError::MissingField("amount"))
        );
        assert_eq!(
            form("x", "10", "", "A").submit(Currency::Inr),
            Err(FormError::MissingField("paid by"))
        );
        assert_eq!(
            form("x", "10", "A", " , ,").submit(Currency::Inr),
            Err(FormError::MissingField("participants"))
        );
    }

    #[test]
    fn submit_rejects_bad_amounts() {
        assert!(matches!(
            form("x", "ten", "A", "A").submit(Currency::Inr),
            Err(FormError::Invalid(EngineError::InvalidAmount(_)))
        ));
        assert!(matches!(
            form("x", "0", "A", "A").submit(Currency::Inr),
            Err(FormError::Invalid(EngineError::InvalidExpense(_)))
        ));
    }

    #[test]
    fn record_accepts_numbers_and_lists() {
        let record: ExpenseRecord = serde_json::from_str(
            r#"{"description":"Cab","amount":12.5,"paidBy":"A","participants":["A","B"]}"#,
        )
        .unwrap();
        let expense = record.into_expense(Currency::Eur).unwrap();
        assert_eq!(expense.amount(), Money::new(1_250));
        assert_eq!(expense.participants().len(), 2);

        let record: ExpenseRecord = serde_json::from_str(
            r#"{"description":"Cab","amount":"7","payer":"A","participants":"B, C"}"#,
        )
        .unwrap();
        let expense = record.into_expense(Currency::Eur).unwrap();
        assert_eq!(expense.amount(), Money::new(700));
        assert_eq!(expense.participants(), &["B".to_string(), "C".to_string()]);
    }
}
