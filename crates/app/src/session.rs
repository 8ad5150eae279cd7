//! Interactive session: one in-memory [`Ledger`] fed from a line-oriented
//! prompt. The ledger lives as long as the session and is dropped with it.

use std::io::{BufRead, Write};

use engine::Ledger;

use crate::{
    error::Result,
    form::{ExpenseForm, FormError},
    render,
};

const HELP: &str = "\
Commands:
  add       record a new expense
  list      show all expenses
  balances  show who owes and who is owed
  settle    show the payments that settle everyone up
  summary   show everything
  help      show this message
  quit      leave the session
";

pub struct Session<R, W> {
    ledger: Ledger,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(ledger: Ledger, input: R, output: W) -> Self {
        Self {
            ledger,
            input,
            output,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "Expense splitter ({}). Type `help` for commands.",
            self.ledger.currency()
        )?;
        while let Some(line) = self.prompt("> ")? {
            match line.trim() {
                "" => {}
                "add" => {
                    if !self.add()? {
                        break;
                    }
                }
                "list" => {
                    let text = render::expenses(self.ledger.expenses(), self.ledger.currency());
                    self.output.write_all(text.as_bytes())?;
                }
                "balances" => {
                    let text = render::balances(&self.ledger.balances(), self.ledger.currency());
                    self.output.write_all(text.as_bytes())?;
                }
                "settle" => {
                    let text =
                        render::settlements(&self.ledger.settlements(), self.ledger.currency());
                    self.output.write_all(text.as_bytes())?;
                }
                "summary" => {
                    self.output.write_all(render::report(&self.ledger).as_bytes())?;
                }
                "help" => self.output.write_all(HELP.as_bytes())?,
                "quit" | "exit" => break,
                other => {
                    tracing::debug!("unknown session command: {other}");
                    writeln!(self.output, "Unknown command `{other}`. Type `help`.")?;
                }
            }
        }
        self.output.flush()?;
        Ok(())
    }

    /// Prompts for the four form fields. Returns `false` if input ended
    /// before the form was complete.
    fn add(&mut self) -> Result<bool> {
        let mut fields: [String; 4] = Default::default();
        let prompts = [
            "Description: ",
            "Amount: ",
            "Paid by: ",
            "Participants (comma separated): ",
        ];
        for (field, prompt) in fields.iter_mut().zip(prompts) {
            match self.prompt(prompt)? {
                Some(value) => *field = value,
                None => return Ok(false),
            }
        }
        let [description, amount, paid_by, participants] = fields;
        let form = ExpenseForm {
            description,
            amount,
            paid_by,
            participants,
        };

        let added = form
            .submit(self.ledger.currency())
            .and_then(|expense| self.ledger.add_expense(expense).map_err(FormError::from));
        match added {
            Ok(()) => writeln!(self.output, "Expense added successfully.")?,
            Err(err) => {
                tracing::info!("rejected expense form: {err}");
                writeln!(self.output, "Error: {err}")?;
            }
        }
        Ok(true)
    }

    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use engine::{Currency, Money};

    use super::*;

    fn run(script: &str) -> (Ledger, String) {
        let mut output = Vec::new();
        let mut session = Session::new(
            Ledger::new(Currency::Inr),
            Cursor::new(script.as_bytes()),
            &mut output,
        );
        session.run().unwrap();
        let ledger = session.ledger().clone();
        drop(session);
        (ledger, String::from_utf8(output).unwrap())
    }

    #[test]
    fn add_then_settle() {
        let (ledger, out) = run("add\nDinner\n300\nA\nA, B, C\nsettle\nquit\n");
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total_spent(), Money::new(30_000));
        assert!(out.contains("Expense added successfully."));
        assert!(out.contains("B pays ₹100.00 to A"));
        assert!(out.contains("C pays ₹100.00 to A"));
    }

    #[test]
    fn invalid_form_leaves_ledger_untouched() {
        let (ledger, out) = run("add\nDinner\n-5\nA\nA, B\nlist\n");
        assert!(ledger.is_empty());
        assert!(out.contains("Error: Invalid expense"));
        assert!(out.contains("No expenses yet."));
    }

    #[test]
    fn expense_overflowing_the_ledger_is_refused() {
        let (ledger, out) = run(
            "add\nYacht\n50000000000000000\nA\nQ\n\
             add\nYacht\n50000000000000000\nA\nQ\n\
             balances\n",
        );
        assert_eq!(ledger.len(), 1);
        assert!(out.contains("Error: Ledger total too large"));
        assert!(out.contains("A should receive ₹50000000000000000.00"));
    }

    #[test]
    fn truncated_form_ends_session() {
        let (ledger, _) = run("add\nDinner\n300\n");
        assert!(ledger.is_empty());
    }

    #[test]
    fn unknown_commands_are_reported() {
        let (_, out) = run("frobnicate\nbalances\n");
        assert!(out.contains("Unknown command `frobnicate`"));
        assert!(out.contains("No balances to calculate yet."));
    }
}
