use std::io::{self, Write};

use clap::Parser;
use engine::{Currency, Ledger};

use crate::{
    cli::{Cli, Command, SettleArgs},
    error::{AppError, Result},
    form::{ExpenseRecord, FormError},
    session::Session,
    settings::Settings,
};

mod cli;
mod error;
mod form;
mod render;
mod session;
mod settings;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli)?;

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(format!(
            "splitter={level},engine={level}",
            level = settings.level
        ))
        .init();

    let currency = settings.currency()?;
    tracing::debug!("using currency {currency}");

    match cli.command.unwrap_or(Command::Session) {
        Command::Session => {
            let stdin = io::stdin();
            let mut session = Session::new(Ledger::new(currency), stdin.lock(), io::stdout());
            session.run()?;
            tracing::info!(
                expenses = session.ledger().len(),
                "session closed, discarding ledger"
            );
        }
        Command::Settle(args) => settle(&args, currency)?,
    }

    Ok(())
}

fn settle(args: &SettleArgs, currency: Currency) -> Result<()> {
    let raw = std::fs::read_to_string(&args.file)?;
    let ledger = parse_ledger(&raw, currency)?;
    tracing::info!(
        "loaded {} expenses from {}",
        ledger.len(),
        args.file.display()
    );

    let mut out = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &ledger.summary())?;
        writeln!(out)?;
    } else {
        out.write_all(render::report(&ledger).as_bytes())?;
    }
    Ok(())
}

/// Builds a ledger from a JSON array of expense records; the first invalid
/// record aborts with its 1-based position.
fn parse_ledger(raw: &str, currency: Currency) -> Result<Ledger> {
    let records: Vec<ExpenseRecord> = serde_json::from_str(raw)?;
    let mut ledger = Ledger::new(currency);
    for (position, record) in records.into_iter().enumerate() {
        let record_error = |source| AppError::Record {
            index: position + 1,
            source,
        };
        let expense = record.into_expense(currency).map_err(record_error)?;
        ledger
            .add_expense(expense)
            .map_err(|err| record_error(FormError::Invalid(err)))?;
    }
    Ok(ledger)
}
