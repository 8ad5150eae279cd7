use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "splitter")]
#[command(about = "Split shared expenses and work out who pays whom")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the ledger currency (INR, EUR, USD).
    #[arg(long, global = true)]
    pub currency: Option<String>,
    /// Override the log level (e.g. `info`, `debug`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive session with an in-memory ledger (default).
    Session,
    /// Print balances and settlements for the expenses in a JSON file.
    Settle(SettleArgs),
}

#[derive(Debug, Args)]
pub struct SettleArgs {
    /// JSON array of expenses.
    #[arg(long, short)]
    pub file: PathBuf,
    /// Emit the summary as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}
