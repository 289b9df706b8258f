//! # Commands Module
//!
//! Every `tally` subcommand.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (dispatch, shared argument parsers)
//! ├── price.rs     ◄─── price, margin
//! ├── expenses.rs  ◄─── expenses, card-fees, overview
//! ├── grid.rs      ◄─── grid (filter + page rows from a file)
//! ├── remote.rs    ◄─── remote delete / update through the REST API
//! └── currency.rs  ◄─── currency format / parse / edit
//! ```
//!
//! Each command returns the text to print; `main` does the printing.

pub mod currency;
pub mod expenses;
pub mod grid;
pub mod price;
pub mod remote;

use clap::{Subcommand, ValueEnum};
use rust_decimal::Decimal;

use tally_core::input::optional_number;
use tally_core::types::Percent;
use tally_core::Money;

use crate::config::AppConfig;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Quote a sale price from cost, margin, overhead and taxes
    Price(price::PriceArgs),
    /// Margin implied by a sale price
    Margin(price::MarginArgs),
    /// Estimate monthly credit and debit card fees
    CardFees(expenses::CardFeesArgs),
    /// Summarize company expenses from a JSON file
    Expenses(expenses::ExpensesArgs),
    /// Monthly sales vs cost from a JSON file
    Overview(expenses::OverviewArgs),
    /// Filter and page customer or product rows from a JSON file
    Grid(grid::GridArgs),
    /// Change rows through the REST API
    Remote(remote::RemoteArgs),
    /// pt-BR currency conversions
    Currency(currency::CurrencyArgs),
}

/// Runs one command and returns what it prints.
pub async fn run(command: Command, config: &AppConfig) -> anyhow::Result<String> {
    match command {
        Command::Price(args) => price::price(&args, config),
        Command::Margin(args) => price::margin(&args, config),
        Command::CardFees(args) => expenses::card_fees(&args),
        Command::Expenses(args) => expenses::expenses(&args),
        Command::Overview(args) => expenses::overview(&args),
        Command::Grid(args) => grid::grid(&args, config).await,
        Command::Remote(args) => remote::remote(&args, config).await,
        Command::Currency(args) => Ok(currency::currency(&args)),
    }
}

/// Which kind of row a file or endpoint holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RowKind {
    #[default]
    Customers,
    Products,
}

// =============================================================================
// Argument Parsers
// =============================================================================

/// Accepts `12.5` or `12,5`.
pub fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    optional_number(raw).ok_or_else(|| format!("'{raw}' is not a number"))
}

pub fn parse_money(raw: &str) -> Result<Money, String> {
    parse_decimal(raw).map(Money::new)
}

pub fn parse_percent(raw: &str) -> Result<Percent, String> {
    parse_decimal(raw.trim_end_matches('%')).map(Percent::new)
}

/// `COLUMN=TEXT`.
pub fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((column, text)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), text.to_string()))
        }
        _ => Err(format!("'{raw}' is not COLUMN=TEXT")),
    }
}
