//! # Currency Commands
//!
//! `tally currency format | parse | edit`: the conversions a currency field
//! performs on blur, on input and on focus.

use clap::{Args, Subcommand};

use tally_core::currency::{edit_text, format_brl, parse_brl};
use tally_core::Money;

use super::parse_money;

#[derive(Debug, Args)]
pub struct CurrencyArgs {
    #[command(subcommand)]
    pub action: CurrencyAction,
}

#[derive(Debug, Subcommand)]
pub enum CurrencyAction {
    /// Number to display text (1234.5 → R$ 1.234,50)
    Format {
        #[arg(value_parser = parse_money, allow_negative_numbers = true)]
        value: Money,
    },
    /// Typed text to a number; unreadable text is 0
    Parse {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Number to the text shown while editing (empty for 0)
    Edit {
        #[arg(value_parser = parse_money, allow_negative_numbers = true)]
        value: Money,
    },
}

pub fn currency(args: &CurrencyArgs) -> String {
    match &args.action {
        CurrencyAction::Format { value } => format_brl(*value),
        CurrencyAction::Parse { text } => parse_brl(text).amount().normalize().to_string(),
        CurrencyAction::Edit { value } => edit_text(*value),
    }
}
