//! # Expense Commands
//!
//! `tally card-fees`, `tally expenses` and `tally overview`.
//!
//! `expenses` and `overview` read a JSON file. Amounts may be JSON numbers
//! or strings (`"1234.56"`); missing expense lines count as zero.
//!
//! ```json
//! {
//!   "company":   { "name": "Loja Centro", "cnpj": "11.222.333/0001-81",
//!                  "regime": "Lucro Presumido", "monthly_revenue": "100000" },
//!   "operating": { "rent": "5000", "credit_card_fees": "700", "debit_card_fees": "200" },
//!   "taxes":     { "icms": "4000" }
//! }
//! ```

use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use std::fmt::{self, Write};
use std::path::{Path, PathBuf};

use tally_core::expenses::{CardFeeEstimate, CompanyFinancials};
use tally_core::overview::SalesOverview;
use tally_core::types::Percent;
use tally_core::validation::validate_cnpj;
use tally_core::Money;
use tracing::warn;

use super::{parse_decimal, parse_money, parse_percent};

#[derive(Debug, Args)]
pub struct CardFeesArgs {
    /// Monthly revenue
    #[arg(long, value_parser = parse_money)]
    pub revenue: Money,

    /// Share of revenue paid by credit card, percent
    #[arg(long, value_parser = parse_percent)]
    pub credit_share: Percent,

    /// Credit card processing fee, percent
    #[arg(long, value_parser = parse_percent)]
    pub credit_fee: Percent,

    /// Share of revenue paid by debit card, percent
    #[arg(long, value_parser = parse_percent)]
    pub debit_share: Percent,

    /// Debit card processing fee, percent
    #[arg(long, value_parser = parse_percent)]
    pub debit_fee: Percent,
}

#[derive(Debug, Args)]
pub struct ExpensesArgs {
    /// JSON file with company, operating and taxes
    #[arg(long)]
    pub file: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct OverviewArgs {
    /// JSON file with `months` (and optionally `target`), in thousands of BRL
    #[arg(long)]
    pub file: PathBuf,

    /// Monthly sales target, overriding the file
    #[arg(long, value_parser = parse_decimal)]
    pub target: Option<Decimal>,
}

fn row(out: &mut String, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(out, "{label:<20}{value}")
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

// =============================================================================
// tally card-fees
// =============================================================================

pub fn card_fees(args: &CardFeesArgs) -> anyhow::Result<String> {
    let estimate = CardFeeEstimate {
        revenue: args.revenue,
        credit_share_pct: args.credit_share,
        credit_fee_pct: args.credit_fee,
        debit_share_pct: args.debit_share,
        debit_fee_pct: args.debit_fee,
    };
    let fees = estimate.compute();
    let other = estimate.other_share_pct();

    let mut out = String::new();
    row(&mut out, "Credit", fees.credit)?;
    row(&mut out, "Debit", fees.debit)?;
    row(&mut out, "Total fees", fees.total)?;
    row(&mut out, "Other payments", other)?;
    if other.value() < Decimal::ZERO {
        writeln!(out, "warning: credit and debit shares exceed 100% of revenue")?;
    }
    Ok(out)
}

// =============================================================================
// tally expenses
// =============================================================================

pub fn expenses(args: &ExpensesArgs) -> anyhow::Result<String> {
    let raw = read_file(&args.file)?;
    summarize_expenses(&raw, args.json)
}

/// Parses a financials document and renders its summary.
pub fn summarize_expenses(raw: &str, json: bool) -> anyhow::Result<String> {
    let financials: CompanyFinancials =
        serde_json::from_str(raw).context("Invalid company financials")?;

    if !financials.company.cnpj.is_empty() {
        if let Err(err) = validate_cnpj(&financials.company.cnpj) {
            warn!(cnpj = %financials.company.cnpj, error = %err, "Company CNPJ does not validate");
        }
    }

    let summary = financials.summary();
    if json {
        return Ok(serde_json::to_string_pretty(&summary)?);
    }

    let mut out = String::new();
    row(&mut out, "Company", &financials.company.name)?;
    row(&mut out, "Regime", &financials.company.regime)?;
    row(&mut out, "Revenue", summary.revenue)?;
    out.push('\n');
    row(&mut out, "Operating", summary.total_operating)?;
    row(&mut out, "Taxes", summary.total_taxes)?;
    row(
        &mut out,
        "Total expenses",
        format!("{}  ({} of revenue)", summary.total_expenses, summary.expense_ratio_pct),
    )?;
    row(&mut out, "Tax ratio", summary.tax_ratio_pct)?;
    row(&mut out, "Net result", summary.net_result)?;

    if summary.presumed_profit.is_positive() {
        out.push('\n');
        row(&mut out, "Presumed profit", summary.presumed_profit)?;
        row(&mut out, "Presumed IRPJ", summary.presumed_irpj)?;
    }
    Ok(out)
}

// =============================================================================
// tally overview
// =============================================================================

pub fn overview(args: &OverviewArgs) -> anyhow::Result<String> {
    let raw = read_file(&args.file)?;
    summarize_overview(&raw, args.target)
}

/// Parses an overview document and renders one line per month.
pub fn summarize_overview(raw: &str, target: Option<Decimal>) -> anyhow::Result<String> {
    let mut overview: SalesOverview = serde_json::from_str(raw).context("Invalid sales overview")?;
    if let Some(target) = target {
        overview = overview.with_target(target);
    }

    let mut out = String::new();
    writeln!(out, "{:<6}{:>10}{:>10}{:>10}", "Month", "Sales", "Cost", "Margin")?;
    for month in &overview.months {
        writeln!(
            out,
            "{:<6}{:>10}{:>10}{:>10}{}",
            month.label(),
            month.sales.to_string(),
            month.cost.to_string(),
            month.margin_pct().to_string(),
            if month.meets(overview.target) { "  *" } else { "" }
        )?;
    }
    out.push('\n');

    let hits = overview.months_meeting_target().len();
    writeln!(
        out,
        "Target {}k reached in {} of {} months",
        overview.target,
        hits,
        overview.months.len()
    )?;
    writeln!(
        out,
        "Totals: sales {}k, cost {}k, average margin {}",
        overview.total_sales(),
        overview.total_cost(),
        overview.average_margin()
    )?;
    Ok(out)
}

// =============================================================================
// Unit Tests
// =============================================================================
