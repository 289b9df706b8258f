//! # Price Commands
//!
//! `tally price` quotes a product; `tally margin` goes the other way.
//!
//! ## Quote Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  --cost --freight --other ──► CostInputs ──┐                           │
//! │  --margin                                  ├──► PricingEngine          │
//! │  --overhead / --mode (or TALLY_* config) ──┘        │                  │
//! │                                                     │                  │
//! │       --strict? ── yes ──► try_quote (error when no price exists)     │
//! │                 └─ no ───► quote     (price 0 + warning)              │
//! │                                                     │                  │
//! │  --tax CODE=PCT ... ──────────────────────────────► apply_taxes        │
//! │                                                     ▼                  │
//! │                                    text table  or  --json              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Args;
use serde_json::json;
use std::fmt::{self, Write};

use tally_core::binding::PriceEditor;
use tally_core::currency::format_decimal_br;
use tally_core::pricing::{is_computable, PriceBreakdown, PricingEngine};
use tally_core::types::{CostInputs, Percent, PricingMode, TaxCode, TaxRates};
use tally_core::{CoreError, Money};

use super::{parse_money, parse_percent};
use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct PriceArgs {
    /// Acquisition cost
    #[arg(long, value_parser = parse_money)]
    pub cost: Money,

    /// Freight cost
    #[arg(long, value_parser = parse_money, default_value = "0")]
    pub freight: Money,

    /// Other expenses attributed to the product
    #[arg(long, value_parser = parse_money, default_value = "0")]
    pub other: Money,

    /// Profit margin, percent
    #[arg(long, value_parser = parse_percent)]
    pub margin: Percent,

    /// Administrative overhead, percent [default: TALLY_OVERHEAD_PCT]
    #[arg(long, value_parser = parse_percent)]
    pub overhead: Option<Percent>,

    /// revenue-target or cost-plus [default: TALLY_PRICING_MODE]
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<PricingMode>,

    /// Tax on the sale price, repeatable (e.g. --tax icms=4 --tax pis=1,65)
    #[arg(long = "tax", value_name = "CODE=PCT", value_parser = parse_tax)]
    pub taxes: Vec<(TaxCode, Percent)>,

    /// Fail instead of printing a zero price
    #[arg(long)]
    pub strict: bool,

    /// Print the breakdown as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct MarginArgs {
    /// Total cost
    #[arg(long, value_parser = parse_money)]
    pub cost: Money,

    /// Sale price
    #[arg(long, value_parser = parse_money)]
    pub sale_price: Money,

    /// Pricing mode [default: cost-plus]
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<PricingMode>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn parse_mode(raw: &str) -> Result<PricingMode, String> {
    raw.parse().map_err(|err: CoreError| err.to_string())
}

/// `CODE=PCT`, e.g. `icms=4` or `irpj-adicional=10`.
pub fn parse_tax(raw: &str) -> Result<(TaxCode, Percent), String> {
    let (code, rate) = raw
        .split_once('=')
        .ok_or_else(|| format!("'{raw}' is not CODE=PCT"))?;
    let code: TaxCode = code.parse().map_err(|err: CoreError| err.to_string())?;
    Ok((code, parse_percent(rate)?))
}

// =============================================================================
// tally price
// =============================================================================

pub fn price(args: &PriceArgs, config: &AppConfig) -> anyhow::Result<String> {
    let engine = config.engine(args.mode, args.overhead);
    let costs = CostInputs::new(args.cost)
        .with_freight(args.freight)
        .with_other(args.other);
    let taxes: TaxRates = args.taxes.iter().copied().collect();

    let quote = if args.strict || config.strict_pricing {
        engine.try_quote(&costs, args.margin, &taxes)?
    } else {
        engine.quote(&costs, args.margin, &taxes)
    };

    if args.json {
        return Ok(serde_json::to_string_pretty(&quote)?);
    }
    Ok(render_quote(&quote)?)
}

fn row(out: &mut String, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(out, "{label:<18}{value}")
}

/// Why a quote has no sale price.
fn no_price_reason(quote: &PriceBreakdown) -> String {
    if quote.mode == PricingMode::RevenueTarget
        && !is_computable(quote.profit_margin_pct, quote.overhead_pct)
    {
        format!(
            "margin {} plus overhead {} reach 100% of revenue",
            quote.profit_margin_pct, quote.overhead_pct
        )
    } else if quote.total_cost.is_negative() {
        format!("total cost {} is negative", quote.total_cost)
    } else {
        format!("total cost {} is too large to price", quote.total_cost)
    }
}

/// Text rendering of a quote, amounts rounded for display.
pub fn render_quote(quote: &PriceBreakdown) -> Result<String, fmt::Error> {
    let mut out = String::new();

    row(&mut out, "Mode", quote.mode)?;
    row(&mut out, "Total cost", quote.total_cost)?;
    row(&mut out, "Profit margin", quote.profit_margin_pct)?;
    row(&mut out, "Overhead", quote.overhead_pct)?;
    out.push('\n');

    if !quote.computable {
        writeln!(
            out,
            "warning: {}; no price exists (use --strict to fail)",
            no_price_reason(quote)
        )?;
    }

    row(&mut out, "Sale price", quote.sale_price)?;
    row(
        &mut out,
        "  cost",
        format!("{}  ({})", quote.total_cost, quote.cost_share_pct),
    )?;
    row(
        &mut out,
        "  margin",
        format!("{}  ({})", quote.margin_amount, quote.margin_share_pct),
    )?;
    row(
        &mut out,
        "  overhead",
        format!("{}  ({})", quote.overhead_amount, quote.overhead_share_pct),
    )?;
    row(
        &mut out,
        "Markup",
        format!("{}x", format_decimal_br(quote.markup_multiplier, 2)),
    )?;

    if !quote.tax_amounts.is_empty() {
        out.push('\n');
        for (code, amount) in &quote.tax_amounts {
            let rate = quote.tax_rates.get(*code).unwrap_or_default();
            row(&mut out, &format!("{} {}", code.label(), rate), amount)?;
        }
        row(&mut out, "Total taxes", quote.total_taxes)?;
    }

    row(&mut out, "Final price", quote.final_price)?;
    Ok(out)
}

// =============================================================================
// tally margin
// =============================================================================

pub fn margin(args: &MarginArgs, config: &AppConfig) -> anyhow::Result<String> {
    let engine = match args.mode {
        Some(mode) => config.engine(Some(mode), None),
        None => PricingEngine::cost_plus(),
    };

    let mut editor = PriceEditor::new(engine, args.cost);
    editor.edit_sale_price(args.sale_price);

    if args.json {
        let body = json!({
            "mode": engine.mode(),
            "cost": editor.cost(),
            "sale_price": editor.sale_price(),
            "margin_pct": editor.margin(),
        });
        return Ok(serde_json::to_string_pretty(&body)?);
    }

    let mut out = String::new();
    row(&mut out, "Mode", engine.mode())?;
    row(&mut out, "Cost", editor.cost())?;
    row(&mut out, "Sale price", editor.sale_price())?;
    row(&mut out, "Margin", editor.margin())?;
    Ok(out)
}

// =============================================================================
// Unit Tests
// =============================================================================
