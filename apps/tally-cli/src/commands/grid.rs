//! # Grid Command
//!
//! `tally grid` filters and pages customer or product rows the way the
//! list screens do.
//!
//! ```text
//! --file rows.json ──► Vec<T> ──► MemoryRepository ──► RowTable::load
//!                                                         │
//!           --per-page, --filter COLUMN=TEXT..., --page ──► GridState
//!                                                         │
//!                                                         ▼
//!                                               one page as a text table
//! ```

use anyhow::Context;
use clap::Args;
use std::fmt::{self, Write};
use std::path::PathBuf;
use tracing::warn;

use tally_core::grid::{Filterable, GridPage};
use tally_core::pricing::PricingEngine;
use tally_core::validation::{validate_customer, validate_product, ValidationResult};
use tally_core::{Customer, Product, DEFAULT_ROWS_PER_PAGE};
use tally_store::{Entity, MemoryRepository, RowTable};

use super::{parse_filter, RowKind};
use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct GridArgs {
    /// JSON file holding an array of rows
    #[arg(long)]
    pub file: PathBuf,

    #[arg(long, value_enum, default_value_t = RowKind::Customers)]
    pub kind: RowKind,

    /// Column filter, repeatable (e.g. --filter name=silva --filter location=SP)
    #[arg(long = "filter", value_name = "COLUMN=TEXT", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page: 5, 10 or 25
    #[arg(long, default_value_t = DEFAULT_ROWS_PER_PAGE)]
    pub per_page: usize,
}

/// A row kind the grid knows how to print.
trait GridRow: Entity + Filterable {
    const HEADERS: &'static [&'static str];

    fn cells(&self, engine: &PricingEngine) -> Vec<String>;

    fn validate(&self) -> ValidationResult<()>;
}

impl GridRow for Customer {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Email", "Phone", "Location", "Since"];

    fn cells(&self, _engine: &PricingEngine) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.location(),
            self.created_at.format("%d/%m/%Y").to_string(),
        ]
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_customer(self)
    }
}

impl GridRow for Product {
    const HEADERS: &'static [&'static str] = &["SKU", "Name", "Category", "Stock", "Cost", "Price"];

    fn cells(&self, engine: &PricingEngine) -> Vec<String> {
        let cost = self.costs.total();
        vec![
            self.sku.clone().unwrap_or_default(),
            self.name.clone(),
            self.category.clone().unwrap_or_default(),
            self.stock_quantity.to_string(),
            cost.to_string(),
            engine.sale_price(cost, self.profit_margin).to_string(),
        ]
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_product(self)
    }
}

pub async fn grid(args: &GridArgs, config: &AppConfig) -> anyhow::Result<String> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    match args.kind {
        RowKind::Customers => show::<Customer>(&raw, args, config).await,
        RowKind::Products => show::<Product>(&raw, args, config).await,
    }
}

async fn show<T: GridRow>(raw: &str, args: &GridArgs, config: &AppConfig) -> anyhow::Result<String> {
    let rows: Vec<T> =
        serde_json::from_str(raw).with_context(|| format!("Invalid {} rows", T::KIND))?;

    for row in &rows {
        if let Err(err) = row.validate() {
            warn!(kind = T::KIND, id = %row.id(), error = %err, "Row does not validate");
        }
    }

    let mut table = RowTable::load(MemoryRepository::with_rows(rows)).await?;
    let grid = table.grid_mut();
    grid.set_rows_per_page(args.per_page)?;
    for (column, text) in &args.filters {
        grid.set_filter(column.as_str(), text.as_str());
    }
    grid.set_page(args.page.saturating_sub(1));

    let engine = config.engine(None, None);
    Ok(render_page(&table.view(), &engine, table.grid().rows_per_page())?)
}

fn render_page<T: GridRow>(
    page: &GridPage<'_, T>,
    engine: &PricingEngine,
    per_page: usize,
) -> Result<String, fmt::Error> {
    if page.total_matches == 0 {
        return Ok("No rows match\n".to_string());
    }

    let cells: Vec<Vec<String>> = page.rows.iter().map(|row| row.cells(engine)).collect();
    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.chars().count()).collect();
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let headers: Vec<String> = T::HEADERS.iter().map(|h| h.to_string()).collect();
    push_line(&mut out, &headers, &widths)?;
    for line in &cells {
        push_line(&mut out, line, &widths)?;
    }
    out.push('\n');

    if page.rows.is_empty() {
        writeln!(out, "Page {} of {} is empty", page.page + 1, page.page_count)?;
    } else {
        let first = page.page * per_page + 1;
        let last = first + page.rows.len() - 1;
        writeln!(
            out,
            "Rows {first}-{last} of {}, page {} of {}",
            page.total_matches,
            page.page + 1,
            page.page_count
        )?;
    }
    Ok(out)
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) -> fmt::Result {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", line.join("  ").trim_end())
}

// =============================================================================
// Unit Tests
// =============================================================================
