//! # tally-core: Pure Business Logic for Tally
//!
//! This crate is the **heart** of Tally. It contains the back-office pricing,
//! tax and expense logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      tally-cli (binary)                         │   │
//! │  │    price, margin, expenses, card-fees, grid, remote, currency   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │    tax    │  │ expenses  │  │   grid    │  │   │
//! │  │   │  Engine   │  │ TaxRates  │  │ Summary   │  │ GridState │  │   │
//! │  │   │ Breakdown │  │Assessment │  │ CardFees  │  │ GridPage  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   tally-store (Repository Layer)                │   │
//! │  │              in-memory rows, REST rows, row table               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Percent, TaxCode, Product, Customer, Company)
//! - [`money`] - Money type over a fixed-point decimal (no floating point!)
//! - [`pricing`] - Revenue-target and cost-plus pricing engine
//! - [`tax`] - Flat tax application on a sale price
//! - [`binding`] - Price/margin editor where the last edited field wins
//! - [`currency`] - pt-BR currency formatting and parsing
//! - [`input`] - Sanitize-to-zero numeric input parsing
//! - [`expenses`] - Company expense summary and card fee estimate
//! - [`overview`] - Monthly sales vs cost series
//! - [`grid`] - Row filtering and pagination
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use tally_core::pricing::PricingEngine;
//! use tally_core::types::{CostInputs, Percent, TaxRates};
//! use tally_core::Money;
//!
//! let engine = PricingEngine::default(); // revenue target, 44.33% overhead
//! let costs = CostInputs::new(Money::new(dec!(100)));
//!
//! let quote = engine.quote(&costs, Percent::new(dec!(20)), &TaxRates::new());
//! assert_eq!(quote.sale_price.round_display(), Money::new(dec!(280.35)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod binding;
pub mod currency;
pub mod error;
pub mod expenses;
pub mod grid;
pub mod input;
pub mod money;
pub mod overview;
pub mod pricing;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{PriceBreakdown, PricingEngine};
pub use types::*;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fractional digits kept on every intermediate pricing value.
///
/// Derived fields feed each other (sale price → margin → overhead), so they
/// are all cut to the same scale before the next step reads them.
pub const CALC_SCALE: u32 = 9;

/// Fractional digits shown to the operator.
pub const DISPLAY_SCALE: u32 = 2;

/// Fixed administrative overhead, percent of the sale price.
pub const DEFAULT_OVERHEAD_PCT: Decimal = dec!(44.33);

/// Overhead used by the older product form.
///
/// Kept so quotes produced with that form can be reproduced; new quotes
/// should use [`DEFAULT_OVERHEAD_PCT`]. Selected with `PricingEngine::legacy()`
/// or `TALLY_OVERHEAD_PCT=legacy`.
pub const LEGACY_OVERHEAD_PCT: Decimal = dec!(93.19);

/// Share of revenue presumed to be profit under "Lucro Presumido".
pub const PRESUMED_PROFIT_PCT: Decimal = dec!(8);

/// IRPJ rate applied to the presumed profit.
pub const PRESUMED_IRPJ_PCT: Decimal = dec!(15);

/// Page sizes offered by the row grid.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 25];

/// Page size a fresh grid starts with.
pub const DEFAULT_ROWS_PER_PAGE: usize = 5;

/// Monthly sales goal drawn on the overview chart, in thousands of BRL.
pub const DEFAULT_MONTHLY_TARGET: Decimal = dec!(80);
