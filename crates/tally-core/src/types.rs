//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Customer     │   │    Company      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (USR-010)   │   │  cnpj           │       │
//! │  │  sku            │   │  name, email    │   │  regime         │       │
//! │  │  costs          │   │  address        │   │  revenue        │       │
//! │  │  margin, taxes  │   │  created_at     │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Percent      │   │    TaxCode      │   │  PricingMode    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Decimal        │   │  Icms, Pis, ... │   │  RevenueTarget  │       │
//! │  │  44.33 = 44.33% │   │                 │   │  CostPlus       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::currency;
use crate::error::CoreError;
use crate::money::{round_calc, Money};

// =============================================================================
// Percent
// =============================================================================

/// A percentage, stored as the number shown to the operator.
///
/// `Percent::new(dec!(44.33))` is 44.33%, i.e. a fraction of 0.4433.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a percentage from its displayed value.
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Percent(value)
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(Decimal::ZERO)
    }

    /// Returns the displayed value (44.33 for 44.33%).
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the fraction (0.4433 for 44.33%) at calculation scale.
    #[inline]
    pub fn fraction(&self) -> Decimal {
        round_calc(self.0 / Decimal::ONE_HUNDRED)
    }

    /// Checks if the percentage is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

/// Shows the percentage the pt-BR way (`44,33%`).
impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", currency::format_decimal_br(self.0, crate::DISPLAY_SCALE))
    }
}

impl From<Decimal> for Percent {
    fn from(value: Decimal) -> Self {
        Percent(value)
    }
}

// =============================================================================
// Tax Codes
// =============================================================================

/// Brazilian taxes that appear on the product and company forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxCode {
    /// ICMS (state VAT on goods; withheld ICMS on the product form).
    Icms,
    /// ISS (municipal services tax).
    Iss,
    /// PIS contribution.
    Pis,
    /// COFINS contribution.
    Cofins,
    /// IRPJ corporate income tax.
    Irpj,
    /// IRPJ surcharge.
    IrpjAdicional,
    /// CSLL social contribution on net profit.
    Csll,
    /// Anything else the operator wants to add on top.
    Others,
}

impl TaxCode {
    /// Every tax code, in display order.
    pub const ALL: [TaxCode; 8] = [
        TaxCode::Icms,
        TaxCode::Iss,
        TaxCode::Pis,
        TaxCode::Cofins,
        TaxCode::Irpj,
        TaxCode::IrpjAdicional,
        TaxCode::Csll,
        TaxCode::Others,
    ];

    /// Machine name used on the command line and in JSON.
    pub const fn code(&self) -> &'static str {
        match self {
            TaxCode::Icms => "icms",
            TaxCode::Iss => "iss",
            TaxCode::Pis => "pis",
            TaxCode::Cofins => "cofins",
            TaxCode::Irpj => "irpj",
            TaxCode::IrpjAdicional => "irpj_adicional",
            TaxCode::Csll => "csll",
            TaxCode::Others => "others",
        }
    }

    /// Label shown to the operator.
    pub const fn label(&self) -> &'static str {
        match self {
            TaxCode::Icms => "ICMS",
            TaxCode::Iss => "ISS",
            TaxCode::Pis => "PIS",
            TaxCode::Cofins => "COFINS",
            TaxCode::Irpj => "IRPJ",
            TaxCode::IrpjAdicional => "IRPJ Adicional",
            TaxCode::Csll => "CSLL",
            TaxCode::Others => "Outros",
        }
    }
}

impl fmt::Display for TaxCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaxCode {
    type Err = CoreError;

    /// Accepts the machine name, case-insensitively, with `-` or `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        TaxCode::ALL
            .into_iter()
            .find(|code| code.code() == normalized)
            .ok_or_else(|| CoreError::UnknownTaxCode(s.to_string()))
    }
}

// =============================================================================
// Tax Rates
// =============================================================================

/// Tax rates keyed by code, each a percentage of the sale price.
///
/// Ordered by [`TaxCode`] so breakdowns always list taxes the same way.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRates(BTreeMap<TaxCode, Percent>);

impl TaxRates {
    /// Empty rate set.
    pub fn new() -> Self {
        TaxRates(BTreeMap::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, code: TaxCode, rate: Percent) -> Self {
        self.set(code, rate);
        self
    }

    /// Sets (or replaces) the rate for a code.
    pub fn set(&mut self, code: TaxCode, rate: Percent) {
        self.0.insert(code, rate);
    }

    /// Returns the rate for a code, if present.
    pub fn get(&self, code: TaxCode) -> Option<Percent> {
        self.0.get(&code).copied()
    }

    /// Iterates rates in code order.
    pub fn iter(&self) -> impl Iterator<Item = (TaxCode, Percent)> + '_ {
        self.0.iter().map(|(code, rate)| (*code, *rate))
    }

    /// Number of rates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if no rates are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(TaxCode, Percent)> for TaxRates {
    fn from_iter<I: IntoIterator<Item = (TaxCode, Percent)>>(iter: I) -> Self {
        TaxRates(iter.into_iter().collect())
    }
}

// =============================================================================
// Pricing Mode
// =============================================================================

/// How a sale price is derived from cost and margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingMode {
    /// Margin and overhead are both percentages of the sale price.
    /// `price = cost / (1 - (margin + overhead))`
    #[default]
    RevenueTarget,
    /// Margin is a percentage on top of cost.
    /// `price = cost × (1 + margin)`
    CostPlus,
}

impl PricingMode {
    /// Name used on the command line and in configuration.
    pub const fn name(&self) -> &'static str {
        match self {
            PricingMode::RevenueTarget => "revenue-target",
            PricingMode::CostPlus => "cost-plus",
        }
    }
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PricingMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "revenue-target" => Ok(PricingMode::RevenueTarget),
            "cost-plus" => Ok(PricingMode::CostPlus),
            _ => Err(CoreError::UnknownPricingMode(s.to_string())),
        }
    }
}

// =============================================================================
// Cost Inputs
// =============================================================================

/// What a product costs before margin and overhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostInputs {
    /// Purchase or production cost.
    pub acquisition: Money,
    /// Shipping cost.
    #[serde(default)]
    pub freight: Money,
    /// Anything else paid to get the product on the shelf.
    #[serde(default)]
    pub other: Money,
}

impl CostInputs {
    /// Acquisition cost only; freight and other expenses default to zero.
    pub fn new(acquisition: Money) -> Self {
        CostInputs {
            acquisition,
            freight: Money::zero(),
            other: Money::zero(),
        }
    }

    /// Sets freight.
    pub fn with_freight(mut self, freight: Money) -> Self {
        self.freight = freight;
        self
    }

    /// Sets other expenses.
    pub fn with_other(mut self, other: Money) -> Self {
        self.other = other;
        self
    }

    /// `acquisition + freight + other`, saturating at the `Decimal` bounds.
    #[inline]
    pub fn total(&self) -> Money {
        self.acquisition + self.freight + self.other
    }

    /// `acquisition + freight + other`, or `None` when the sum overflows.
    pub fn checked_total(&self) -> Option<Money> {
        self.acquisition
            .checked_add(self.freight)?
            .checked_add(self.other)
    }
}

// =============================================================================
// Tax Regime
// =============================================================================

/// Federal tax regime of the company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaxRegime {
    /// Simples Nacional.
    #[serde(rename = "Simples")]
    Simples,
    /// Lucro Real (actual profit).
    #[default]
    #[serde(rename = "Lucro Real")]
    LucroReal,
    /// Lucro Presumido (presumed profit).
    #[serde(rename = "Lucro Presumido")]
    LucroPresumido,
}

impl TaxRegime {
    /// Name shown to the operator.
    pub const fn label(&self) -> &'static str {
        match self {
            TaxRegime::Simples => "Simples",
            TaxRegime::LucroReal => "Lucro Real",
            TaxRegime::LucroPresumido => "Lucro Presumido",
        }
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaxRegime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "simples" => Ok(TaxRegime::Simples),
            "lucroreal" => Ok(TaxRegime::LucroReal),
            "lucropresumido" => Ok(TaxRegime::LucroPresumido),
            _ => Err(CoreError::UnknownTaxRegime(s.to_string())),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// Unit a product is sold in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "Un")]
    Un,
    #[serde(rename = "Kg")]
    Kg,
    #[serde(rename = "g")]
    G,
    #[serde(rename = "cx")]
    Cx,
    #[serde(rename = "pct")]
    Pct,
    #[serde(rename = "outro")]
    Other,
}

/// A product with everything needed to price it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Stock Keeping Unit - business identifier.
    #[serde(default)]
    pub sku: Option<String>,

    /// Barcode (EAN-13, UPC-A, etc.).
    #[serde(default)]
    pub barcode: Option<String>,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub supplier: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    /// Free-form collection name.
    #[serde(default)]
    pub collection: Option<String>,

    /// Variation grid (size, color, ...).
    #[serde(default)]
    pub variants: Option<String>,

    #[serde(default)]
    pub unit: Unit,

    /// Units in stock.
    #[serde(default)]
    pub stock_quantity: i64,

    #[serde(default)]
    pub weight_kg: Option<Decimal>,

    /// "W x H x D" in centimetres.
    #[serde(default)]
    pub dimensions_cm: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    /// Cost side of the price.
    #[serde(default)]
    pub costs: CostInputs,

    /// Desired profit margin.
    #[serde(default)]
    pub profit_margin: Percent,

    /// Taxes charged on top of the sale price.
    #[serde(default)]
    pub tax_rates: TaxRates,
}

impl Product {
    /// Creates a product with a fresh UUID and no pricing data.
    pub fn new(name: impl Into<String>) -> Self {
        Product {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            sku: None,
            barcode: None,
            brand: None,
            supplier: None,
            category: None,
            collection: None,
            variants: None,
            unit: Unit::default(),
            stock_quantity: 0,
            weight_kg: None,
            dimensions_cm: None,
            notes: None,
            costs: CostInputs::default(),
            profit_margin: Percent::zero(),
            tax_rates: TaxRates::new(),
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// Postal address of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Business identifier (e.g. `USR-010`).
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub address: Address,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// "City, ST" as shown in the customer list.
    pub fn location(&self) -> String {
        format!("{}, {}", self.address.city, self.address.state)
    }
}

// =============================================================================
// Company
// =============================================================================

/// The company the operator runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    /// CNPJ, digits only or formatted (`12.345.678/0001-95`).
    pub cnpj: String,
    #[serde(default)]
    pub regime: TaxRegime,
    #[serde(default)]
    pub monthly_revenue: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
