//! # Pricing Module
//!
//! Derives a sale price from cost, margin and overhead, and explains it.
//!
//! ## Revenue-Target Pricing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Margin AND overhead are percentages of the SALE PRICE, not of cost.   │
//! │                                                                         │
//! │     price = cost + margin% × price + overhead% × price                 │
//! │     price = cost / (1 - (margin% + overhead%))                         │
//! │                                                                         │
//! │  cost 100, margin 20%, overhead 44.33%                                 │
//! │     denominator = 1 - (0.20 + 0.4433) = 0.3567                         │
//! │     price       = 100 / 0.3567        = 280.35                         │
//! │                                                                         │
//! │  ┌──────────── 280.35 ─────────────────────────────────────────┐       │
//! │  │ cost 100.00 (35.67%) │ margin 56.07 (20%) │ overhead 124.28 │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │                                                                         │
//! │  margin% + overhead% ≥ 100%  →  no positive solution  →  price = 0     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cost-Plus Pricing
//! `price = cost × (1 + margin%)`, with the inverse
//! `margin% = (price - cost) / cost`. No overhead term.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{round_calc, Money};
use crate::tax::{apply_taxes, TaxAssessment};
use crate::types::{CostInputs, Percent, PricingMode, TaxCode, TaxRates};
use crate::{DEFAULT_OVERHEAD_PCT, LEGACY_OVERHEAD_PCT};

// =============================================================================
// Formula Building Blocks
// =============================================================================

/// `1 - (margin + overhead)` as fractions, at calculation scale.
fn cost_fraction(margin: Percent, overhead: Percent) -> Decimal {
    round_calc(Decimal::ONE - round_calc(margin.fraction() + overhead.fraction()))
}

/// Whether the revenue-target equation has a positive solution.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::pricing::is_computable;
/// use tally_core::types::Percent;
///
/// assert!(is_computable(Percent::new(dec!(20)), Percent::new(dec!(44.33))));
/// assert!(!is_computable(Percent::new(dec!(60)), Percent::new(dec!(44.33))));
/// assert!(!is_computable(Percent::new(dec!(50)), Percent::new(dec!(50))));
/// ```
pub fn is_computable(margin: Percent, overhead: Percent) -> bool {
    cost_fraction(margin, overhead) > Decimal::ZERO
}

/// Revenue-target sale price, or `None` when no price exists.
///
/// There is none when margin plus overhead reach 100% of revenue, when the
/// cost is negative, or when the quotient leaves the `Decimal` range.
pub fn try_sale_price(total_cost: Money, margin: Percent, overhead: Percent) -> Option<Money> {
    let denominator = cost_fraction(margin, overhead);
    if denominator <= Decimal::ZERO || total_cost.is_negative() {
        return None;
    }
    total_cost.checked_div(denominator).map(|price| price.round_calc())
}

/// Revenue-target sale price: `total_cost / (1 - (margin + overhead))`.
///
/// Returns zero wherever [`try_sale_price`] has no price. Callers must read
/// that zero as "not computable", never as a free product.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::pricing::compute_sale_price;
/// use tally_core::types::Percent;
/// use tally_core::Money;
///
/// let price = compute_sale_price(
///     Money::new(dec!(100)),
///     Percent::new(dec!(20)),
///     Percent::new(dec!(44.33)),
/// );
/// assert_eq!(price.round_display(), Money::new(dec!(280.35)));
/// ```
pub fn compute_sale_price(total_cost: Money, margin: Percent, overhead: Percent) -> Money {
    try_sale_price(total_cost, margin, overhead).unwrap_or_default()
}

/// Margin, overhead and markup for a price that is already known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Components {
    pub margin_amount: Money,
    pub overhead_amount: Money,
    pub markup: Decimal,
}

/// Splits a sale price into margin, overhead and markup.
///
/// The overhead is the residual `price - cost - margin`, so any rounding
/// lands in the overhead bucket and `cost + margin + overhead == price`
/// holds exactly.
pub fn breakdown(total_cost: Money, sale_price: Money, margin_fraction: Decimal) -> Components {
    let margin_amount = (sale_price * margin_fraction).round_calc();
    let overhead_amount = (sale_price - total_cost - margin_amount).round_calc();

    Components {
        margin_amount,
        overhead_amount,
        markup: sale_price.ratio_to(total_cost),
    }
}

/// Cost-plus sale price, or `None` for a negative cost or a product that
/// leaves the `Decimal` range.
fn try_cost_plus_price(cost: Money, margin: Percent) -> Option<Money> {
    if cost.is_negative() {
        return None;
    }
    cost.checked_mul(Decimal::ONE + margin.fraction())
        .map(|price| price.round_calc())
}

/// Cost-plus sale price: `cost × (1 + margin)`. Zero when there is none.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::pricing::cost_plus_price;
/// use tally_core::types::Percent;
/// use tally_core::Money;
///
/// let price = cost_plus_price(Money::new(dec!(100)), Percent::new(dec!(25)));
/// assert_eq!(price, Money::new(dec!(125)));
/// ```
pub fn cost_plus_price(cost: Money, margin: Percent) -> Money {
    try_cost_plus_price(cost, margin).unwrap_or_default()
}

/// Inverse of [`cost_plus_price`]: `(price - cost) / cost × 100`.
///
/// Returns zero margin when cost is not positive.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::pricing::margin_from_price;
/// use tally_core::Money;
///
/// let margin = margin_from_price(Money::new(dec!(100)), Money::new(dec!(150)));
/// assert_eq!(margin.value(), dec!(50));
/// ```
pub fn margin_from_price(cost: Money, sale_price: Money) -> Percent {
    (sale_price - cost).share_of(cost)
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Everything the pricing card shows, recomputed on every input change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub mode: PricingMode,

    pub acquisition_cost: Money,
    pub freight: Money,
    pub other_expenses: Money,
    /// `acquisition_cost + freight + other_expenses`.
    pub total_cost: Money,

    pub profit_margin_pct: Percent,
    /// Zero in cost-plus mode.
    pub overhead_pct: Percent,

    /// Price before taxes. Zero when not computable.
    pub sale_price: Money,
    pub margin_amount: Money,
    pub overhead_amount: Money,
    /// `sale_price / total_cost`, zero when total cost is zero.
    pub markup_multiplier: Decimal,

    /// Components as a share of the sale price.
    pub cost_share_pct: Percent,
    pub margin_share_pct: Percent,
    pub overhead_share_pct: Percent,

    pub tax_rates: TaxRates,
    pub tax_amounts: BTreeMap<TaxCode, Money>,
    pub total_taxes: Money,
    /// `sale_price + total_taxes`.
    pub final_price: Money,

    /// False when no sale price exists: margin plus overhead reach 100% of
    /// revenue, the total cost is negative, or the price overflows.
    pub computable: bool,
}

impl PriceBreakdown {
    /// Sum of the three components; equals `sale_price` by construction.
    pub fn components_total(&self) -> Money {
        self.total_cost + self.margin_amount + self.overhead_amount
    }
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// One pricing policy: an overhead percentage and a mode.
///
/// ## Usage
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::pricing::PricingEngine;
/// use tally_core::types::{CostInputs, Percent, TaxCode, TaxRates};
/// use tally_core::Money;
///
/// let engine = PricingEngine::cost_plus();
/// let taxes = TaxRates::new().with(TaxCode::Icms, Percent::new(dec!(10)));
///
/// let quote = engine.quote(
///     &CostInputs::new(Money::new(dec!(100))),
///     Percent::new(dec!(25)),
///     &taxes,
/// );
/// assert_eq!(quote.sale_price, Money::new(dec!(125)));
/// assert_eq!(quote.final_price, Money::new(dec!(137.5)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingEngine {
    overhead: Percent,
    mode: PricingMode,
}

impl Default for PricingEngine {
    /// Revenue-target pricing with the standard 44.33% overhead.
    fn default() -> Self {
        PricingEngine::revenue_target(Percent::new(DEFAULT_OVERHEAD_PCT))
    }
}

impl PricingEngine {
    /// Creates an engine with an explicit overhead and mode.
    pub const fn new(overhead: Percent, mode: PricingMode) -> Self {
        PricingEngine { overhead, mode }
    }

    /// Revenue-target engine with the given overhead.
    pub const fn revenue_target(overhead: Percent) -> Self {
        PricingEngine::new(overhead, PricingMode::RevenueTarget)
    }

    /// Revenue-target engine with the overhead of the older product form.
    pub const fn legacy() -> Self {
        PricingEngine::revenue_target(Percent::new(LEGACY_OVERHEAD_PCT))
    }

    /// Cost-plus engine (no overhead).
    pub const fn cost_plus() -> Self {
        PricingEngine::new(Percent::zero(), PricingMode::CostPlus)
    }

    pub const fn mode(&self) -> PricingMode {
        self.mode
    }

    /// Overhead actually applied: zero in cost-plus mode.
    pub fn overhead(&self) -> Percent {
        match self.mode {
            PricingMode::RevenueTarget => self.overhead,
            PricingMode::CostPlus => Percent::zero(),
        }
    }

    /// Whether this margin leaves room for a price at all, whatever the cost.
    pub fn is_computable(&self, margin: Percent) -> bool {
        match self.mode {
            PricingMode::RevenueTarget => is_computable(margin, self.overhead),
            PricingMode::CostPlus => true,
        }
    }

    /// Sale price under this engine's mode, or `None` when there is none.
    pub fn try_sale_price(&self, total_cost: Money, margin: Percent) -> Option<Money> {
        match self.mode {
            PricingMode::RevenueTarget => try_sale_price(total_cost, margin, self.overhead),
            PricingMode::CostPlus => try_cost_plus_price(total_cost, margin),
        }
    }

    /// Sale price for a cost and margin under this engine's mode.
    pub fn sale_price(&self, total_cost: Money, margin: Percent) -> Money {
        self.try_sale_price(total_cost, margin).unwrap_or_default()
    }

    /// Margin implied by a sale price the operator typed in.
    ///
    /// Revenue target: `(1 - cost / price) × 100 - overhead`; the result is
    /// negative when the price does not even cover cost plus overhead.
    /// Cost-plus: see [`margin_from_price`]. A non-positive price yields zero.
    pub fn margin_for_price(&self, total_cost: Money, sale_price: Money) -> Percent {
        if !sale_price.is_positive() {
            return Percent::zero();
        }
        match self.mode {
            PricingMode::RevenueTarget => {
                let cost_share = total_cost.share_of(sale_price).value();
                Percent::new(round_calc(
                    Decimal::ONE_HUNDRED
                        .saturating_sub(cost_share)
                        .saturating_sub(self.overhead.value()),
                ))
            }
            PricingMode::CostPlus => margin_from_price(total_cost, sale_price),
        }
    }

    /// Runs the full pipeline: total cost, sale price, components, taxes.
    ///
    /// Degenerate input never fails here: the sale price (and with it every
    /// derived amount) falls back to zero and `computable` is false. Use
    /// [`PricingEngine::try_quote`] to get an error instead.
    pub fn quote(&self, costs: &CostInputs, margin: Percent, taxes: &TaxRates) -> PriceBreakdown {
        let total_cost = costs.total().round_calc();
        let priced = costs
            .checked_total()
            .and_then(|total| self.try_sale_price(total.round_calc(), margin));
        let computable = priced.is_some();
        let sale_price = priced.unwrap_or_default();

        if !computable {
            warn!(
                margin = %margin.value(),
                overhead = %self.overhead.value(),
                total_cost = %total_cost.amount(),
                "No sale price for these inputs; sale price set to zero"
            );
        }

        let components = match self.mode {
            PricingMode::RevenueTarget => breakdown(total_cost, sale_price, margin.fraction()),
            // The whole markup on cost is margin; there is no overhead bucket.
            PricingMode::CostPlus => Components {
                margin_amount: (sale_price - total_cost).round_calc(),
                overhead_amount: Money::zero(),
                markup: sale_price.ratio_to(total_cost),
            },
        };

        // A zero price has no components to split.
        let components = if sale_price.is_zero() {
            Components {
                margin_amount: Money::zero(),
                overhead_amount: Money::zero(),
                markup: Decimal::ZERO,
            }
        } else {
            components
        };

        let TaxAssessment {
            amounts,
            total_taxes,
            final_price,
        } = apply_taxes(sale_price, taxes);

        debug!(
            mode = %self.mode,
            total_cost = %total_cost.amount(),
            sale_price = %sale_price.amount(),
            final_price = %final_price.amount(),
            "Computed price breakdown"
        );

        PriceBreakdown {
            mode: self.mode,
            acquisition_cost: costs.acquisition,
            freight: costs.freight,
            other_expenses: costs.other,
            total_cost,
            profit_margin_pct: margin,
            overhead_pct: self.overhead(),
            sale_price,
            margin_amount: components.margin_amount,
            overhead_amount: components.overhead_amount,
            markup_multiplier: components.markup,
            cost_share_pct: if sale_price.is_zero() {
                Percent::zero()
            } else {
                total_cost.share_of(sale_price)
            },
            margin_share_pct: components.margin_amount.share_of(sale_price),
            overhead_share_pct: components.overhead_amount.share_of(sale_price),
            tax_rates: taxes.clone(),
            tax_amounts: amounts,
            total_taxes,
            final_price,
            computable,
        }
    }

    /// Strict variant of [`PricingEngine::quote`].
    ///
    /// ## Errors
    /// - `ValidationError::Negative` for a negative cost component or margin
    /// - `CoreError::PricingUndefined` when margin plus overhead reach 100%
    /// - `CoreError::AmountOutOfRange` when the total cost or the price leaves
    ///   the `Decimal` range
    pub fn try_quote(
        &self,
        costs: &CostInputs,
        margin: Percent,
        taxes: &TaxRates,
    ) -> CoreResult<PriceBreakdown> {
        for (field, value) in [
            ("acquisition cost", costs.acquisition),
            ("freight", costs.freight),
            ("other expenses", costs.other),
        ] {
            if value.is_negative() {
                return Err(ValidationError::Negative {
                    field: field.to_string(),
                }
                .into());
            }
        }
        if margin.value() < Decimal::ZERO {
            return Err(ValidationError::Negative {
                field: "profit margin".to_string(),
            }
            .into());
        }
        if !self.is_computable(margin) {
            return Err(CoreError::PricingUndefined {
                margin_pct: margin.value(),
                overhead_pct: self.overhead.value(),
            });
        }
        if costs.checked_total().is_none() {
            return Err(CoreError::AmountOutOfRange {
                field: "total cost".to_string(),
            });
        }

        let quote = self.quote(costs, margin, taxes);
        if !quote.computable {
            return Err(CoreError::AmountOutOfRange {
                field: "sale price".to_string(),
            });
        }
        Ok(quote)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pct(value: Decimal) -> Percent {
        Percent::new(value)
    }

    fn money(value: Decimal) -> Money {
        Money::new(value)
    }

    #[test]
    fn test_revenue_target_scenario() {
        // cost 100, margin 20%, overhead 44.33% → 100 / 0.3567
        let price = compute_sale_price(money(dec!(100)), pct(dec!(20)), pct(dec!(44.33)));
        assert_eq!(price.amount(), dec!(280.347631063));
        assert_eq!(price.round_display().amount(), dec!(280.35));
    }

    #[test]
    fn test_over_hundred_percent_is_zero() {
        let price = compute_sale_price(money(dec!(100)), pct(dec!(60)), pct(dec!(44.33)));
        assert_eq!(price, Money::zero());

        // exactly 100% is just as undefined
        let price = compute_sale_price(money(dec!(100)), pct(dec!(55.67)), pct(dec!(44.33)));
        assert_eq!(price, Money::zero());
    }

    #[test]
    fn test_sale_price_satisfies_equation() {
        let cases = [
            (dec!(100), dec!(20), dec!(44.33)),
            (dec!(0), dec!(10), dec!(44.33)),
            (dec!(57.31), dec!(0), dec!(0)),
            (dec!(1234.56), dec!(35.5), dec!(44.33)),
            (dec!(9.99), dec!(5), dec!(93.19) - dec!(5)),
            (dec!(250000), dec!(12.75), dec!(30)),
        ];

        for (cost, margin, overhead) in cases {
            let price = compute_sale_price(money(cost), pct(margin), pct(overhead));
            let back = price.amount() * (Decimal::ONE - (margin + overhead) / dec!(100));
            assert!(
                (back - cost).abs() < dec!(0.000001),
                "cost {cost}, margin {margin}, overhead {overhead}: got {back}"
            );
        }
    }

    #[test]
    fn test_breakdown_sums_to_sale_price() {
        let cost = money(dec!(100));
        let price = compute_sale_price(cost, pct(dec!(20)), pct(dec!(44.33)));
        let parts = breakdown(cost, price, pct(dec!(20)).fraction());

        assert_eq!(parts.margin_amount.amount(), dec!(56.069526213));
        assert_eq!(parts.overhead_amount.amount(), dec!(124.27810485));
        assert_eq!(cost + parts.margin_amount + parts.overhead_amount, price);
        assert_eq!(parts.markup, dec!(2.803476311));
    }

    #[test]
    fn test_breakdown_zero_cost_has_zero_markup() {
        let parts = breakdown(Money::zero(), money(dec!(50)), dec!(0.1));
        assert_eq!(parts.markup, Decimal::ZERO);
    }

    #[test]
    fn test_cost_plus_round_trip() {
        let price = cost_plus_price(money(dec!(100)), pct(dec!(25)));
        assert_eq!(price.round_display().amount(), dec!(125.00));

        let margin = margin_from_price(money(dec!(100)), money(dec!(150)));
        assert_eq!(margin.value(), dec!(50));
    }

    #[test]
    fn test_margin_from_price_zero_cost() {
        assert!(margin_from_price(Money::zero(), money(dec!(10))).is_zero());
    }

    #[test]
    fn test_quote_full_pipeline() {
        let engine = PricingEngine::default();
        let costs = CostInputs::new(money(dec!(80)))
            .with_freight(money(dec!(15)))
            .with_other(money(dec!(5)));
        let taxes = TaxRates::new()
            .with(TaxCode::Icms, pct(dec!(4)))
            .with(TaxCode::Pis, pct(dec!(1.65)))
            .with(TaxCode::Cofins, pct(dec!(7.6)));

        let quote = engine.quote(&costs, pct(dec!(20)), &taxes);

        assert!(quote.computable);
        assert_eq!(quote.total_cost, money(dec!(100)));
        assert_eq!(quote.sale_price.round_display().amount(), dec!(280.35));
        assert_eq!(quote.components_total(), quote.sale_price);
        assert_eq!(quote.cost_share_pct.value().round_dp(2), dec!(35.67));
        assert_eq!(quote.margin_share_pct.value().round_dp(2), dec!(20.00));
        assert_eq!(quote.overhead_share_pct.value().round_dp(2), dec!(44.33));
        assert_eq!(quote.markup_multiplier.round_dp(2), dec!(2.80));
        assert_eq!(quote.final_price, quote.sale_price + quote.total_taxes);
        assert_eq!(quote.tax_amounts.len(), 3);
    }

    #[test]
    fn test_quote_degenerate_is_all_zero() {
        let engine = PricingEngine::default();
        let costs = CostInputs::new(money(dec!(100)));
        let taxes = TaxRates::new().with(TaxCode::Icms, pct(dec!(18)));

        let quote = engine.quote(&costs, pct(dec!(60)), &taxes);

        assert!(!quote.computable);
        assert_eq!(quote.sale_price, Money::zero());
        assert_eq!(quote.margin_amount, Money::zero());
        assert_eq!(quote.overhead_amount, Money::zero());
        assert_eq!(quote.markup_multiplier, Decimal::ZERO);
        assert_eq!(quote.final_price, Money::zero());
        assert!(quote.cost_share_pct.is_zero());
    }

    #[test]
    fn test_try_quote_rejects_degenerate() {
        let engine = PricingEngine::default();
        let costs = CostInputs::new(money(dec!(100)));

        let err = engine
            .try_quote(&costs, pct(dec!(60)), &TaxRates::new())
            .unwrap_err();
        assert!(matches!(err, CoreError::PricingUndefined { .. }));

        let err = engine
            .try_quote(
                &costs.with_freight(money(dec!(-1))),
                pct(dec!(10)),
                &TaxRates::new(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        assert!(engine
            .try_quote(&costs, pct(dec!(20)), &TaxRates::new())
            .is_ok());
    }

    #[test]
    fn test_cost_near_decimal_max_is_not_computable() {
        let big = money(dec!(50000000000000000000000000000));
        assert_eq!(
            compute_sale_price(big, pct(dec!(20)), pct(dec!(44.33))),
            Money::zero()
        );
        assert_eq!(try_sale_price(big, pct(dec!(20)), pct(dec!(44.33))), None);

        let engine = PricingEngine::default();
        let taxes = TaxRates::new().with(TaxCode::Icms, pct(dec!(18)));
        for costs in [CostInputs::new(big), CostInputs::new(big).with_freight(big)] {
            let quote = engine.quote(&costs, pct(dec!(20)), &taxes);
            assert!(!quote.computable);
            assert_eq!(quote.sale_price, Money::zero());
            assert_eq!(quote.final_price, Money::zero());
        }

        let cost_plus = PricingEngine::cost_plus();
        let quote = cost_plus.quote(&CostInputs::new(big), pct(dec!(100)), &taxes);
        assert!(!quote.computable);
        assert_eq!(quote.sale_price, Money::zero());
    }

    #[test]
    fn test_try_quote_rejects_amounts_out_of_range() {
        let engine = PricingEngine::default();
        let big = money(dec!(50000000000000000000000000000));

        let err = engine
            .try_quote(&CostInputs::new(big), pct(dec!(20)), &TaxRates::new())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Amount out of range: sale price is too large to price"
        );

        let err = engine
            .try_quote(
                &CostInputs::new(big).with_freight(big),
                pct(dec!(20)),
                &TaxRates::new(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::AmountOutOfRange { field } if field == "total cost"));
    }

    #[test]
    fn test_negative_cost_is_not_computable() {
        let costs = CostInputs::new(money(dec!(-100)));
        for engine in [PricingEngine::default(), PricingEngine::cost_plus()] {
            let quote = engine.quote(&costs, pct(dec!(20)), &TaxRates::new());
            assert!(!quote.computable);
            assert_eq!(quote.sale_price, Money::zero());
            assert_eq!(quote.margin_amount, Money::zero());
        }
    }

    #[test]
    fn test_legacy_overhead_leaves_little_room() {
        let engine = PricingEngine::legacy();
        assert_eq!(engine.overhead().value(), dec!(93.19));
        assert!(engine.is_computable(pct(dec!(6.8))));
        assert!(!engine.is_computable(pct(dec!(6.81))));
    }

    #[test]
    fn test_cost_plus_quote_has_no_overhead() {
        let engine = PricingEngine::cost_plus();
        let quote = engine.quote(
            &CostInputs::new(money(dec!(100))),
            pct(dec!(25)),
            &TaxRates::new(),
        );

        assert_eq!(quote.sale_price, money(dec!(125)));
        assert_eq!(quote.margin_amount, money(dec!(25)));
        assert_eq!(quote.overhead_amount, Money::zero());
        assert!(quote.overhead_pct.is_zero());
        assert_eq!(quote.markup_multiplier, dec!(1.25));
        assert_eq!(quote.components_total(), quote.sale_price);
    }

    #[test]
    fn test_margin_for_price_inverts_sale_price() {
        let engine = PricingEngine::default();
        let cost = money(dec!(100));
        let price = engine.sale_price(cost, pct(dec!(20)));

        let margin = engine.margin_for_price(cost, price);
        assert!((margin.value() - dec!(20)).abs() < dec!(0.000001));

        let cost_plus = PricingEngine::cost_plus();
        assert_eq!(cost_plus.margin_for_price(cost, money(dec!(150))).value(), dec!(50));
        assert!(engine.margin_for_price(cost, Money::zero()).is_zero());
    }
}
