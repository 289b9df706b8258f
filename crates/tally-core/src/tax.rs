//! # Tax Module
//!
//! Flat tax application on top of a sale price.
//!
//! ## Model
//! ```text
//! sale price 280.35
//!   ├── ICMS   4.00% → 11.21
//!   ├── PIS    1.65% →  4.63
//!   └── COFINS 7.60% → 21.31
//! final price = 280.35 + 37.15 = 317.50
//! ```
//!
//! Every tax is computed against the sale price, never against the price
//! with other taxes already added (no cascading).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::money::Money;
use crate::types::{TaxCode, TaxRates};

/// Result of applying a rate set to a sale price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAssessment {
    /// One amount per rate, `sale_price × rate / 100`.
    pub amounts: BTreeMap<TaxCode, Money>,
    /// Sum of `amounts`.
    pub total_taxes: Money,
    /// `sale_price + total_taxes`.
    pub final_price: Money,
}

/// Applies every rate to `sale_price`.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::tax::apply_taxes;
/// use tally_core::types::{Percent, TaxCode, TaxRates};
/// use tally_core::Money;
///
/// let rates = TaxRates::new().with(TaxCode::Icms, Percent::new(dec!(4)));
/// let taxes = apply_taxes(Money::new(dec!(280.35)), &rates);
///
/// assert_eq!(taxes.amounts[&TaxCode::Icms].round_display(), Money::new(dec!(11.21)));
/// assert_eq!(taxes.final_price, Money::new(dec!(291.564)));
/// ```
pub fn apply_taxes(sale_price: Money, rates: &TaxRates) -> TaxAssessment {
    let amounts: BTreeMap<TaxCode, Money> = rates
        .iter()
        .map(|(code, rate)| (code, sale_price.percent(rate)))
        .collect();

    let total_taxes: Money = amounts.values().sum();

    TaxAssessment {
        amounts,
        total_taxes,
        final_price: sale_price + total_taxes,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Percent;
    use rust_decimal_macros::dec;

    fn brazil_rates() -> TaxRates {
        TaxRates::new()
            .with(TaxCode::Icms, Percent::new(dec!(4)))
            .with(TaxCode::Pis, Percent::new(dec!(1.65)))
            .with(TaxCode::Cofins, Percent::new(dec!(7.6)))
    }

    #[test]
    fn test_icms_pis_cofins() {
        let taxes = apply_taxes(Money::new(dec!(280.35)), &brazil_rates());

        let shown = |code| taxes.amounts[&code].round_display().amount();
        assert_eq!(shown(TaxCode::Icms), dec!(11.21));
        assert_eq!(shown(TaxCode::Pis), dec!(4.63));
        assert_eq!(shown(TaxCode::Cofins), dec!(21.31));

        assert_eq!(taxes.total_taxes.amount(), dec!(37.146375));
        assert_eq!(taxes.final_price.amount(), dec!(317.496375));
        assert_eq!(taxes.final_price.round_display().amount(), dec!(317.50));
    }

    #[test]
    fn test_final_price_is_exact_sum() {
        let sale = Money::new(dec!(123.456789));
        let taxes = apply_taxes(sale, &brazil_rates());
        let sum: Money = taxes.amounts.values().sum();
        assert_eq!(taxes.final_price, sale + sum);
    }

    #[test]
    fn test_doubling_a_rate_doubles_its_amount() {
        let sale = Money::new(dec!(199.90));
        let base = apply_taxes(sale, &brazil_rates());

        let doubled_rates = brazil_rates().with(TaxCode::Pis, Percent::new(dec!(3.30)));
        let doubled = apply_taxes(sale, &doubled_rates);

        assert_eq!(
            doubled.amounts[&TaxCode::Pis],
            base.amounts[&TaxCode::Pis] * dec!(2)
        );
        assert_eq!(doubled.amounts[&TaxCode::Icms], base.amounts[&TaxCode::Icms]);
    }

    #[test]
    fn test_no_cascading() {
        // The second tax must not see the first one.
        let rates = TaxRates::new()
            .with(TaxCode::Icms, Percent::new(dec!(10)))
            .with(TaxCode::Others, Percent::new(dec!(10)));
        let taxes = apply_taxes(Money::new(dec!(100)), &rates);

        assert_eq!(taxes.amounts[&TaxCode::Others], Money::new(dec!(10)));
        assert_eq!(taxes.final_price, Money::new(dec!(120)));
    }

    #[test]
    fn test_no_rates() {
        let taxes = apply_taxes(Money::new(dec!(50)), &TaxRates::new());
        assert!(taxes.amounts.is_empty());
        assert_eq!(taxes.total_taxes, Money::zero());
        assert_eq!(taxes.final_price, Money::new(dec!(50)));
    }
}
