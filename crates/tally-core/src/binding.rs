//! # Price/Margin Binding
//!
//! The product form shows both a margin and a sale price, and the operator
//! may type into either. Each edit derives exactly one other field:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator edits        Field recomputed        last_edited             │
//! │  ───────────────       ────────────────        ───────────             │
//! │  margin %        ────► sale price              Margin                  │
//! │  sale price      ────► margin %                SalePrice               │
//! │  cost            ────► the field NOT in last_edited                    │
//! │                                                                         │
//! │  A derived value never triggers another derivation, so the two        │
//! │  fields cannot chase each other.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::pricing::PricingEngine;
use crate::types::Percent;

/// Which of the two linked fields the operator touched last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditedField {
    #[default]
    Margin,
    SalePrice,
}

/// Editable cost/margin/price triple where the last edited field wins.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::binding::PriceEditor;
/// use tally_core::pricing::PricingEngine;
/// use tally_core::types::Percent;
/// use tally_core::Money;
///
/// let mut editor = PriceEditor::new(PricingEngine::cost_plus(), Money::new(dec!(100)));
///
/// editor.edit_margin(Percent::new(dec!(25)));
/// assert_eq!(editor.sale_price(), Money::new(dec!(125)));
///
/// editor.edit_sale_price(Money::new(dec!(150)));
/// assert_eq!(editor.margin().value(), dec!(50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEditor {
    engine: PricingEngine,
    cost: Money,
    margin: Percent,
    sale_price: Money,
    last_edited: EditedField,
}

impl PriceEditor {
    /// Starts with zero margin; the sale price follows from the cost.
    pub fn new(engine: PricingEngine, cost: Money) -> Self {
        let margin = Percent::zero();
        PriceEditor {
            engine,
            cost,
            margin,
            sale_price: engine.sale_price(cost, margin),
            last_edited: EditedField::Margin,
        }
    }

    pub fn cost(&self) -> Money {
        self.cost
    }

    pub fn margin(&self) -> Percent {
        self.margin
    }

    pub fn sale_price(&self) -> Money {
        self.sale_price
    }

    pub fn last_edited(&self) -> EditedField {
        self.last_edited
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    /// Operator typed a margin: the sale price follows.
    pub fn edit_margin(&mut self, margin: Percent) {
        self.margin = margin;
        self.last_edited = EditedField::Margin;
        self.sale_price = self.engine.sale_price(self.cost, margin);
    }

    /// Operator typed a sale price: the margin follows.
    pub fn edit_sale_price(&mut self, sale_price: Money) {
        self.sale_price = sale_price;
        self.last_edited = EditedField::SalePrice;
        self.margin = self.engine.margin_for_price(self.cost, sale_price);
    }

    /// Cost changed: keep the operator's last input, rederive the other one.
    pub fn edit_cost(&mut self, cost: Money) {
        self.cost = cost;
        match self.last_edited {
            EditedField::Margin => {
                self.sale_price = self.engine.sale_price(cost, self.margin);
            }
            EditedField::SalePrice => {
                self.margin = self.engine.margin_for_price(cost, self.sale_price);
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_margin_then_price() {
        let mut editor = PriceEditor::new(PricingEngine::cost_plus(), Money::new(dec!(100)));
        assert_eq!(editor.sale_price(), Money::new(dec!(100)));

        editor.edit_margin(Percent::new(dec!(25)));
        assert_eq!(editor.sale_price().round_display().amount(), dec!(125.00));
        assert_eq!(editor.last_edited(), EditedField::Margin);

        editor.edit_sale_price(Money::new(dec!(150)));
        assert_eq!(editor.margin().value(), dec!(50));
        assert_eq!(editor.last_edited(), EditedField::SalePrice);
        // the typed price is kept verbatim
        assert_eq!(editor.sale_price(), Money::new(dec!(150)));
    }

    #[test]
    fn test_cost_edit_keeps_margin_when_margin_was_typed() {
        let mut editor = PriceEditor::new(PricingEngine::cost_plus(), Money::new(dec!(100)));
        editor.edit_margin(Percent::new(dec!(20)));

        editor.edit_cost(Money::new(dec!(200)));
        assert_eq!(editor.margin().value(), dec!(20));
        assert_eq!(editor.sale_price(), Money::new(dec!(240)));
    }

    #[test]
    fn test_cost_edit_keeps_price_when_price_was_typed() {
        let mut editor = PriceEditor::new(PricingEngine::cost_plus(), Money::new(dec!(100)));
        editor.edit_sale_price(Money::new(dec!(150)));

        editor.edit_cost(Money::new(dec!(120)));
        assert_eq!(editor.sale_price(), Money::new(dec!(150)));
        assert_eq!(editor.margin().value(), dec!(25));
    }

    #[test]
    fn test_repeated_edits_are_stable() {
        let mut editor = PriceEditor::new(PricingEngine::default(), Money::new(dec!(100)));
        editor.edit_margin(Percent::new(dec!(20)));
        let price = editor.sale_price();

        // Feeding the derived price back must not drift the margin.
        editor.edit_sale_price(price);
        assert!((editor.margin().value() - dec!(20)).abs() < dec!(0.000001));
        assert_eq!(editor.sale_price(), price);
    }

    #[test]
    fn test_degenerate_margin_gives_zero_price() {
        let mut editor = PriceEditor::new(PricingEngine::default(), Money::new(dec!(100)));
        editor.edit_margin(Percent::new(dec!(60)));
        assert_eq!(editor.sale_price(), Money::zero());
    }
}
