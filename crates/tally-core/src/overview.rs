//! # Sales Overview
//!
//! Monthly sales against cost, in thousands of BRL, with a monthly target.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::round_calc;
use crate::types::Percent;
use crate::DEFAULT_MONTHLY_TARGET;

/// Month labels as shown on the chart axis.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Sales and cost for one month, in thousands of BRL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyFigure {
    /// 1 = January.
    pub month: u32,
    pub sales: Decimal,
    pub cost: Decimal,
}

impl MonthlyFigure {
    pub fn new(month: u32, sales: Decimal, cost: Decimal) -> Self {
        MonthlyFigure { month, sales, cost }
    }

    /// Axis label, `"?"` for a month outside 1..=12.
    pub fn label(&self) -> &'static str {
        (self.month as usize)
            .checked_sub(1)
            .and_then(|idx| MONTH_LABELS.get(idx))
            .copied()
            .unwrap_or("?")
    }

    /// `(sales - cost) / sales × 100`, zero when there were no sales or the
    /// figures leave the `Decimal` range.
    pub fn margin_pct(&self) -> Percent {
        if self.sales <= Decimal::ZERO {
            return Percent::zero();
        }
        self.sales
            .checked_sub(self.cost)
            .and_then(|gross| gross.checked_div(self.sales))
            .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
            .map(|pct| Percent::new(round_calc(pct)))
            .unwrap_or_default()
    }

    pub fn meets(&self, target: Decimal) -> bool {
        self.sales >= target
    }
}

/// A year of monthly figures plus the monthly sales target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesOverview {
    pub months: Vec<MonthlyFigure>,
    #[serde(default = "default_target")]
    pub target: Decimal,
}

fn default_target() -> Decimal {
    DEFAULT_MONTHLY_TARGET
}

impl Default for SalesOverview {
    fn default() -> Self {
        SalesOverview {
            months: Vec::new(),
            target: DEFAULT_MONTHLY_TARGET,
        }
    }
}

impl SalesOverview {
    /// Builds the overview from parallel sales and cost series starting in January.
    ///
    /// Extra entries in the longer series are ignored.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::overview::SalesOverview;
    ///
    /// let overview = SalesOverview::from_series(&[dec!(100), dec!(60)], &[dec!(70), dec!(45)]);
    /// assert_eq!(overview.months[1].label(), "Fev");
    /// assert_eq!(overview.months_meeting_target(), vec![1]);
    /// ```
    pub fn from_series(sales: &[Decimal], cost: &[Decimal]) -> Self {
        let months = sales
            .iter()
            .zip(cost)
            .zip(1u32..)
            .map(|((&sales, &cost), month)| MonthlyFigure::new(month, sales, cost))
            .collect();

        SalesOverview {
            months,
            target: DEFAULT_MONTHLY_TARGET,
        }
    }

    pub fn with_target(mut self, target: Decimal) -> Self {
        self.target = target;
        self
    }

    /// Mean margin over months that had sales; zero when none did.
    pub fn average_margin(&self) -> Percent {
        let margins: Vec<Decimal> = self
            .months
            .iter()
            .filter(|m| m.sales > Decimal::ZERO)
            .map(|m| m.margin_pct().value())
            .collect();

        if margins.is_empty() {
            return Percent::zero();
        }

        let sum = saturating_sum(margins.iter().copied());
        Percent::new(round_calc(sum / Decimal::from(margins.len())))
    }

    /// Month numbers whose sales reached the target.
    pub fn months_meeting_target(&self) -> Vec<u32> {
        self.months
            .iter()
            .filter(|m| m.meets(self.target))
            .map(|m| m.month)
            .collect()
    }

    pub fn total_sales(&self) -> Decimal {
        saturating_sum(self.months.iter().map(|m| m.sales))
    }

    pub fn total_cost(&self) -> Decimal {
        saturating_sum(self.months.iter().map(|m| m.cost))
    }
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}
