//! # Expenses Module
//!
//! Monthly company expenses against revenue, plus the card-fee estimate
//! that feeds the credit and debit card-fee expense lines.
//!
//! ## Summary Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OperatingExpenses ──total()──┐                                        │
//! │                               ├──► total_expenses                      │
//! │  TaxExpenses ───────total()──┘         │                               │
//! │                                        ├──► expense_ratio = total/rev  │
//! │  Company.monthly_revenue ──────────────┴──► net_result = rev - total   │
//! │                                                                         │
//! │  regime = Lucro Presumido:                                             │
//! │      presumed_profit = 8% of revenue                                   │
//! │      presumed_irpj   = 15% of presumed_profit                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::money::Money;
use crate::types::{Company, Percent, TaxRegime};
use crate::{PRESUMED_IRPJ_PCT, PRESUMED_PROFIT_PCT};

// =============================================================================
// Expense Groups
// =============================================================================

/// Recurring administrative expenses for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingExpenses {
    pub water: Money,
    pub electricity: Money,
    pub internet: Money,
    pub rent: Money,
    pub payroll: Money,
    /// Owner's withdrawal (pro-labore).
    pub owner_pay: Money,
    pub cleaning: Money,
    pub other_admin: Money,
    /// Credit card processing fees, usually taken from [`CardFeeEstimate`].
    pub credit_card_fees: Money,
    /// Debit card processing fees, usually taken from [`CardFeeEstimate`].
    pub debit_card_fees: Money,
}

impl OperatingExpenses {
    /// Fills both card-fee lines from an estimate.
    pub fn with_card_fees(mut self, fees: CardFees) -> Self {
        self.credit_card_fees = fees.credit;
        self.debit_card_fees = fees.debit;
        self
    }

    /// Sum of every line.
    pub fn total(&self) -> Money {
        [
            self.water,
            self.electricity,
            self.internet,
            self.rent,
            self.payroll,
            self.owner_pay,
            self.cleaning,
            self.other_admin,
            self.credit_card_fees,
            self.debit_card_fees,
        ]
        .iter()
        .sum()
    }
}

/// Taxes paid in one month, as amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxExpenses {
    pub icms: Money,
    pub iss: Money,
    pub pis: Money,
    pub cofins: Money,
    pub irpj: Money,
    pub irpj_additional: Money,
    pub csll: Money,
}

impl TaxExpenses {
    pub fn total(&self) -> Money {
        [
            self.icms,
            self.iss,
            self.pis,
            self.cofins,
            self.irpj,
            self.irpj_additional,
            self.csll,
        ]
        .iter()
        .sum()
    }
}

/// `value / revenue × 100`, zero when there is no revenue.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::expenses::share_of_revenue;
/// use tally_core::Money;
///
/// let share = share_of_revenue(Money::new(dec!(2500)), Money::new(dec!(10000)));
/// assert_eq!(share.value(), dec!(25));
/// assert!(share_of_revenue(Money::new(dec!(1)), Money::zero()).is_zero());
/// ```
pub fn share_of_revenue(value: Money, revenue: Money) -> Percent {
    value.share_of(revenue)
}

// =============================================================================
// Company Financials
// =============================================================================

/// Everything the company form collects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanyFinancials {
    pub company: Company,
    #[serde(default)]
    pub operating: OperatingExpenses,
    #[serde(default)]
    pub taxes: TaxExpenses,
}

/// Derived figures shown under the company form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub revenue: Money,
    pub total_operating: Money,
    pub total_taxes: Money,
    pub total_expenses: Money,
    pub expense_ratio_pct: Percent,
    pub tax_ratio_pct: Percent,
    /// Negative when expenses exceed revenue.
    pub net_result: Money,
    /// Zero unless the regime is Lucro Presumido.
    pub presumed_profit: Money,
    pub presumed_irpj: Money,
}

impl CompanyFinancials {
    pub fn new(company: Company) -> Self {
        CompanyFinancials {
            company,
            operating: OperatingExpenses::default(),
            taxes: TaxExpenses::default(),
        }
    }

    pub fn revenue(&self) -> Money {
        self.company.monthly_revenue
    }

    /// Computes totals, ratios and the presumed-profit estimate.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::expenses::CompanyFinancials;
    /// use tally_core::types::{Company, TaxRegime};
    /// use tally_core::Money;
    ///
    /// let mut financials = CompanyFinancials::new(Company {
    ///     name: "Loja".into(),
    ///     cnpj: String::new(),
    ///     regime: TaxRegime::LucroPresumido,
    ///     monthly_revenue: Money::new(dec!(50000)),
    /// });
    /// financials.operating.rent = Money::new(dec!(4000));
    /// financials.taxes.icms = Money::new(dec!(1000));
    ///
    /// let summary = financials.summary();
    /// assert_eq!(summary.total_expenses, Money::new(dec!(5000)));
    /// assert_eq!(summary.expense_ratio_pct.value(), dec!(10));
    /// assert_eq!(summary.net_result, Money::new(dec!(45000)));
    /// assert_eq!(summary.presumed_profit, Money::new(dec!(4000)));
    /// assert_eq!(summary.presumed_irpj, Money::new(dec!(600)));
    /// ```
    pub fn summary(&self) -> FinancialSummary {
        let revenue = self.revenue();
        let total_operating = self.operating.total();
        let total_taxes = self.taxes.total();
        let total_expenses = total_operating + total_taxes;

        let (presumed_profit, presumed_irpj) = match self.company.regime {
            TaxRegime::LucroPresumido => {
                let profit = revenue.percent(Percent::new(PRESUMED_PROFIT_PCT));
                (profit, profit.percent(Percent::new(PRESUMED_IRPJ_PCT)))
            }
            TaxRegime::Simples | TaxRegime::LucroReal => (Money::zero(), Money::zero()),
        };

        let summary = FinancialSummary {
            revenue,
            total_operating,
            total_taxes,
            total_expenses,
            expense_ratio_pct: share_of_revenue(total_expenses, revenue),
            tax_ratio_pct: share_of_revenue(total_taxes, revenue),
            net_result: revenue - total_expenses,
            presumed_profit,
            presumed_irpj,
        };

        debug!(
            company = %self.company.name,
            regime = %self.company.regime,
            total = %summary.total_expenses.amount(),
            "Computed financial summary"
        );

        summary
    }
}

// =============================================================================
// Card Fees
// =============================================================================

/// How revenue splits between credit and debit cards and what each costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFeeEstimate {
    pub revenue: Money,
    /// Share of revenue paid by credit card.
    pub credit_share_pct: Percent,
    /// Processor fee on credit sales.
    pub credit_fee_pct: Percent,
    pub debit_share_pct: Percent,
    pub debit_fee_pct: Percent,
}

/// Estimated monthly card fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFees {
    pub credit: Money,
    pub debit: Money,
    pub total: Money,
}

impl CardFeeEstimate {
    /// `revenue × share/100 × fee/100` for each card type.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::expenses::CardFeeEstimate;
    /// use tally_core::types::Percent;
    /// use tally_core::Money;
    ///
    /// let fees = CardFeeEstimate {
    ///     revenue: Money::new(dec!(10000)),
    ///     credit_share_pct: Percent::new(dec!(60)),
    ///     credit_fee_pct: Percent::new(dec!(3)),
    ///     debit_share_pct: Percent::new(dec!(30)),
    ///     debit_fee_pct: Percent::new(dec!(1.5)),
    /// }
    /// .compute();
    ///
    /// assert_eq!(fees.credit, Money::new(dec!(180)));
    /// assert_eq!(fees.debit, Money::new(dec!(45)));
    /// assert_eq!(fees.total, Money::new(dec!(225)));
    /// ```
    pub fn compute(&self) -> CardFees {
        let credit = self
            .revenue
            .percent(self.credit_share_pct)
            .percent(self.credit_fee_pct);
        let debit = self
            .revenue
            .percent(self.debit_share_pct)
            .percent(self.debit_fee_pct);

        CardFees {
            credit,
            debit,
            total: credit + debit,
        }
    }

    /// Share of revenue paid neither by credit nor debit (cash, pix, ...).
    ///
    /// Negative when the shares add up to more than 100%.
    pub fn other_share_pct(&self) -> Percent {
        Percent::new(
            Decimal::ONE_HUNDRED
                .saturating_sub(self.credit_share_pct.value())
                .saturating_sub(self.debit_share_pct.value()),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money(value: Decimal) -> Money {
        Money::new(value)
    }

    fn company(regime: TaxRegime, revenue: Decimal) -> Company {
        Company {
            name: "Mercadinho".to_string(),
            cnpj: "11222333000181".to_string(),
            regime,
            monthly_revenue: money(revenue),
        }
    }

    #[test]
    fn test_operating_total() {
        let expenses = OperatingExpenses {
            water: money(dec!(120)),
            electricity: money(dec!(480.50)),
            internet: money(dec!(99.90)),
            rent: money(dec!(3500)),
            payroll: money(dec!(8000)),
            owner_pay: money(dec!(4000)),
            cleaning: money(dec!(300)),
            other_admin: money(dec!(150)),
            credit_card_fees: money(dec!(180)),
            debit_card_fees: money(dec!(45)),
        };
        assert_eq!(expenses.total(), money(dec!(16875.40)));
    }

    #[test]
    fn test_tax_total() {
        let taxes = TaxExpenses {
            icms: money(dec!(1000)),
            pis: money(dec!(165)),
            cofins: money(dec!(760)),
            ..Default::default()
        };
        assert_eq!(taxes.total(), money(dec!(1925)));
    }

    #[test]
    fn test_summary_lucro_real_has_no_presumed_profit() {
        let mut financials = CompanyFinancials::new(company(TaxRegime::LucroReal, dec!(20000)));
        financials.operating.payroll = money(dec!(6000));
        financials.taxes.pis = money(dec!(330));

        let summary = financials.summary();
        assert_eq!(summary.total_operating, money(dec!(6000)));
        assert_eq!(summary.total_taxes, money(dec!(330)));
        assert_eq!(summary.expense_ratio_pct.value(), dec!(31.65));
        assert_eq!(summary.tax_ratio_pct.value(), dec!(1.65));
        assert_eq!(summary.net_result, money(dec!(13670)));
        assert!(summary.presumed_profit.is_zero());
        assert!(summary.presumed_irpj.is_zero());
    }

    #[test]
    fn test_summary_negative_result_and_zero_revenue() {
        let mut financials = CompanyFinancials::new(company(TaxRegime::Simples, dec!(0)));
        financials.operating.rent = money(dec!(2000));

        let summary = financials.summary();
        assert_eq!(summary.net_result, money(dec!(-2000)));
        assert!(summary.expense_ratio_pct.is_zero());
    }

    #[test]
    fn test_card_fees() {
        let estimate = CardFeeEstimate {
            revenue: money(dec!(50000)),
            credit_share_pct: Percent::new(dec!(45)),
            credit_fee_pct: Percent::new(dec!(2.99)),
            debit_share_pct: Percent::new(dec!(35)),
            debit_fee_pct: Percent::new(dec!(1.39)),
        };
        let fees = estimate.compute();

        assert_eq!(fees.credit, money(dec!(672.75)));
        assert_eq!(fees.debit, money(dec!(243.25)));
        assert_eq!(fees.total, money(dec!(916)));
        assert_eq!(estimate.other_share_pct().value(), dec!(20));
    }

    #[test]
    fn test_card_fees_fill_separate_expense_lines() {
        let fees = CardFeeEstimate {
            revenue: money(dec!(50000)),
            credit_share_pct: Percent::new(dec!(45)),
            credit_fee_pct: Percent::new(dec!(2.99)),
            debit_share_pct: Percent::new(dec!(35)),
            debit_fee_pct: Percent::new(dec!(1.39)),
        }
        .compute();

        let operating = OperatingExpenses {
            rent: money(dec!(5000)),
            ..Default::default()
        }
        .with_card_fees(fees);

        assert_eq!(operating.credit_card_fees, money(dec!(672.75)));
        assert_eq!(operating.debit_card_fees, money(dec!(243.25)));
        assert_eq!(operating.total(), money(dec!(5916)));
    }

    #[test]
    fn test_financials_from_json() {
        let json = r#"{
            "company": {
                "name": "Loja Centro",
                "cnpj": "11.222.333/0001-81",
                "regime": "Lucro Presumido",
                "monthly_revenue": "100000"
            },
            "operating": { "rent": "5000", "credit_card_fees": "700", "debit_card_fees": "200" },
            "taxes": { "icms": "4000" }
        }"#;

        let financials: CompanyFinancials = serde_json::from_str(json).unwrap();
        let summary = financials.summary();

        assert_eq!(summary.total_expenses, money(dec!(9900)));
        assert_eq!(summary.presumed_profit, money(dec!(8000)));
        assert_eq!(summary.presumed_irpj, money(dec!(1200)));
    }
}
