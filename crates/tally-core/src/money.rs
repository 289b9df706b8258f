//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Fixed-Point Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Pricing chains derived fields:                                        │
//! │    sale price → margin amount → overhead (residual) → taxes            │
//! │  so a drift in the first step leaks into every later one.              │
//! │                                                                         │
//! │  OUR SOLUTION: Decimal with a fixed calculation scale                  │
//! │    every intermediate value is cut to 9 fractional digits,            │
//! │    the operator sees 2.                                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal_macros::dec;
//! use tally_core::money::Money;
//!
//! let cost = Money::from_cents(10_050); // R$ 100,50
//! let freight = Money::new(dec!(12.25));
//!
//! let total = cost + freight;
//! assert_eq!(total, Money::new(dec!(112.75)));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::Percent;
use crate::{currency, CALC_SCALE, DISPLAY_SCALE};

/// Rounds to the calculation scale, half away from zero.
#[inline]
pub(crate) fn round_calc(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CALC_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to the display scale, half away from zero.
#[inline]
pub(crate) fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in BRL.
///
/// ## Design Decisions
/// - **Decimal**: exact base-10 arithmetic, 28 significant digits
/// - **Signed**: net results can be negative (expenses above revenue)
/// - **Transparent serde**: serializes as the bare decimal
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CostInputs ──► total cost ──► sale price ──► margin / overhead        │
/// │                                     │                                   │
/// │                                     └──► tax amounts ──► final price   │
/// │                                                                         │
/// │  Expenses ──► totals ──► net result                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).amount(), dec!(10.99));
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Cuts the amount to the calculation scale (9 fractional digits).
    #[inline]
    pub fn round_calc(&self) -> Self {
        Money(round_calc(self.0))
    }

    /// Rounds the amount to cents for display.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::money::Money;
    ///
    /// let price = Money::new(dec!(280.347631063));
    /// assert_eq!(price.round_display().amount(), dec!(280.35));
    ///
    /// let pis = Money::new(dec!(4.625));
    /// assert_eq!(pis.round_display().amount(), dec!(4.63));
    /// ```
    #[inline]
    pub fn round_display(&self) -> Self {
        Money(round_display(self.0))
    }

    /// Applies a percentage: `amount × pct / 100`, at calculation scale.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use tally_core::money::Money;
    /// use tally_core::types::Percent;
    ///
    /// let price = Money::new(dec!(280.35));
    /// let icms = price.percent(Percent::new(dec!(4)));
    /// assert_eq!(icms.amount(), dec!(11.214));
    /// ```
    ///
    /// Saturates at the `Decimal` bounds instead of overflowing.
    pub fn percent(&self, pct: Percent) -> Money {
        Money(round_calc(
            self.0.saturating_mul(pct.value()) / Decimal::ONE_HUNDRED,
        ))
    }

    /// Adds another amount, returning `None` when the sum leaves the
    /// `Decimal` range.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Divides by a plain factor, returning `None` on a zero divisor or when
    /// the quotient leaves the `Decimal` range.
    #[inline]
    pub fn checked_div(self, divisor: Decimal) -> Option<Money> {
        self.0.checked_div(divisor).map(Money)
    }

    /// Multiplies by a plain factor, returning `None` on overflow.
    #[inline]
    pub fn checked_mul(self, factor: Decimal) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }

    /// Divides by another amount, returning zero when `other` is not positive.
    ///
    /// Used for the markup multiplier (`sale / cost`).
    pub fn ratio_to(&self, other: Money) -> Decimal {
        if !other.is_positive() {
            return Decimal::ZERO;
        }
        self.0
            .checked_div(other.0)
            .map(round_calc)
            .unwrap_or(Decimal::ZERO)
    }

    /// Expresses this amount as a percentage of `whole`.
    ///
    /// Returns zero when `whole` is not positive or the share leaves the
    /// `Decimal` range.
    pub fn share_of(&self, whole: Money) -> Percent {
        if !whole.is_positive() {
            return Percent::zero();
        }
        self.0
            .checked_div(whole.0)
            .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
            .map(|pct| Percent::new(round_calc(pct)))
            .unwrap_or_default()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// The operators saturate at the `Decimal` bounds. Code that must notice an
// overflow uses `checked_add` / `checked_mul` / `checked_div` instead.

/// Shows the amount in pt-BR currency format (`R$ 1.234,56`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&currency::format_brl(*self))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a plain factor (fractions, multipliers).
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        Money(self.0.saturating_mul(factor))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
