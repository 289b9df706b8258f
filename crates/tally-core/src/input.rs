//! # Input Module
//!
//! Turns raw form text into numbers. Nothing here fails: text that is not a
//! number becomes zero (or "unset" for optional fields).
//!
//! ```text
//! Company / expense forms    digits_or_zero   "R$ 1.500"  → 1500
//! Card-fee / rate fields     number_or_zero   "4,5"       → 4.5
//! Product form               optional_number  ""          → None (counts as 0)
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::currency::leading_decimal;

/// Keeps only ASCII digits; an empty result is zero.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::input::digits_or_zero;
///
/// assert_eq!(digits_or_zero("R$ 1.500"), dec!(1500));
/// assert_eq!(digits_or_zero("abc"), dec!(0));
/// ```
pub fn digits_or_zero(text: &str) -> Decimal {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&digits).unwrap_or(Decimal::ZERO)
}

/// Reads a decimal written with either `.` or `,` as the decimal point.
///
/// Invalid or empty text is zero.
pub fn number_or_zero(text: &str) -> Decimal {
    optional_number(text).unwrap_or(Decimal::ZERO)
}

/// Like [`number_or_zero`] but keeps "nothing typed" apart from zero.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::input::optional_number;
///
/// assert_eq!(optional_number("12,5"), Some(dec!(12.5)));
/// assert_eq!(optional_number("  "), None);
/// assert_eq!(optional_number("n/a"), None);
/// ```
pub fn optional_number(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replacen(',', ".", 1);
    leading_decimal(&normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_digits_or_zero() {
        assert_eq!(digits_or_zero("12000"), dec!(12000));
        assert_eq!(digits_or_zero("12.000,50"), dec!(1200050));
        assert_eq!(digits_or_zero("-300"), dec!(300));
        assert_eq!(digits_or_zero(""), dec!(0));
        assert_eq!(digits_or_zero("R$"), dec!(0));
    }

    #[test]
    fn test_number_or_zero() {
        assert_eq!(number_or_zero("4.5"), dec!(4.5));
        assert_eq!(number_or_zero("4,5"), dec!(4.5));
        assert_eq!(number_or_zero("-2"), dec!(-2));
        assert_eq!(number_or_zero("7%"), dec!(7));
        assert_eq!(number_or_zero("abc"), dec!(0));
        assert_eq!(number_or_zero(""), dec!(0));
    }

    #[test]
    fn test_optional_number() {
        assert_eq!(optional_number("0"), Some(dec!(0)));
        assert_eq!(optional_number(" 3 "), Some(dec!(3)));
        assert_eq!(optional_number(""), None);
        assert_eq!(optional_number("x1"), None);
    }
}
