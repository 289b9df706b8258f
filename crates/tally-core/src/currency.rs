//! # Currency Module
//!
//! pt-BR formatting and parsing of BRL amounts.
//!
//! ## Round Trip
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  value 1234.5                                                           │
//! │     │ format_brl                                                        │
//! │     ▼                                                                   │
//! │  "R$ 1.234,50"          ← shown while the field is not focused         │
//! │     │ edit_text (on focus)                                              │
//! │     ▼                                                                   │
//! │  "1234,5"               ← what the operator edits                      │
//! │     │ parse_brl (on blur): drop "R$", drop ".", "," → "."              │
//! │     ▼                                                                   │
//! │  value 1234.5  ──► format_brl ──► "R$ 1.234,50"                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Anything that does not parse becomes zero, matching the forms'
//! sanitize-to-zero behavior.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::money::{round_display, Money};
use crate::DISPLAY_SCALE;

/// Currency prefix; the separator is a no-break space.
pub const BRL_PREFIX: &str = "R$\u{a0}";

/// Formats a decimal with `.` thousands and `,` decimals.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::currency::format_decimal_br;
///
/// assert_eq!(format_decimal_br(dec!(1234567.891), 2), "1.234.567,89");
/// assert_eq!(format_decimal_br(dec!(-0.5), 2), "-0,50");
/// assert_eq!(format_decimal_br(dec!(44.33), 0), "44");
/// ```
pub fn format_decimal_br(value: Decimal, places: u32) -> String {
    let mut rounded =
        value.round_dp_with_strategy(places, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);

    let negative = rounded < Decimal::ZERO;
    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + int_part.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats an amount as BRL currency: `R$ 1.234,56`.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::currency::format_brl;
/// use tally_core::Money;
///
/// assert_eq!(format_brl(Money::new(dec!(1234.567))), "R$\u{a0}1.234,57");
/// assert_eq!(format_brl(Money::new(dec!(-10))), "-R$\u{a0}10,00");
/// ```
pub fn format_brl(value: Money) -> String {
    let rounded = round_display(value.amount());
    let body = format_decimal_br(rounded.abs(), DISPLAY_SCALE);
    if rounded < Decimal::ZERO {
        format!("-{BRL_PREFIX}{body}")
    } else {
        format!("{BRL_PREFIX}{body}")
    }
}

/// Parses what the operator typed into a currency field.
///
/// Steps: drop the `R$` symbol and all whitespace, drop every `.`
/// (thousands separators), turn the first `,` into the decimal point, then
/// read the longest leading number. Nothing readable means zero.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::currency::parse_brl;
/// use tally_core::Money;
///
/// assert_eq!(parse_brl("R$ 1.234,56"), Money::new(dec!(1234.56)));
/// assert_eq!(parse_brl("12,5"), Money::new(dec!(12.5)));
/// assert_eq!(parse_brl("abc"), Money::zero());
/// ```
pub fn parse_brl(text: &str) -> Money {
    let cleaned: String = text
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect();
    let normalized = cleaned.replacen(',', ".", 1);

    Money::new(leading_decimal(&normalized).unwrap_or(Decimal::ZERO))
}

/// Reads `[+-]?digits[.digits]` from the start of `text`.
pub(crate) fn leading_decimal(text: &str) -> Option<Decimal> {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        }
    }

    if !has_digits {
        return None;
    }

    let number = text[..end].trim_start_matches('+');
    // ".5" is a valid number to the operator but not to Decimal::from_str
    let number = if let Some(rest) = number.strip_prefix("-.") {
        format!("-0.{rest}")
    } else if let Some(rest) = number.strip_prefix('.') {
        format!("0.{rest}")
    } else {
        number.to_string()
    };
    Decimal::from_str(&number).ok()
}

/// Text placed in a currency field when it gains focus.
///
/// Empty for zero so the operator can type straight away; otherwise the
/// plain amount with a decimal comma, which [`parse_brl`] reads back
/// unchanged.
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use tally_core::currency::edit_text;
/// use tally_core::Money;
///
/// assert_eq!(edit_text(Money::zero()), "");
/// assert_eq!(edit_text(Money::new(dec!(1234.50))), "1234,5");
/// ```
pub fn edit_text(value: Money) -> String {
    if value.is_zero() {
        return String::new();
    }
    value.amount().normalize().to_string().replace('.', ",")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(Money::zero()), "R$\u{a0}0,00");
        assert_eq!(format_brl(Money::new(dec!(5))), "R$\u{a0}5,00");
        assert_eq!(format_brl(Money::new(dec!(999.999))), "R$\u{a0}1.000,00");
        assert_eq!(format_brl(Money::new(dec!(1000000))), "R$\u{a0}1.000.000,00");
        assert_eq!(format_brl(Money::new(dec!(-1234.5))), "-R$\u{a0}1.234,50");
        // rounds to zero: no negative sign
        assert_eq!(format_brl(Money::new(dec!(-0.001))), "R$\u{a0}0,00");
    }

    #[test]
    fn test_parse_brl_variants() {
        assert_eq!(parse_brl("R$\u{a0}1.234,56"), Money::new(dec!(1234.56)));
        assert_eq!(parse_brl("  1.000.000 "), Money::new(dec!(1000000)));
        assert_eq!(parse_brl("-R$ 10,00"), Money::new(dec!(-10)));
        assert_eq!(parse_brl(",75"), Money::new(dec!(0.75)));
        assert_eq!(parse_brl("12abc"), Money::new(dec!(12)));
        assert_eq!(parse_brl(""), Money::zero());
        assert_eq!(parse_brl("R$"), Money::zero());
    }

    #[test]
    fn test_format_parse_round_trip() {
        let values = [
            dec!(0),
            dec!(0.01),
            dec!(0.1),
            dec!(1),
            dec!(12.34),
            dec!(999.99),
            dec!(1000),
            dec!(1234.5),
            dec!(98765432.10),
            dec!(-42.42),
        ];

        for value in values {
            let money = Money::new(value);
            let shown = format_brl(money);
            let parsed = parse_brl(&shown);
            assert_eq!(parsed, money, "{shown}");
            assert_eq!(format_brl(parsed), shown);
        }
    }

    #[test]
    fn test_focus_edit_blur_round_trip() {
        for value in [dec!(1234.56), dec!(0.5), dec!(1000000), dec!(7)] {
            let money = Money::new(value);
            let typed = edit_text(money);
            assert_eq!(parse_brl(&typed), money, "{typed}");
        }
    }

    #[test]
    fn test_leading_decimal() {
        assert_eq!(leading_decimal("3.25xyz"), Some(dec!(3.25)));
        assert_eq!(leading_decimal("-.5"), Some(dec!(-0.5)));
        assert_eq!(leading_decimal("7."), Some(dec!(7)));
        assert_eq!(leading_decimal("+4"), Some(dec!(4)));
        assert_eq!(leading_decimal("-"), None);
        assert_eq!(leading_decimal("."), None);
    }
}
