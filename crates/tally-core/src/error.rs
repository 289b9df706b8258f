//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Pricing / parsing failures                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tally-store errors (separate crate)                                   │
//! │  └── StoreError       - Repository failures (not found, HTTP)          │
//! │                                                                         │
//! │  tally-cli errors (binary)                                             │
//! │  └── ConfigError      - Bad TALLY_* environment values                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (CLI) → stderr             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Most of the pricing pipeline never returns these: degenerate input falls
//! back to zero. They surface through the strict entry points
//! ([`crate::pricing::PricingEngine::try_quote`]) and through parsing of
//! user-supplied codes and modes.

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Margin plus overhead reach 100% of revenue.
    ///
    /// ## When This Occurs
    /// ```text
    /// cost 100, margin 60%, overhead 44.33%
    ///      │
    ///      ▼
    /// denominator = 1 - (0.60 + 0.4433) = -0.0433
    ///      │
    ///      ▼
    /// PricingUndefined { margin_pct: 60, overhead_pct: 44.33 }
    /// ```
    #[error(
        "Price is undefined: margin {margin_pct}% plus overhead {overhead_pct}% must stay below 100%"
    )]
    PricingUndefined {
        margin_pct: Decimal,
        overhead_pct: Decimal,
    },

    /// An amount leaves the `Decimal` range while pricing.
    ///
    /// ## When This Occurs
    /// - Acquisition plus freight plus other expenses exceed `Decimal::MAX`
    /// - The cost fits but `cost / (1 - margin - overhead)` does not
    #[error("Amount out of range: {field} is too large to price")]
    AmountOutOfRange { field: String },

    /// Unknown tax code in user input (e.g. `--tax foo=3`).
    #[error("Unknown tax code: {0}")]
    UnknownTaxCode(String),

    /// Unknown pricing mode name.
    #[error("Unknown pricing mode: {0}")]
    UnknownPricingMode(String),

    /// Unknown tax regime name.
    #[error("Unknown tax regime: {0}")]
    UnknownTaxRegime(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., invalid UUID, invalid CNPJ).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_messages() {
        let err = CoreError::PricingUndefined {
            margin_pct: dec!(60),
            overhead_pct: dec!(44.33),
        };
        assert_eq!(
            err.to_string(),
            "Price is undefined: margin 60% plus overhead 44.33% must stay below 100%"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::OutOfRange {
            field: "icms".to_string(),
            min: dec!(0),
            max: dec!(100),
        };
        assert_eq!(err.to_string(), "icms must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Negative {
            field: "freight".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
