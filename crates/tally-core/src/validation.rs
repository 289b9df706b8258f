//! # Validation Module
//!
//! Input validation utilities for Tally.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input sanitation (input module)                              │
//! │  ├── Non-numeric text becomes 0                                        │
//! │  └── Forms never reject a keystroke                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE: Business rule validation                        │
//! │  ├── Used by strict entry points (try_quote, --strict)                 │
//! │  └── Used before records are sent to the REST API                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote API                                                   │
//! │  └── Final say on what is stored                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use rust_decimal_macros::dec;
//! use tally_core::validation::{validate_sku, validate_percent};
//!
//! validate_sku("ARZ-5KG").unwrap();
//! validate_percent("margin", dec!(20)).unwrap();
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::{Customer, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 50 characters
/// - Should contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_sku;
///
/// assert!(validate_sku("ARZ-5KG").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("A".repeat(100).as_str()).is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product or customer name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an e-mail address.
///
/// Only the shape is checked: one `@` with text on both sides and a dot in
/// the domain.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    .unwrap_or(false)
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain.tld".to_string(),
        });
    }

    Ok(())
}

/// Validates a CNPJ, formatted or digits only.
///
/// ## Rules
/// - Exactly 14 digits once punctuation is removed
/// - Not all the same digit
/// - Both check digits match (mod 11)
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_cnpj;
///
/// assert!(validate_cnpj("11.222.333/0001-81").is_ok());
/// assert!(validate_cnpj("11222333000181").is_ok());
/// assert!(validate_cnpj("11.222.333/0001-82").is_err());
/// ```
pub fn validate_cnpj(cnpj: &str) -> ValidationResult<()> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "cnpj".to_string(),
        reason: reason.to_string(),
    };

    if cnpj.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "cnpj".to_string(),
        });
    }

    if cnpj
        .chars()
        .any(|c| !(c.is_ascii_digit() || matches!(c, '.' | '/' | '-' | ' ')))
    {
        return Err(invalid("must contain only digits and . / -"));
    }

    let digits: Vec<u32> = cnpj.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 14 {
        return Err(invalid("must have 14 digits"));
    }
    if digits.iter().all(|d| *d == digits[0]) {
        return Err(invalid("must not repeat a single digit"));
    }

    let check_digit = |body: &[u32]| -> u32 {
        // weights cycle 2..=9 from the rightmost digit
        let sum: u32 = body
            .iter()
            .rev()
            .zip((2..=9).cycle())
            .map(|(d, w)| d * w)
            .sum();
        match sum % 11 {
            0 | 1 => 0,
            rest => 11 - rest,
        }
    };

    let first = check_digit(&digits[..12]);
    let second = check_digit(&digits[..13]);
    if digits[12] != first || digits[13] != second {
        return Err(invalid("check digits do not match"));
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a percentage between 0 and 100 inclusive.
pub fn validate_percent(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        });
    }

    Ok(())
}

/// Validates an amount that must not be negative. Zero is allowed.
pub fn validate_non_negative(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Checks a product before it is sent to the API.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_uuid(&product.id)?;
    validate_name(&product.name)?;
    if let Some(sku) = &product.sku {
        validate_sku(sku)?;
    }
    validate_non_negative("acquisition cost", product.costs.acquisition.amount())?;
    validate_non_negative("freight", product.costs.freight.amount())?;
    validate_non_negative("other expenses", product.costs.other.amount())?;
    validate_percent("profit margin", product.profit_margin.value())?;
    for (code, rate) in product.tax_rates.iter() {
        validate_percent(code.code(), rate.value())?;
    }
    Ok(())
}

/// Checks a customer before it is sent to the API.
pub fn validate_customer(customer: &Customer) -> ValidationResult<()> {
    if customer.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }
    validate_name(&customer.name)?;
    validate_email(&customer.email)
}

// =============================================================================
// Unit Tests
// =============================================================================
