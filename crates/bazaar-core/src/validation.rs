//! # Validation Module
//!
//! Input validation for operator-entered data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: UI (out of scope)                                         │
//! │  └── Immediate feedback on empty fields                             │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE                                               │
//! │  └── Field-level rules, run before any business logic               │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Sale composer preconditions                               │
//! │  └── Cross-entity rules (variant exists, stock suffices)            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_LINE_QUANTITY, MAX_SALE_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product or variant name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_label("product name", name, 200)
}

/// Validates a product code.
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    validate_label("product code", code, 50)
}

/// Validates a category label.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    validate_label("category", category, 100)
}

fn validate_label(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches nothing useful, but is not an error)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale line or stock-in quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a catalog price (buy or sell).
///
/// Zero is allowed: giveaway items and not-yet-priced stock both occur.
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a negotiated sale-line unit price.
///
/// Unlike catalog prices, zero is rejected: checkout refuses zero-priced
/// lines, so the cart must refuse them too — a line an operator can add
/// must be one that can check out.
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "unit price".to_string(),
        });
    }

    Ok(())
}

/// Validates the operator-entered paid amount of a sale.
///
/// ## Rules
/// - Must be non-negative (zero means a full-due sale)
/// - Must not exceed the cart subtotal, so `paid + due == subtotal`
///   always holds for the ledger rows a checkout creates
pub fn validate_paid_amount(paid: Money, subtotal: Money) -> ValidationResult<()> {
    if paid.is_negative() {
        return Err(ValidationError::MustBePositive {
            field: "paid amount".to_string(),
        });
    }

    if paid > subtotal {
        return Err(ValidationError::OutOfRange {
            field: "paid amount".to_string(),
            min: 0,
            max: subtotal.minor(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size (number of sale lines).
pub fn validate_line_count(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_SALE_LINES {
        return Err(ValidationError::OutOfRange {
            field: "sale lines".to_string(),
            min: 1,
            max: MAX_SALE_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Denim Jacket").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("sell price", Money::from_minor(0)).is_ok());
        assert!(validate_price("sell price", Money::from_minor(1099)).is_ok());
        assert!(validate_price("sell price", Money::from_minor(-100)).is_err());
    }

    #[test]
    fn test_validate_unit_price_rejects_zero() {
        assert!(validate_unit_price(Money::from_minor(1)).is_ok());
        assert!(validate_unit_price(Money::zero()).is_err());
        assert!(validate_unit_price(Money::from_minor(-100)).is_err());
    }

    #[test]
    fn test_validate_paid_amount() {
        let subtotal = Money::from_minor(25000);

        assert!(validate_paid_amount(Money::zero(), subtotal).is_ok());
        assert!(validate_paid_amount(Money::from_minor(25000), subtotal).is_ok());
        assert!(validate_paid_amount(Money::from_minor(-1), subtotal).is_err());
        assert!(validate_paid_amount(Money::from_minor(25001), subtotal).is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  shirt ").unwrap(), "shirt");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }
}
