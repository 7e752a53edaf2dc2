//! # Error Types
//!
//! Domain-specific error types for bazaar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  bazaar-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  bazaar-store errors (separate crate)                               │
//! │  └── StoreError       - Snapshot persistence failures               │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → ServiceError → caller/UI       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, available stock)
//! 3. Errors are enum variants, never bare Strings
//! 4. Validation and stock errors are expected, user-correctable conditions

use thiserror::Error;

use crate::actor::Role;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are returned to the
/// immediate caller — the core has no logging facility and never swallows a
/// failure.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No catalog variant matches the requested (name, color, size).
    ///
    /// Resolution is exact-match on all three identifiers as stored;
    /// case-insensitivity only applies in search.
    #[error("No variant of '{name}' in color '{color}' size '{size}'")]
    VariantNotFound {
        name: String,
        color: String,
        size: String,
    },

    /// An id-based lookup found nothing.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Insufficient stock to complete a checkout.
    ///
    /// Raised by the sale composer BEFORE any write happens, so an
    /// over-sell leaves the ledger, catalog, and sale history untouched.
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// A privileged operation was attempted without the Admin role.
    #[error("{role:?} role may not {action}")]
    Permission { role: Role, action: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when operator input doesn't meet requirements. Used for early
/// validation before business logic runs.
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
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., not a decimal number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// At least one value must be selected.
    #[error("select at least one {field}")]
    EmptySelection { field: &'static str },

    /// A sale line is missing its variant, quantity, or price.
    #[error("select product, variant and valid quantity")]
    IncompleteSaleLine,

    /// An in-progress sale must always keep at least one line.
    #[error("a sale must keep at least one line")]
    LastSaleLine,
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

    #[test]
    fn test_stock_error_message() {
        let err = CoreError::InsufficientStock {
            product: "Denim Jacket".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Denim Jacket: available 3, requested 5"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "product name".to_string(),
        };
        assert_eq!(err.to_string(), "product name is required");

        let err = ValidationError::EmptySelection { field: "color" };
        assert_eq!(err.to_string(), "select at least one color");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::LastSaleLine;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
