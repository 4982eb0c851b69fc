//! # Error Types
//!
//! Domain-specific error types for lkh-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lkh-core errors (this file)                                           │
//! │  ├── CoreError        - Guarded cart operations                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  lkh-session errors (separate crate)                                   │
//! │  ├── SessionError     - Lock poisoning, config loading                 │
//! │  └── ApiError         - What the front end sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Front end              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! The four ledger operations are total. Querying or decreasing an id that
//! is not in the cart is a no-op, and an id missing from the catalog shows
//! up as an unresolved summary line. Only the opt-in ceilings of
//! [`CartStore::try_increase`](crate::cart::CartStore::try_increase) and
//! input validation produce errors.

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Cart already holds the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity would exceed the configured ceiling.
    #[error("Quantity {requested} of {product_id} exceeds maximum allowed ({max})")]
    QuantityTooLarge {
        product_id: ProductId,
        requested: u64,
        max: u32,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

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

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityTooLarge {
            product_id: ProductId::from("sku-1"),
            requested: 11,
            max: 10,
        };
        assert_eq!(
            err.to_string(),
            "Quantity 11 of sku-1 exceeds maximum allowed (10)"
        );

        let err = CoreError::ProductNotFound(ProductId::from(99u32));
        assert_eq!(err.to_string(), "Product not found: 99");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
