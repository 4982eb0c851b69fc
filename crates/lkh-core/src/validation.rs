//! # Validation Module
//!
//! Input validation for values that arrive from a front end.
//!
//! The cart ledger itself accepts any [`ProductId`](crate::ProductId), so
//! nothing here guards cart mutations. These checks cover search input and
//! configured limits.
//!
//! ## Usage
//! ```rust
//! use lkh_core::validation::{validate_search_query, validate_limit};
//!
//! assert_eq!(validate_search_query("  iPhone ").unwrap(), "iPhone");
//! assert!(validate_limit("max_line_quantity", 0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::Condition;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted search term.
pub const MAX_QUERY_LEN: usize = 100;

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches every product)
/// - Maximum 100 characters after trimming
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Parses the condition filter of the shop page.
///
/// `"All"` (any case) or an empty string means no filter.
pub fn parse_condition_filter(filter: &str) -> ValidationResult<Option<Condition>> {
    let filter = filter.trim();
    if filter.is_empty() || filter.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    filter.parse().map(Some)
}

/// Validates a configured ceiling: when present it must be positive.
pub fn validate_limit(field: &str, value: u64) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
