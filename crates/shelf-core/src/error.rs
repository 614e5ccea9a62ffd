//! # Error Types
//!
//! Domain-specific error types for shelf-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelf-core errors (this file)                                         │
//! │  ├── ValidationError  - A field rejected its value (InvalidField)      │
//! │  └── CoreError        - Stock range, missing reference, sentinel       │
//! │                                                                         │
//! │  shelf-db errors (separate crate)                                      │
//! │  └── DbError          - Database failures, wraps CoreError             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → Presentation            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "Not found" is deliberately absent: lookups return `Option`, and absence
//! is a normal outcome the caller checks for.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Restock was asked to add zero or a negative amount.
    #[error("Restock amount must be positive, got {amount}")]
    InvalidRestock { amount: i64 },

    /// Restock would push the stock past `i64::MAX`.
    #[error("Restocking {title} by {amount} would exceed the maximum stock (current {stock})")]
    StockOverflow {
        title: String,
        stock: i64,
        amount: i64,
    },

    /// Sale amount is negative or exceeds the stock on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Sell "Dune" (amount: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { title: "Dune", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Insufficient stock for Dune"
    /// ```
    #[error("Insufficient stock for {title}: available {available}, requested {requested}")]
    InsufficientStock {
        title: String,
        available: i64,
        requested: i64,
    },

    /// A reassignment was requested without a replacement entity.
    #[error("{entity} cannot be empty")]
    MissingReference { entity: &'static str },

    /// The fallback "Unknown" row cannot be deleted.
    #[error("{entity} {id} is the fallback for orphaned books and cannot be deleted")]
    ProtectedSentinel { entity: &'static str, id: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// True for the stock range failures of `restock` and `sell`.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidRestock { .. }
                | CoreError::StockOverflow { .. }
                | CoreError::InsufficientStock { .. }
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A field rejected the value it was given.
///
/// Raised by constructors and setters at the point of assignment; the
/// field keeps its previous value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is empty or whitespace.
    #[error("{field} cannot be empty")]
    Required { field: &'static str },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Value must not be negative.
    #[error("{field} cannot be less than 0")]
    Negative { field: &'static str },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    /// Invalid format (e.g., email without `@`, phone with letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

impl ValidationError {
    /// Name of the field that rejected its value.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::Negative { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
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
        let err = CoreError::InsufficientStock {
            title: "Dune".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Dune: available 3, requested 5"
        );

        let err = CoreError::MissingReference { entity: "Author" };
        assert_eq!(err.to_string(), "Author cannot be empty");

        let err = CoreError::StockOverflow {
            title: "Dune".to_string(),
            stock: 3,
            amount: i64::MAX,
        };
        assert_eq!(
            err.to_string(),
            "Restocking Dune by 9223372036854775807 would exceed the maximum stock (current 3)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required { field: "title" };
        assert_eq!(err.to_string(), "title cannot be empty");
        assert_eq!(err.field(), "title");

        let err = ValidationError::TooShort {
            field: "phone",
            min: 10,
        };
        assert_eq!(err.to_string(), "phone must be at least 10 characters");
    }

    #[test]
    fn test_out_of_range_grouping() {
        assert!(CoreError::InvalidRestock { amount: 0 }.is_out_of_range());
        assert!(CoreError::InsufficientStock {
            title: "x".to_string(),
            available: 0,
            requested: 1,
        }
        .is_out_of_range());
        assert!(CoreError::StockOverflow {
            title: "x".to_string(),
            stock: 1,
            amount: i64::MAX,
        }
        .is_out_of_range());
        assert!(!CoreError::MissingReference { entity: "Genre" }.is_out_of_range());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::Required { field: "name" }.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
