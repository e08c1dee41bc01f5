//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Inventory rule violations                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  stockroom-api errors                                                  │
//! │  └── ApiError         - What GraphQL clients see (code + message)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Inventory rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Merging would push the stored amount outside what the API can return.
    ///
    /// ## When This Occurs
    /// ```text
    /// existing row: Bolt / Acme, amount = 2_147_483_000
    ///      │
    ///      ▼
    /// createItem("Bolt", "Acme", 1_000)
    ///      │
    ///      ▼
    /// AmountOutOfRange { .., max: 2_147_483_647 }  (transaction rolled back)
    /// ```
    /// A large negative amount merged into a negative row fails the same way
    /// against `min`.
    #[error("Amount for {name} ({manufacturer}) would be {resulting}, outside {min}..={max}")]
    AmountOutOfRange {
        name: String,
        manufacturer: String,
        resulting: i64,
        min: i64,
        max: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when client input doesn't meet requirements.
/// Used for early validation before any database call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::MustBeNonNegative { field }
            | ValidationError::OutOfRange { field, .. } => field,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::AmountOutOfRange {
            name: "Bolt".to_string(),
            manufacturer: "Acme".to_string(),
            resulting: 3_000_000_000,
            min: -2_147_483_648,
            max: 2_147_483_647,
        };
        assert_eq!(
            err.to_string(),
            "Amount for Bolt (Acme) would be 3000000000, outside -2147483648..=2147483647"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBeNonNegative {
            field: "offset".to_string(),
        };
        assert_eq!(err.to_string(), "offset must not be negative");
        assert_eq!(err.field(), "offset");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "manufacturer".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
