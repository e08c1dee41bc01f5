//! # Validation Module
//!
//! Input validation utilities for Stockroom.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: GraphQL (async-graphql)                                      │
//! │  ├── Argument types (Int, String, [Int!]!)                             │
//! │  └── Rejects null where the schema says non-null                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Inventory Service (Rust)                                     │
//! │  └── THIS MODULE: required text, lengths, amount and paging bounds     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE (name, manufacturer)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{validate_amount, validate_text};
//!
//! assert_eq!(validate_text("name", Some("Bolt ")).unwrap(), "Bolt ");
//! assert!(validate_text("name", Some("   ")).is_err());
//! assert!(validate_amount(-3).is_ok());
//! ```

use crate::error::ValidationError;
use crate::{MAX_ITEM_AMOUNT, MAX_SEARCH_LEN, MAX_TEXT_LEN, MIN_ITEM_AMOUNT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field (item name or manufacturer).
///
/// ## Rules
/// - Must be present and not blank
/// - At most `MAX_TEXT_LEN` characters
///
/// ## Returns
/// The value exactly as given. Merging compares text byte for byte, so
/// surrounding whitespace is kept.
pub fn validate_text(field: &str, value: Option<&str>) -> ValidationResult<String> {
    let value = value.unwrap_or_default();

    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(value.to_string())
}

/// Validates a search string.
///
/// ## Rules
/// - Empty means "no search" and yields `None`
/// - Maximum `MAX_SEARCH_LEN` characters
///
/// ## Returns
/// The search string unchanged, if any.
pub fn validate_search_query(query: Option<&str>) -> ValidationResult<Option<String>> {
    let query = match query {
        Some(q) if !q.is_empty() => q,
        _ => return Ok(None),
    };

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(Some(query.to_string()))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an amount for create-or-merge.
///
/// ## Rules
/// - Within `MIN_ITEM_AMOUNT ..= MAX_ITEM_AMOUNT` (a GraphQL `Int`)
/// - Negative values are allowed; they take stock away on merge
pub fn validate_amount(amount: i64) -> ValidationResult<()> {
    if !(MIN_ITEM_AMOUNT..=MAX_ITEM_AMOUNT).contains(&amount) {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: MIN_ITEM_AMOUNT,
            max: MAX_ITEM_AMOUNT,
        });
    }

    Ok(())
}

/// Validates an optional paging value (`limit` or `offset`).
///
/// Absent stays absent; present must be zero or greater.
pub fn validate_page_bound(field: &str, value: Option<i64>) -> ValidationResult<Option<i64>> {
    match value {
        Some(v) if v < 0 => Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        }),
        other => Ok(other),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
