//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │     NewItem     │   │  BatchPayload   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (position)  │   │  name           │   │  count          │       │
//! │  │  name           │   │  manufacturer   │   └─────────────────┘       │
//! │  │  manufacturer   │   │  amount         │                             │
//! │  │  amount         │   │  (validated)    │   ┌─────────────────┐       │
//! │  └─────────────────┘   └─────────────────┘   │  MergeOutcome   │       │
//! │                                              │  Created/Merged │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `Item::id` is the row's display position, not a surrogate key. It is
//! assigned as `max(id) + 1` on insert and compacted to `1..=N` after every
//! batch delete (see [`crate::renumber`]). `(name, manufacturer)` is the
//! natural key used for merging.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::validation::{validate_amount, validate_text, ValidationResult};
use crate::DEFAULT_ITEM_AMOUNT;

// =============================================================================
// Item
// =============================================================================

/// An inventory row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Item {
    /// Display position, contiguous from 1 after deletes.
    #[ts(type = "number")]
    pub id: i64,

    /// Item name, e.g. "Bolt".
    pub name: String,

    /// Manufacturer name, e.g. "Acme".
    pub manufacturer: String,

    /// Quantity on hand.
    #[ts(type = "number")]
    pub amount: i64,
}

// =============================================================================
// New Item
// =============================================================================

/// Validated input for create-or-merge.
///
/// The only way to build one is [`NewItem::new`], so a `NewItem` in hand
/// always has non-blank text and an in-range amount. Text is stored exactly
/// as the client sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewItem {
    pub name: String,
    pub manufacturer: String,
    pub amount: i64,
}

impl NewItem {
    /// Validates create input.
    ///
    /// ## Rules
    /// - `name` and `manufacturer`: required, not blank, at most 200 characters,
    ///   kept verbatim
    /// - `amount`: any GraphQL `Int`, defaults to 0 when absent; negative
    ///   amounts reduce stock on merge
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::NewItem;
    ///
    /// let item = NewItem::new(Some("Bolt "), Some("Acme"), Some(-5)).unwrap();
    /// assert_eq!(item.name, "Bolt ");
    /// assert_eq!(item.amount, -5);
    ///
    /// assert!(NewItem::new(None, Some("Acme"), Some(5)).is_err());
    /// ```
    pub fn new(
        name: Option<&str>,
        manufacturer: Option<&str>,
        amount: Option<i64>,
    ) -> ValidationResult<Self> {
        let name = validate_text("name", name)?;
        let manufacturer = validate_text("manufacturer", manufacturer)?;
        let amount = amount.unwrap_or(DEFAULT_ITEM_AMOUNT);
        validate_amount(amount)?;

        Ok(NewItem {
            name,
            manufacturer,
            amount,
        })
    }
}

// =============================================================================
// Merge Outcome
// =============================================================================

/// What create-or-merge did with the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No row matched; a new row was inserted with the next id.
    Created(Item),
    /// A row with the same name and manufacturer had the amount added to it.
    Merged(Item),
}

impl MergeOutcome {
    /// The row as it now stands in the store.
    pub fn item(&self) -> &Item {
        match self {
            MergeOutcome::Created(item) | MergeOutcome::Merged(item) => item,
        }
    }

    /// Consumes the outcome, returning the stored row.
    pub fn into_item(self) -> Item {
        match self {
            MergeOutcome::Created(item) | MergeOutcome::Merged(item) => item,
        }
    }

    /// True when a new row was inserted.
    pub fn is_created(&self) -> bool {
        matches!(self, MergeOutcome::Created(_))
    }
}

// =============================================================================
// Batch Payload
// =============================================================================

/// Result of a batch delete: how many rows were actually removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BatchPayload {
    #[ts(type = "number")]
    pub count: u64,
}

// =============================================================================
// Unit Tests
// =============================================================================
