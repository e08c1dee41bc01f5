//! # stockroom-core: Pure Inventory Logic for Stockroom
//!
//! This crate holds the inventory rules as pure functions with zero I/O
//! dependencies. The database layer and the GraphQL API both build on it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Client (external)                        │   │
//! │  │        items(search) ──► createItem ──► deleteItems             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP POST /graphql                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              stockroom-api (GraphQL + Inventory Service)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌──────────┐   │   │
//! │  │   │   types   │  │ validation │  │   query   │  │ renumber │   │   │
//! │  │   │   Item    │  │  NewItem   │  │ ItemQuery │  │  plan    │   │   │
//! │  │   │  Payload  │  │   rules    │  │  LIKE     │  │  next id │   │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └──────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, NewItem, BatchPayload, MergeOutcome)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`query`] - List query normalization and search patterns
//! - [`renumber`] - Display-position ID assignment and compaction
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::renumber::{next_item_id, renumber_plan};
//!
//! // Empty table: the first item gets id 1
//! assert_eq!(next_item_id(None), 1);
//!
//! // After deleting id 2 from {1, 2, 3}, id 3 moves down to 2
//! let plan = renumber_plan(&[1, 3]);
//! assert_eq!(plan.len(), 1);
//! assert_eq!((plan[0].from, plan[0].to), (3, 2));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod query;
pub mod renumber;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use query::{ItemFilter, ItemQuery};
pub use renumber::Reassignment;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length (in characters) of an item name or manufacturer.
pub const MAX_TEXT_LEN: usize = 200;

/// Maximum length (in characters) of a search string.
pub const MAX_SEARCH_LEN: usize = 100;

/// Largest amount a row may hold.
///
/// The GraphQL `Int` scalar is 32-bit, so anything above this could be
/// stored but never returned to a client.
pub const MAX_ITEM_AMOUNT: i64 = i32::MAX as i64;

/// Smallest amount a row may hold. Negative stock is allowed.
pub const MIN_ITEM_AMOUNT: i64 = i32::MIN as i64;

/// Amount used when `createItem` is called without one.
pub const DEFAULT_ITEM_AMOUNT: i64 = 0;
