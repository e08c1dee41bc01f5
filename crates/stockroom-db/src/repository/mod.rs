//! # Repository Module
//!
//! Database repository implementations for Stockroom.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Inventory Service                                                     │
//! │       │                                                                 │
//! │       │  db.items().create_or_merge(&new_item)                         │
//! │       ▼                                                                 │
//! │  ItemRepository                                                        │
//! │  ├── list(&self, filter)                                               │
//! │  ├── create_or_merge(&self, new_item)   (one transaction)              │
//! │  ├── batch_delete(&self, ids)           (one transaction)              │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ItemRepository`](item::ItemRepository) - Item listing, merge-on-create, delete + renumber

pub mod item;
