//! # Stockroom API
//!
//! GraphQL inventory server: list, create-or-merge and delete-with-renumber
//! over a SQLite store.
//!
//! ## Module Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        stockroom-api                                    │
//! │                                                                         │
//! │  main.rs ──► config ──► telemetry ──► stockroom_db::Database           │
//! │                                            │                            │
//! │                                            ▼                            │
//! │  server (axum Router) ──► graphql (schema) ──► service ──► repository  │
//! │        │                                        │                       │
//! │        └── /health ◄── Database                 └── error (ApiError)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod graphql;
pub mod server;
pub mod service;
pub mod telemetry;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use graphql::{build_schema, InventorySchema};
pub use server::{build_router, AppState, RouterOptions};
pub use service::InventoryService;
