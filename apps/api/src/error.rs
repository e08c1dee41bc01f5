//! # API Error Type
//!
//! Unified error type for GraphQL resolvers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  Web client                  Rust Backend                               │
//! │  ──────────                  ────────────                               │
//! │                                                                         │
//! │  mutation { createItem(..) }                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  InventoryService                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ─── ValidationError::Required ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Database Error? ─── DbError::QueryFailed(..) ── ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {                                                                      │
//! │    "errors": [{                                                         │
//! │      "message": "name is required",                                     │
//! │      "extensions": { "code": "VALIDATION_ERROR" }                       │
//! │    }]                                                                   │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## GraphQL Error Serialization
//! `async-graphql` converts anything `Display` into a plain error, which would
//! drop the code. Resolvers call [`ErrorExtensions::extend`] instead so the
//! code lands in `extensions.code`.

use async_graphql::ErrorExtensions;
use serde::Serialize;
use stockroom_core::{CoreError, ValidationError};
use stockroom_db::DbError;

/// API error returned from the inventory service.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Resource not found
    NotFound,

    /// Unique constraint violated
    Conflict,

    /// Database operation failed
    DatabaseError,

    /// Internal server error
    Internal,
}

impl ErrorCode {
    /// The string clients see in `extensions.code`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
///
/// ## Mapping
/// ```text
/// DbError::NotFound         → NOT_FOUND
/// DbError::UniqueViolation  → CONFLICT
/// DbError::Domain(..)       → VALIDATION_ERROR
/// everything else           → DATABASE_ERROR
/// ```
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            conflict @ DbError::UniqueViolation { .. } => {
                ApiError::new(ErrorCode::Conflict, conflict.to_string())
            }
            DbError::Domain(core) => ApiError::from(core),
            other => {
                tracing::error!(error = %other, "Database error");
                ApiError::new(ErrorCode::DatabaseError, other.to_string())
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(v) => ApiError::from(v),
            range @ CoreError::AmountOutOfRange { .. } => ApiError::validation(range.to_string()),
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.message.clone())
            .extend_with(|_, e| e.set("code", self.code.as_str()))
    }
}

/// Result type for service operations.
pub type ApiResult<T> = Result<T, ApiError>;
