//! # API Error Type
//!
//! Unified error type for kiosk commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Basil                                  │
//! │                                                                         │
//! │  Renderer                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  set_quantity(ctx, "bread", 12)                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  Command Function                                                │   │
//! │  │  Result<T, ApiError>                                             │   │
//! │  │         │                                                        │   │
//! │  │         ▼                                                        │   │
//! │  │  Quantity rejected? ─── QuantityError::OutOfRange ──┐            │   │
//! │  │         │                                           │            │   │
//! │  │         ▼                                           ▼            │   │
//! │  │  Unknown option? ─── CatalogError::UnknownOption ── ApiError ───►│   │
//! │  │         │                                                        │   │
//! │  │         ▼                                                        │   │
//! │  │  Success ───────────────────────────────────────────────────────►│   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  { "code": "QUANTITY_REJECTED",                                         │
//! │    "message": "Quantity 12 is outside 1..=9" }                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use basil_core::{CatalogError, CoreError, QuantityError};
use serde::Serialize;
use ts_rs::TS;

use crate::state::ConfigError;

/// API error returned from kiosk commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: soup"
/// }
/// ```
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Unknown product, parameter group, option or cart entry
    NotFound,

    /// Catalog content failed validation
    ValidationError,

    /// The quantity stepper refused the value
    QuantityRejected,

    /// Cart operation failed
    CartError,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<QuantityError> for ApiError {
    fn from(err: QuantityError) -> Self {
        match err {
            QuantityError::NotANumber { input } => ApiError::new(
                ErrorCode::QuantityRejected,
                format!("'{}' is not a quantity", input),
            ),
            QuantityError::OutOfRange { value, min, max } => ApiError::new(
                ErrorCode::QuantityRejected,
                format!("Quantity {} is outside {}..={}", value, min, max),
            ),
            QuantityError::InvalidBounds { .. } => {
                tracing::error!("Counter misconfigured: {}", err);
                ApiError::internal(err.to_string())
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownProduct(id) => ApiError::not_found("Product", &id),
            CatalogError::UnknownParam { .. } | CatalogError::UnknownOption { .. } => {
                ApiError::new(ErrorCode::NotFound, err.to_string())
            }
            CatalogError::PriceOverflow { .. } | CatalogError::Parse(_) => {
                ApiError::validation(err.to_string())
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Quantity(e) => e.into(),
            CoreError::Catalog(e) => e.into(),
            CoreError::EntryNotFound(id) => ApiError::new(
                ErrorCode::CartError,
                format!("Cart entry not found: {}", id),
            ),
            CoreError::CartOverflow { .. } => ApiError::new(ErrorCode::CartError, err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
