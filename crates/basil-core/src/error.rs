//! # Error Types
//!
//! Domain-specific error types for basil-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  basil-core errors (this file)                                          │
//! │  ├── CoreError        - Umbrella for everything below                   │
//! │  ├── QuantityError    - Stepper input rejected (InvalidQuantity)        │
//! │  ├── CatalogError     - Unknown product/group/option, bad catalog JSON  │
//! │  └── ValidationError  - Catalog content failures                        │
//! │                                                                         │
//! │  kiosk errors (app crate)                                               │
//! │  └── ApiError         - What the rendering layer sees (serialized)      │
//! │                                                                         │
//! │  Flow: QuantityError/CatalogError → CoreError → ApiError → Renderer     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core ordering errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Quantity input was rejected by the stepper.
    #[error("Invalid quantity: {0}")]
    Quantity(#[from] QuantityError),

    /// The catalog or a selection against it is malformed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A cart entry handle does not refer to anything in the cart.
    ///
    /// ## When This Occurs
    /// - The entry was already removed
    /// - The cart was cleared after the handle was handed out
    #[error("Cart entry not found: {0}")]
    EntryNotFound(String),

    /// Adding the line would push the cart total past what `Money` holds.
    #[error("Cart total out of range after adding {product}")]
    CartOverflow { product: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Quantity Error
// =============================================================================

/// Rejections from the quantity stepper.
///
/// A rejected value never changes the counter and never notifies observers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    /// Input did not start with an integer.
    #[error("'{input}' is not a number")]
    NotANumber { input: String },

    /// Parsed value lies outside the stepper bounds.
    ///
    /// ## User Workflow
    /// ```text
    /// Quantity: 9   [+] clicked
    ///      │
    ///      ▼
    /// set_value(10)
    ///      │
    ///      ▼
    /// OutOfRange { value: 10, min: 1, max: 9 }
    ///      │
    ///      ▼
    /// Input field snaps back to "9"
    /// ```
    #[error("{value} is outside {min}..={max}")]
    OutOfRange { value: i64, min: i64, max: i64 },

    /// Counter settings themselves are inconsistent.
    #[error("Invalid bounds: min {min}, max {max}, default {default_value}")]
    InvalidBounds {
        min: i64,
        max: i64,
        default_value: i64,
    },
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Catalog lookups and selections that reference things the catalog lacks.
///
/// Treated as precondition violations: callers fail fast instead of
/// pricing around the missing data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    UnknownProduct(String),

    /// Selection names a parameter group the product does not have.
    #[error("Product {product} has no parameter group '{param}'")]
    UnknownParam { product: String, param: String },

    /// Selection names an option the parameter group does not have.
    #[error("Parameter group {param} of {product} has no option '{option}'")]
    UnknownOption {
        product: String,
        param: String,
        option: String,
    },

    /// A quote for the product does not fit in `Money`.
    ///
    /// Only reachable for entries built without validation, or for
    /// quantities far beyond the stepper bounds.
    #[error("Price of {product} is out of range")]
    PriceOverflow { product: String },

    /// Catalog JSON could not be decoded.
    #[error("Catalog could not be parsed: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Catalog content validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Price is above the catalog ceiling.
    #[error("{field} must be at most {max}")]
    TooExpensive { field: String, max: Money },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
