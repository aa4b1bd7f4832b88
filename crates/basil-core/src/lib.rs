//! # basil-core: Pure Ordering Logic for Basil
//!
//! This crate is the **heart** of the Basil menu. It holds the pricing,
//! quantity and cart rules as pure functions and plain owned state, with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Basil Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                 Rendering layer (external)                      │    │
//! │  │    Menu panels ──► Option images ──► Cart summary ──► Checkout  │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                    kiosk (AppContext)                           │    │
//! │  │    select_option, set_quantity, add_to_cart, get_cart, ...      │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ basil-core (THIS CRATE) ★                       │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌─────────────┐  ┌──────────┐   │    │
//! │  │   │  catalog  │  │  counter  │  │configurator │  │   cart   │   │    │
//! │  │   │  Product  │  │  Bounded  │  │  compute    │  │   Cart   │   │    │
//! │  │   │  Options  │  │  Counter  │  │  LineItem   │  │  Totals  │   │    │
//! │  │   └───────────┘  └───────────┘  └─────────────┘  └──────────┘   │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO RENDERING • NO NETWORK • PURE FUNCTIONS           │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Read-only product, parameter group and option definitions
//! - [`counter`] - Bounded quantity stepper with change observers
//! - [`selection`] - Chosen option ids per parameter group
//! - [`configurator`] - Unit/total price computation and line item snapshots
//! - [`cart`] - Ordered line items and cart totals
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Catalog validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use basil_core::{compute, Catalog, Selection};
//!
//! let catalog = Catalog::from_json(r#"{
//!   "products": {
//!     "bread": {
//!       "name": "Bread",
//!       "price": 2000,
//!       "params": {
//!         "toppings": {
//!           "label": "Toppings",
//!           "options": {
//!             "olives": { "label": "Olives", "price": 200, "default": true },
//!             "redPeppers": { "label": "Red peppers", "price": 300 }
//!           }
//!         }
//!       }
//!     }
//!   }
//! }"#).unwrap();
//!
//! let bread = catalog.product("bread").unwrap();
//! let mut selection = Selection::new();
//! selection.select("toppings", "redPeppers");
//!
//! let quote = compute(bread, &selection, 3).unwrap();
//! assert_eq!(quote.unit_price.cents(), 2100);
//! assert_eq!(quote.total_price.cents(), 6300);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod configurator;
pub mod counter;
pub mod error;
pub mod money;
pub mod selection;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEntry, CartSummary, CartTotals, ChosenGroup, DeliveryPolicy, EntryId, LineItem};
pub use catalog::{Catalog, CatalogEntry, ParamGroup, ParamKind, ProductOption};
pub use configurator::{compute, option_key, to_line_item, OptionFlag, PriceQuote};
pub use counter::{BoundedCounter, CounterSettings, QuantityChange, QuantityChanged, SubscriptionId};
pub use error::{CatalogError, CoreError, CoreResult, QuantityError, ValidationError};
pub use money::Money;
pub use selection::Selection;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantity a freshly opened product starts at.
pub const DEFAULT_QUANTITY: i64 = 1;

/// Smallest quantity the stepper accepts.
pub const MIN_QUANTITY: i64 = 1;

/// Largest quantity the stepper accepts.
///
/// ## Business Reason
/// A single stepper digit. Larger orders go through the phone line.
pub const MAX_QUANTITY: i64 = 9;

/// Flat delivery fee added to every non-empty cart (20.00).
pub const DEFAULT_DELIVERY_FEE: Money = Money::from_cents(2000);
