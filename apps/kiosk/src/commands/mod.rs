//! # Kiosk Commands Module
//!
//! All commands exposed to the rendering layer.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Menu, option choice, quantity stepper, panels
//! └── cart.rs     ◄─── Add to cart, cart summary, removal, cart drawer
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Rendering layer                                                        │
//! │  ───────────────                                                        │
//! │  user clicks "Red peppers"                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  fn toggle_option(                                                      │
//! │      ctx: &mut AppContext,   ◄── Owned by the caller                    │
//! │      product_id: &str,                                                  │
//! │      param_id: &str,                                                    │
//! │      option_id: &str,                                                   │
//! │  ) -> Result<PriceQuote, ApiError>                                      │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Renderer receives: PriceQuote (prices + option flags)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod product;
