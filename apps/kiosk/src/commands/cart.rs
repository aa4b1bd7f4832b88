//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                         │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │  (rendering layer)      │
//! │  │  Cart    │     │          │     │          │                         │
//! │  └──────────┘     └──────────┘     └──────────┘                         │
//! │                        │                                                │
//! │                   add_to_cart      (never merges identical lines)       │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                    │
//! │                                                      (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use basil_core::{CartSummary, EntryId, LineItem};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::AppContext;

/// What `add_to_cart` hands back.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AddToCartResponse {
    #[ts(as = "String")]
    pub entry_id: EntryId,
    pub item: LineItem,
    pub cart: CartSummary,
}

/// Cart drawer state and contents.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartPanelResponse {
    pub open: bool,
    pub cart: CartSummary,
}

/// Gets the current cart contents and totals.
///
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │  CART                                              2 items     │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Bread  x3   Toppings: Red peppers              $63.00         │
/// │  Cake   x1                                      $35.00         │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Subtotal                                       $98.00         │
/// │  Delivery                                       $20.00         │
/// │  ──────────────────────────────────────────────────            │
/// │  TOTAL                                         $118.00         │
/// └────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(ctx: &AppContext) -> CartSummary {
    debug!("get_cart command");
    ctx.cart.summary()
}

/// Adds the product's current configuration to the cart.
///
/// ## Behavior
/// - The line is priced from the selection and quantity as they are now
/// - An identical configuration added twice gives two lines
/// - Prices are frozen on the line; later edits to the product do not
///   touch it
pub fn add_to_cart(ctx: &mut AppContext, product_id: &str) -> Result<AddToCartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let entry_id = ctx.commit(product_id)?;
    let item = ctx
        .cart
        .get(entry_id)
        .map(|entry| entry.item.clone())
        .ok_or_else(|| ApiError::internal("Committed entry missing from cart"))?;

    Ok(AddToCartResponse {
        entry_id,
        item,
        cart: ctx.cart.summary(),
    })
}

/// Removes one cart line by the id `add_to_cart` returned.
pub fn remove_from_cart(ctx: &mut AppContext, entry_id: &str) -> Result<CartSummary, ApiError> {
    debug!(entry_id = %entry_id, "remove_from_cart command");

    let id: EntryId = entry_id.parse()?;
    ctx.cart.remove(id)?;
    Ok(ctx.cart.summary())
}

pub fn clear_cart(ctx: &mut AppContext) -> CartSummary {
    debug!("clear_cart command");
    ctx.cart.clear();
    ctx.cart.summary()
}

/// Opens or closes the cart drawer.
pub fn toggle_cart_panel(ctx: &mut AppContext) -> CartPanelResponse {
    debug!("toggle_cart_panel command");
    CartPanelResponse {
        open: ctx.ui.toggle_cart(),
        cart: ctx.cart.summary(),
    }
}
