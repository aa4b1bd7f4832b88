//! # Product Commands
//!
//! Commands for browsing the menu and configuring a product.
//!
//! ## Configuration Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Configuration Flow                           │
//! │                                                                         │
//! │  get_menu ──► every product, its panel state and live quote             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  toggle_product_panel("bread") ──► panel expands, others collapse       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  toggle_option / select_option / deselect_option                        │
//! │       │                                 ──► PriceQuote                  │
//! │       ▼                                                                 │
//! │  set_quantity / set_quantity_input / increment / decrement              │
//! │       │                                 ──► QuantityResponse            │
//! │       ▼                                                                 │
//! │  add_to_cart (cart.rs)                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use basil_core::{CatalogEntry, CoreError, PriceQuote, QuantityChange};
use serde::Serialize;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{AppContext, PanelState, ProductSession};

/// A product as the menu lists it.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuProduct {
    pub product: CatalogEntry,
    pub panel: PanelState,
    pub quote: PriceQuote,
}

/// Stepper state after a quantity command.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuantityResponse {
    pub change: QuantityChange,
    /// What the input field should show now.
    pub display: String,
    pub can_increment: bool,
    pub can_decrement: bool,
    pub quote: PriceQuote,
}

impl QuantityResponse {
    fn new(change: QuantityChange, session: &ProductSession) -> Self {
        QuantityResponse {
            change,
            display: session.counter().display().to_string(),
            can_increment: session.counter().can_increment(),
            can_decrement: session.counter().can_decrement(),
            quote: session.quote().clone(),
        }
    }
}

// =============================================================================
// Menu
// =============================================================================

/// Lists every product in catalog order.
pub fn get_menu(ctx: &AppContext) -> Result<Vec<MenuProduct>, ApiError> {
    debug!("get_menu command");

    ctx.catalog()
        .products()
        .map(|entry| -> Result<MenuProduct, ApiError> {
            let session = ctx.session(&entry.id)?;
            Ok(MenuProduct {
                product: entry.clone(),
                panel: ctx.ui.panel(&entry.id),
                quote: session.quote().clone(),
            })
        })
        .collect()
}

/// Current quote for one product.
pub fn get_product_quote(ctx: &AppContext, product_id: &str) -> Result<PriceQuote, ApiError> {
    debug!(product_id = %product_id, "get_product_quote command");
    Ok(ctx.session(product_id)?.quote().clone())
}

/// Expands a product panel (collapsing the others) or collapses it.
pub fn toggle_product_panel(ctx: &mut AppContext, product_id: &str) -> Result<PanelState, ApiError> {
    debug!(product_id = %product_id, "toggle_product_panel command");
    ctx.catalog().product(product_id)?;
    Ok(ctx.ui.toggle_product(product_id))
}

// =============================================================================
// Options
// =============================================================================

pub fn toggle_option(
    ctx: &mut AppContext,
    product_id: &str,
    param_id: &str,
    option_id: &str,
) -> Result<PriceQuote, ApiError> {
    debug!(product_id = %product_id, param_id = %param_id, option_id = %option_id, "toggle_option command");
    let (entry, session) = ctx.session_mut(product_id)?;
    Ok(session.toggle_option(entry, param_id, option_id)?.clone())
}

pub fn select_option(
    ctx: &mut AppContext,
    product_id: &str,
    param_id: &str,
    option_id: &str,
) -> Result<PriceQuote, ApiError> {
    debug!(product_id = %product_id, param_id = %param_id, option_id = %option_id, "select_option command");
    let (entry, session) = ctx.session_mut(product_id)?;
    Ok(session.select_option(entry, param_id, option_id)?.clone())
}

pub fn deselect_option(
    ctx: &mut AppContext,
    product_id: &str,
    param_id: &str,
    option_id: &str,
) -> Result<PriceQuote, ApiError> {
    debug!(product_id = %product_id, param_id = %param_id, option_id = %option_id, "deselect_option command");
    let (entry, session) = ctx.session_mut(product_id)?;
    Ok(session.deselect_option(entry, param_id, option_id)?.clone())
}

// =============================================================================
// Quantity
// =============================================================================

pub fn set_quantity(
    ctx: &mut AppContext,
    product_id: &str,
    value: i64,
) -> Result<QuantityResponse, ApiError> {
    debug!(product_id = %product_id, value, "set_quantity command");
    let (entry, session) = ctx.session_mut(product_id)?;
    let change = session.set_quantity(entry, value).map_err(rejected)?;
    Ok(QuantityResponse::new(change, session))
}

/// Raw text typed into the quantity field.
pub fn set_quantity_input(
    ctx: &mut AppContext,
    product_id: &str,
    input: &str,
) -> Result<QuantityResponse, ApiError> {
    debug!(product_id = %product_id, input = %input, "set_quantity_input command");
    let (entry, session) = ctx.session_mut(product_id)?;
    let change = session.set_quantity_input(entry, input).map_err(rejected)?;
    Ok(QuantityResponse::new(change, session))
}

pub fn increment_quantity(ctx: &mut AppContext, product_id: &str) -> Result<QuantityResponse, ApiError> {
    debug!(product_id = %product_id, "increment_quantity command");
    let (entry, session) = ctx.session_mut(product_id)?;
    let change = session.increment(entry).map_err(rejected)?;
    Ok(QuantityResponse::new(change, session))
}

pub fn decrement_quantity(ctx: &mut AppContext, product_id: &str) -> Result<QuantityResponse, ApiError> {
    debug!(product_id = %product_id, "decrement_quantity command");
    let (entry, session) = ctx.session_mut(product_id)?;
    let change = session.decrement(entry).map_err(rejected)?;
    Ok(QuantityResponse::new(change, session))
}

fn rejected(err: CoreError) -> ApiError {
    if let CoreError::Quantity(e) = &err {
        warn!(reason = %e, "Quantity input rejected");
    }
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::KioskConfig;
    use basil_core::{Catalog, Money};

    fn context() -> AppContext {
        let catalog = Catalog::from_json(
            r#"{"products": {"bread": {"name": "Bread", "price": 2000, "params": {
                "toppings": {"label": "Toppings", "options": {
                    "olives": {"label": "Olives", "price": 200, "default": true},
                    "redPeppers": {"label": "Red peppers", "price": 300}}}}},
              "cake": {"name": "Cake", "price": 3500, "params": {}}}}"#,
        )
        .unwrap();
        AppContext::new(KioskConfig::default(), catalog).unwrap()
    }

    #[test]
    fn test_get_menu_in_catalog_order() {
        let ctx = context();
        let menu = get_menu(&ctx).unwrap();
        let ids: Vec<_> = menu.iter().map(|p| p.product.id.as_str()).collect();
        assert_eq!(ids, vec!["bread", "cake"]);
        assert_eq!(menu[0].panel, PanelState::Collapsed);
        assert_eq!(menu[1].quote.unit_price, Money::from_major(35));
    }

    #[test]
    fn test_option_commands_return_quote() {
        let mut ctx = context();

        let quote = toggle_option(&mut ctx, "bread", "toppings", "olives").unwrap();
        assert_eq!(quote.unit_price, Money::from_major(18));
        assert_eq!(quote.flag("toppings-olives"), Some(false));

        let quote = select_option(&mut ctx, "bread", "toppings", "redPeppers").unwrap();
        assert_eq!(quote.unit_price, Money::from_major(21));

        let quote = deselect_option(&mut ctx, "bread", "toppings", "redPeppers").unwrap();
        assert_eq!(quote.unit_price, Money::from_major(18));
        assert_eq!(get_product_quote(&ctx, "bread").unwrap(), quote);
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let mut ctx = context();
        let err = select_option(&mut ctx, "bread", "toppings", "pineapple").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = toggle_product_panel(&mut ctx, "soup").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_quantity_commands() {
        let mut ctx = context();

        let response = set_quantity(&mut ctx, "bread", 3).unwrap();
        assert!(response.change.is_changed());
        assert_eq!(response.display, "3");
        assert_eq!(response.quote.total_price, Money::from_major(60));

        let response = increment_quantity(&mut ctx, "bread").unwrap();
        assert_eq!(response.change.value(), 4);

        let response = set_quantity_input(&mut ctx, "bread", "4").unwrap();
        assert!(!response.change.is_changed());

        let response = decrement_quantity(&mut ctx, "bread").unwrap();
        assert_eq!(response.quote.quantity, 3);
    }

    #[test]
    fn test_rejected_quantity() {
        let mut ctx = context();

        let err = set_quantity(&mut ctx, "bread", 10).unwrap_err();
        assert_eq!(err.code, ErrorCode::QuantityRejected);

        let err = set_quantity_input(&mut ctx, "bread", "abc").unwrap_err();
        assert_eq!(err.code, ErrorCode::QuantityRejected);

        let err = decrement_quantity(&mut ctx, "bread").unwrap_err();
        assert_eq!(err.code, ErrorCode::QuantityRejected);
        assert_eq!(ctx.session("bread").unwrap().counter().display(), "1");
    }

    #[test]
    fn test_toggle_product_panel() {
        let mut ctx = context();
        assert_eq!(toggle_product_panel(&mut ctx, "bread").unwrap(), PanelState::Expanded);
        assert_eq!(toggle_product_panel(&mut ctx, "cake").unwrap(), PanelState::Expanded);
        assert_eq!(ctx.ui.panel("bread"), PanelState::Collapsed);
    }
}
