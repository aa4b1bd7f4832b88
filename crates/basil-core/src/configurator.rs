//! # Product Configurator
//!
//! Prices one product from its catalog entry, the user's selection and the
//! stepper quantity, and freezes the result into a [`LineItem`] when the
//! product goes into the cart.
//!
//! ## Pricing Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  unit = base_price + Σ over every (group, option) in catalog order:     │
//! │                                                                         │
//! │                     │  selected        │  not selected                  │
//! │   ──────────────────┼──────────────────┼──────────────────              │
//! │   default option    │  0               │  − price_delta                 │
//! │   extra option      │  + price_delta   │  0                             │
//! │                                                                         │
//! │  total = unit × quantity                                                │
//! │                                                                         │
//! │  Bread 20.00, olives (default, 2.00) removed, red peppers (3.00) added  │
//! │     → 20 − 2 + 3 = 21.00 each, × 3 = 63.00                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No floor is applied: removing expensive defaults can push the unit price
//! below zero and the quote reports it as is.
//!
//! Both functions are pure. The same inputs always give the same quote.

use serde::Serialize;
use tracing::trace;
use ts_rs::TS;

use crate::cart::{ChosenGroup, LineItem};
use crate::catalog::CatalogEntry;
use crate::error::CatalogError;
use crate::money::Money;
use crate::selection::Selection;

// =============================================================================
// Quote Types
// =============================================================================

/// Whether one option is currently chosen, keyed `"{param}-{option}"`.
///
/// The key matches the class the rendering layer puts on the option's
/// image, so it can toggle visibility without knowing the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OptionFlag {
    pub key: String,
    pub param_id: String,
    pub option_id: String,
    pub active: bool,
}

/// Live price of a product under configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceQuote {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub total_price: Money,
    /// One flag per catalog option, in catalog order.
    pub flags: Vec<OptionFlag>,
}

impl PriceQuote {
    /// Looks up a flag by its `"{param}-{option}"` key.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.flags.iter().find(|f| f.key == key).map(|f| f.active)
    }

    pub fn is_active(&self, param_id: &str, option_id: &str) -> bool {
        self.flag(&option_key(param_id, option_id))
            .unwrap_or(false)
    }
}

/// Builds the `"{param}-{option}"` flag key.
pub fn option_key(param_id: &str, option_id: &str) -> String {
    format!("{}-{}", param_id, option_id)
}

// =============================================================================
// Operations
// =============================================================================

/// Computes unit price, total price and option flags.
///
/// ## Errors
/// `UnknownParam` / `UnknownOption` if the selection names anything the
/// product does not define. Stray ids are never priced as zero.
/// `PriceOverflow` if the unit or total price does not fit in `Money`.
pub fn compute(
    entry: &CatalogEntry,
    selection: &Selection,
    quantity: i64,
) -> Result<PriceQuote, CatalogError> {
    selection.check_against(entry)?;

    let mut unit_price = entry.base_price;
    let mut flags = Vec::new();

    for (param_id, _, option_id, option) in entry.options() {
        let selected = selection.is_selected(param_id, option_id);

        let adjusted = match (option.is_default, selected) {
            (true, false) => unit_price.checked_sub(option.price_delta),
            (false, true) => unit_price.checked_add(option.price_delta),
            _ => Some(unit_price),
        };
        unit_price = adjusted.ok_or_else(|| price_overflow(entry))?;

        flags.push(OptionFlag {
            key: option_key(param_id, option_id),
            param_id: param_id.to_string(),
            option_id: option_id.to_string(),
            active: selected,
        });
    }

    let total_price = unit_price
        .multiply_quantity(quantity)
        .ok_or_else(|| price_overflow(entry))?;
    trace!(
        product = %entry.id,
        quantity,
        unit = unit_price.cents(),
        total = total_price.cents(),
        "Price computed"
    );

    Ok(PriceQuote {
        product_id: entry.id.clone(),
        quantity,
        unit_price,
        total_price,
        flags,
    })
}

fn price_overflow(entry: &CatalogEntry) -> CatalogError {
    CatalogError::PriceOverflow {
        product: entry.id.clone(),
    }
}

/// Freezes the current configuration into a cart line.
///
/// Prices are recomputed here from the inputs, never taken from an earlier
/// quote. Every parameter group appears in catalog order with the labels of
/// its chosen options in catalog order; a group with nothing chosen is kept
/// with an empty list.
pub fn to_line_item(
    entry: &CatalogEntry,
    selection: &Selection,
    quantity: i64,
) -> Result<LineItem, CatalogError> {
    let quote = compute(entry, selection, quantity)?;

    let chosen = entry
        .params
        .iter()
        .map(|(param_id, group)| ChosenGroup {
            param_id: param_id.to_string(),
            label: group.label.clone(),
            options: group
                .options
                .iter()
                .filter(|(option_id, _)| selection.is_selected(param_id, option_id))
                .map(|(_, option)| option.label.clone())
                .collect(),
        })
        .collect();

    Ok(LineItem {
        product_id: entry.id.clone(),
        name: entry.name.clone(),
        quantity,
        unit_price: quote.unit_price,
        total_price: quote.total_price,
        chosen,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use proptest::prelude::*;

    const BREAD: &str = r#"{"products": {"bread": {
        "name": "Bread",
        "price": 2000,
        "params": {
            "toppings": {"label": "Toppings", "options": {
                "olives": {"label": "Olives", "price": 200, "default": true},
                "redPeppers": {"label": "Red peppers", "price": 300, "default": false}
            }},
            "crust": {"label": "Crust", "type": "radios", "options": {
                "classic": {"label": "Classic", "price": 0, "default": true},
                "thin": {"label": "Thin", "price": 100}
            }}
        }}}}"#;

    fn bread() -> CatalogEntry {
        Catalog::from_json(BREAD)
            .unwrap()
            .product("bread")
            .unwrap()
            .clone()
    }

    fn selection(pairs: &[(&str, &str)]) -> Selection {
        let mut selection = Selection::new();
        for (param, option) in pairs {
            selection.select(param, option);
        }
        selection
    }

    #[test]
    fn test_defaults_price_at_base() {
        let entry = bread();
        let quote = compute(&entry, &Selection::defaults_for(&entry), 1).unwrap();
        assert_eq!(quote.unit_price, Money::from_major(20));
    }

    #[test]
    fn test_removed_default_and_added_extra() {
        let entry = bread();
        let chosen = selection(&[("toppings", "redPeppers"), ("crust", "classic")]);

        let quote = compute(&entry, &chosen, 1).unwrap();
        assert_eq!(quote.unit_price, Money::from_major(21));
    }

    #[test]
    fn test_quantity_scales_total() {
        let entry = bread();
        let chosen = selection(&[("toppings", "redPeppers"), ("crust", "classic")]);

        let quote = compute(&entry, &chosen, 3).unwrap();
        assert_eq!(quote.unit_price, Money::from_major(21));
        assert_eq!(quote.total_price, Money::from_major(63));
        assert_eq!(quote.quantity, 3);
    }

    #[test]
    fn test_flags_follow_selection() {
        let entry = bread();
        let chosen = selection(&[("toppings", "redPeppers")]);
        let quote = compute(&entry, &chosen, 1).unwrap();

        assert_eq!(quote.flags.len(), 4);
        assert_eq!(quote.flag("toppings-redPeppers"), Some(true));
        assert_eq!(quote.flag("toppings-olives"), Some(false));
        assert!(!quote.is_active("crust", "thin"));
        assert_eq!(quote.flag("toppings-anchovies"), None);
        assert_eq!(quote.flags[0].key, "toppings-olives");
    }

    /// Unit price is deliberately not clamped at zero.
    #[test]
    fn test_unit_price_may_go_negative() {
        let catalog = Catalog::from_json(
            r#"{"products": {"salad": {"name": "Salad", "price": 500, "params": {
                "extras": {"label": "Extras", "options": {
                    "feta": {"label": "Feta", "price": 400, "default": true},
                    "tuna": {"label": "Tuna", "price": 600, "default": true}}}}}}}"#,
        )
        .unwrap();
        let salad = catalog.product("salad").unwrap();

        let quote = compute(salad, &Selection::new(), 2).unwrap();
        assert_eq!(quote.unit_price, Money::from_cents(-500));
        assert_eq!(quote.total_price, Money::from_cents(-1000));
    }

    #[test]
    fn test_unrepresentable_price_is_an_error() {
        let mut gold = bread();
        gold.id = "gold".to_string();
        gold.base_price = Money::from_cents(5_000_000_000_000_000_000);

        assert_eq!(
            compute(&gold, &Selection::new(), 2),
            Err(CatalogError::PriceOverflow {
                product: "gold".to_string()
            })
        );
        assert!(to_line_item(&gold, &Selection::new(), 2).is_err());

        gold.base_price = Money::from_cents(i64::MAX);
        assert!(matches!(
            compute(&gold, &selection(&[("toppings", "olives"), ("crust", "thin")]), 1),
            Err(CatalogError::PriceOverflow { .. })
        ));

        let entry = bread();
        assert!(matches!(
            compute(&entry, &Selection::defaults_for(&entry), i64::MAX),
            Err(CatalogError::PriceOverflow { .. })
        ));
    }

    #[test]
    fn test_unknown_selection_fails_fast() {
        let entry = bread();
        assert!(matches!(
            compute(&entry, &selection(&[("toppings", "pineapple")]), 1),
            Err(CatalogError::UnknownOption { .. })
        ));
        assert!(matches!(
            compute(&entry, &selection(&[("sauce", "tomato")]), 1),
            Err(CatalogError::UnknownParam { .. })
        ));
    }

    #[test]
    fn test_line_item_lists_chosen_labels_in_catalog_order() {
        let entry = bread();
        let chosen = selection(&[("toppings", "redPeppers"), ("toppings", "olives")]);

        let item = to_line_item(&entry, &chosen, 2).unwrap();
        assert_eq!(item.product_id, "bread");
        assert_eq!(item.name, "Bread");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.unit_price, Money::from_major(23));
        assert_eq!(item.total_price, Money::from_major(46));

        assert_eq!(item.chosen.len(), 2);
        assert_eq!(item.chosen[0].label, "Toppings");
        assert_eq!(item.chosen[0].options, vec!["Olives", "Red peppers"]);
        assert_eq!(item.chosen[1].label, "Crust");
        assert!(item.chosen[1].options.is_empty());
        assert_eq!(
            item.options_for("Toppings"),
            Some(&["Olives".to_string(), "Red peppers".to_string()][..])
        );
    }

    proptest! {
        #[test]
        fn prop_compute_is_pure(
            olives in any::<bool>(),
            peppers in any::<bool>(),
            thin in any::<bool>(),
            quantity in 1i64..=9,
        ) {
            let entry = bread();
            let mut chosen = Selection::new();
            if olives { chosen.select("toppings", "olives"); }
            if peppers { chosen.select("toppings", "redPeppers"); }
            if thin { chosen.select("crust", "thin"); }

            let first = compute(&entry, &chosen, quantity).unwrap();
            let second = compute(&entry, &chosen, quantity).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(Some(first.total_price), first.unit_price.multiply_quantity(quantity));

            let item = to_line_item(&entry, &chosen, quantity).unwrap();
            prop_assert_eq!(item.unit_price, first.unit_price);
            prop_assert_eq!(item.total_price, first.total_price);
        }
    }
}
