//! # Product Session
//!
//! Per-product configuration state: what is chosen, how many, and the
//! quote those produce.
//!
//! ## Update Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  toggle/select/deselect ──► Selection ──┐                               │
//! │                                         ├──► compute() ──► PriceQuote   │
//! │  set/increment/decrement ──► Counter ───┘        ▲                      │
//! │        │                                         │                      │
//! │        └── Unchanged / Err: quote kept ──────────┘ (no recompute)       │
//! │                                                                         │
//! │  commit() ──► compute() again ──► to_line_item() ──► LineItem           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method takes the product's [`CatalogEntry`] by reference; the
//! session only stores ids and counts.

use basil_core::{
    compute, to_line_item, BoundedCounter, CatalogEntry, CoreResult, CounterSettings, LineItem,
    PriceQuote, QuantityChange, Selection,
};
use tracing::debug;

#[derive(Debug)]
pub struct ProductSession {
    product_id: String,
    selection: Selection,
    counter: BoundedCounter,
    quote: PriceQuote,
}

impl ProductSession {
    /// Opens a session with the default options chosen and the counter at
    /// its starting value.
    pub fn new(entry: &CatalogEntry, settings: CounterSettings) -> CoreResult<Self> {
        let selection = Selection::defaults_for(entry);
        let counter = BoundedCounter::new(settings)?;
        let quote = compute(entry, &selection, counter.value())?;

        Ok(ProductSession {
            product_id: entry.id.clone(),
            selection,
            counter,
            quote,
        })
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn counter(&self) -> &BoundedCounter {
        &self.counter
    }

    /// External listeners subscribe through this.
    pub fn counter_mut(&mut self) -> &mut BoundedCounter {
        &mut self.counter
    }

    pub fn quote(&self) -> &PriceQuote {
        &self.quote
    }

    // =========================================================================
    // Option Mutations
    // =========================================================================

    /// Flips a checkbox option. In radio and select groups the option
    /// becomes the group's only choice instead.
    pub fn toggle_option(
        &mut self,
        entry: &CatalogEntry,
        param_id: &str,
        option_id: &str,
    ) -> CoreResult<&PriceQuote> {
        entry.option(param_id, option_id)?;

        if entry.param(param_id)?.kind.is_exclusive() {
            self.selection.set_exclusive(param_id, option_id);
        } else {
            self.selection.toggle(param_id, option_id);
        }

        self.recompute(entry)
    }

    pub fn select_option(
        &mut self,
        entry: &CatalogEntry,
        param_id: &str,
        option_id: &str,
    ) -> CoreResult<&PriceQuote> {
        entry.option(param_id, option_id)?;

        if entry.param(param_id)?.kind.is_exclusive() {
            self.selection.set_exclusive(param_id, option_id);
        } else {
            self.selection.select(param_id, option_id);
        }

        self.recompute(entry)
    }

    pub fn deselect_option(
        &mut self,
        entry: &CatalogEntry,
        param_id: &str,
        option_id: &str,
    ) -> CoreResult<&PriceQuote> {
        entry.option(param_id, option_id)?;
        self.selection.deselect(param_id, option_id);
        self.recompute(entry)
    }

    // =========================================================================
    // Quantity Mutations
    // =========================================================================

    pub fn set_quantity(&mut self, entry: &CatalogEntry, value: i64) -> CoreResult<QuantityChange> {
        let change = self.counter.set_value(value)?;
        self.after_quantity(entry, change)
    }

    /// Raw text from the quantity input field.
    pub fn set_quantity_input(
        &mut self,
        entry: &CatalogEntry,
        input: &str,
    ) -> CoreResult<QuantityChange> {
        let change = self.counter.set_input(input)?;
        self.after_quantity(entry, change)
    }

    pub fn increment(&mut self, entry: &CatalogEntry) -> CoreResult<QuantityChange> {
        let change = self.counter.increment()?;
        self.after_quantity(entry, change)
    }

    pub fn decrement(&mut self, entry: &CatalogEntry) -> CoreResult<QuantityChange> {
        let change = self.counter.decrement()?;
        self.after_quantity(entry, change)
    }

    fn after_quantity(
        &mut self,
        entry: &CatalogEntry,
        change: QuantityChange,
    ) -> CoreResult<QuantityChange> {
        if change.is_changed() {
            self.recompute(entry)?;
        }
        Ok(change)
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Re-prices the current selection and quantity.
    pub fn recompute(&mut self, entry: &CatalogEntry) -> CoreResult<&PriceQuote> {
        self.quote = compute(entry, &self.selection, self.counter.value())?;
        debug!(
            product = %self.product_id,
            quantity = self.quote.quantity,
            unit = self.quote.unit_price.cents(),
            total = self.quote.total_price.cents(),
            "Quote recomputed"
        );
        Ok(&self.quote)
    }

    /// Snapshots the configuration as a cart line.
    ///
    /// The quote is refreshed first so the line never carries a stale price.
    pub fn commit(&mut self, entry: &CatalogEntry) -> CoreResult<LineItem> {
        self.recompute(entry)?;
        Ok(to_line_item(entry, &self.selection, self.counter.value())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basil_core::{Catalog, CatalogError, CoreError, Money, QuantityError};

    const MENU: &str = r#"{"products": {"bread": {
        "name": "Bread",
        "price": 2000,
        "params": {
            "toppings": {"label": "Toppings", "options": {
                "olives": {"label": "Olives", "price": 200, "default": true},
                "redPeppers": {"label": "Red peppers", "price": 300}
            }},
            "crust": {"label": "Crust", "type": "radios", "options": {
                "classic": {"label": "Classic", "price": 0, "default": true},
                "thin": {"label": "Thin", "price": 100}
            }}
        }}}}"#;

    fn bread() -> CatalogEntry {
        Catalog::from_json(MENU)
            .unwrap()
            .product("bread")
            .unwrap()
            .clone()
    }

    fn session(entry: &CatalogEntry) -> ProductSession {
        ProductSession::new(entry, CounterSettings::default()).unwrap()
    }

    #[test]
    fn test_new_session_starts_at_defaults() {
        let entry = bread();
        let session = session(&entry);

        assert_eq!(session.product_id(), "bread");
        assert_eq!(session.counter().value(), 1);
        assert!(session.selection().is_selected("toppings", "olives"));
        assert_eq!(session.quote().unit_price, Money::from_major(20));
    }

    #[test]
    fn test_toggle_checkbox_and_radio() {
        let entry = bread();
        let mut session = session(&entry);

        let quote = session.toggle_option(&entry, "toppings", "olives").unwrap();
        assert_eq!(quote.unit_price, Money::from_major(18));

        session.toggle_option(&entry, "crust", "thin").unwrap();
        assert!(session.selection().is_selected("crust", "thin"));
        assert!(!session.selection().is_selected("crust", "classic"));

        // A radio stays chosen when clicked again.
        session.toggle_option(&entry, "crust", "thin").unwrap();
        assert!(session.selection().is_selected("crust", "thin"));
        assert_eq!(session.quote().unit_price, Money::from_major(19));
    }

    #[test]
    fn test_unknown_option_rejected_before_mutation() {
        let entry = bread();
        let mut session = session(&entry);

        let err = session
            .select_option(&entry, "toppings", "pineapple")
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Catalog(CatalogError::UnknownOption { .. })
        ));
        assert!(!session.selection().is_selected("toppings", "pineapple"));
    }

    #[test]
    fn test_quantity_change_recomputes_total() {
        let entry = bread();
        let mut session = session(&entry);

        let change = session.set_quantity(&entry, 3).unwrap();
        assert!(change.is_changed());
        assert_eq!(session.quote().total_price, Money::from_major(60));

        assert!(!session.set_quantity_input(&entry, "3 loaves").unwrap().is_changed());
        session.decrement(&entry).unwrap();
        assert_eq!(session.quote().total_price, Money::from_major(40));
    }

    #[test]
    fn test_rejected_quantity_keeps_quote() {
        let entry = bread();
        let mut session = session(&entry);
        session.set_quantity(&entry, 9).unwrap();

        let err = session.increment(&entry).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Quantity(QuantityError::OutOfRange { value: 10, .. })
        ));
        assert!(session.set_quantity_input(&entry, "lots").is_err());
        assert_eq!(session.counter().display(), "9");
        assert_eq!(session.quote().quantity, 9);
    }

    #[test]
    fn test_commit_builds_line_item() {
        let entry = bread();
        let mut session = session(&entry);
        session.deselect_option(&entry, "toppings", "olives").unwrap();
        session.select_option(&entry, "toppings", "redPeppers").unwrap();
        session.set_quantity(&entry, 3).unwrap();

        let item = session.commit(&entry).unwrap();
        assert_eq!(item.unit_price, Money::from_major(21));
        assert_eq!(item.total_price, Money::from_major(63));
        assert_eq!(item.options_for("Toppings"), Some(&["Red peppers".to_string()][..]));
        assert_eq!(item.options_for("Crust"), Some(&["Classic".to_string()][..]));
    }
}
