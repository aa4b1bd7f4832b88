//! # Cart
//!
//! The ordered list of committed line items plus the cart totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Commit product ─────────► add(item) ──────► entries.push(entry)        │
//! │                                              (never merged)             │
//! │                                                                         │
//! │  Click Remove ───────────► remove(id) ─────► entries.remove(i)          │
//! │                                                                         │
//! │  Order sent ─────────────► clear() ────────► entries.clear()            │
//! │                                                                         │
//! │  View Cart ──────────────► compute_totals() (read only)                 │
//! │                                                                         │
//! │  subtotal = Σ item.total_price                                          │
//! │  total    = subtotal + delivery fee                                     │
//! │             (fee dropped for an empty cart unless policy says Always)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::DEFAULT_DELIVERY_FEE;

// =============================================================================
// Line Item
// =============================================================================

/// The chosen option labels of one parameter group on a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChosenGroup {
    pub param_id: String,
    pub label: String,
    /// Labels of the chosen options, in catalog order.
    pub options: Vec<String>,
}

/// An immutable snapshot of one configured product.
///
/// ## Snapshot Pattern
/// Name, prices and option labels are copied out of the catalog when the
/// product is committed, so the cart line never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    /// unit_price × quantity.
    pub total_price: Money,
    /// Every parameter group of the product, in catalog order.
    pub chosen: Vec<ChosenGroup>,
}

impl LineItem {
    /// Chosen option labels for a group, looked up by its label.
    pub fn options_for(&self, group_label: &str) -> Option<&[String]> {
        self.chosen
            .iter()
            .find(|group| group.label == group_label)
            .map(|group| group.options.as_slice())
    }
}

// =============================================================================
// Cart Entry
// =============================================================================

/// Handle to one entry of the cart.
///
/// Two identical line items are two entries with two different handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    fn generate() -> Self {
        EntryId(Uuid::new_v4())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EntryId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(EntryId)
            .map_err(|_| CoreError::EntryNotFound(s.to_string()))
    }
}

/// A line item as it sits in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartEntry {
    #[ts(as = "String")]
    pub id: EntryId,

    pub item: LineItem,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

// =============================================================================
// Delivery Policy
// =============================================================================

/// Whether the delivery fee applies to a cart with nothing in it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DeliveryPolicy {
    /// An empty cart totals zero.
    #[default]
    SuppressWhenEmpty,
    /// The fee shows even when the cart is empty.
    Always,
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Number of entries (cart header badge).
    pub item_count: usize,
    /// Sum of entry quantities.
    pub total_quantity: i64,
    pub subtotal: Money,
    /// Fee actually charged, zero when suppressed.
    pub delivery_fee: Money,
    pub total: Money,
}

/// Entries and totals in one payload, for display or checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    pub entries: Vec<CartEntry>,
    pub totals: CartTotals,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Entries keep the order they were added in
/// - `add` never merges; the same product twice is two entries
/// - Entries are never modified after being added
/// - Subtotal plus fee always fits in `Money`; `add` refuses a line that
///   would break this
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    entries: Vec<CartEntry>,
    delivery_fee: Money,
    delivery_policy: DeliveryPolicy,
}

impl Cart {
    /// Creates an empty cart with a flat delivery fee.
    pub fn new(delivery_fee: Money) -> Self {
        Cart {
            entries: Vec::new(),
            delivery_fee,
            delivery_policy: DeliveryPolicy::default(),
        }
    }

    pub fn with_delivery_policy(mut self, policy: DeliveryPolicy) -> Self {
        self.delivery_policy = policy;
        self
    }

    /// Appends a line item and returns the handle of its entry.
    ///
    /// ## Errors
    /// `CartOverflow` if the new total would not fit in `Money`. The cart is
    /// left unchanged.
    pub fn add(&mut self, item: LineItem) -> CoreResult<EntryId> {
        let line_totals = self.entries.iter().map(|entry| entry.item.total_price);
        let fits = Money::checked_sum(line_totals.chain([item.total_price, self.delivery_fee]))
            .is_some();
        if !fits {
            return Err(CoreError::CartOverflow {
                product: item.product_id,
            });
        }

        let id = EntryId::generate();
        info!(
            entry = %id,
            product = %item.product_id,
            quantity = item.quantity,
            total = item.total_price.cents(),
            "Line item added to cart"
        );
        self.entries.push(CartEntry {
            id,
            item,
            added_at: Utc::now(),
        });
        Ok(id)
    }

    /// Removes one entry and returns its line item.
    pub fn remove(&mut self, id: EntryId) -> CoreResult<LineItem> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| CoreError::EntryNotFound(id.to_string()))?;

        let entry = self.entries.remove(index);
        info!(entry = %id, product = %entry.item.product_id, "Line item removed from cart");
        Ok(entry.item)
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        debug!(entries = self.entries.len(), "Cart cleared");
        self.entries.clear();
    }

    pub fn get(&self, id: EntryId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Entries in the order they were added.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Σ of entry quantities.
    pub fn total_quantity(&self) -> i64 {
        self.entries.iter().map(|entry| entry.item.quantity).sum()
    }

    /// Σ of line totals.
    pub fn subtotal(&self) -> Money {
        Money::saturating_sum(self.entries.iter().map(|entry| entry.item.total_price))
    }

    /// The fee this cart is charged under its delivery policy.
    pub fn delivery_charge(&self) -> Money {
        match self.delivery_policy {
            DeliveryPolicy::SuppressWhenEmpty if self.is_empty() => Money::zero(),
            _ => self.delivery_fee,
        }
    }

    pub fn total(&self) -> Money {
        self.subtotal().saturating_add(self.delivery_charge())
    }

    pub fn compute_totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.len(),
            total_quantity: self.total_quantity(),
            subtotal: self.subtotal(),
            delivery_fee: self.delivery_charge(),
            total: self.total(),
        }
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            entries: self.entries.clone(),
            totals: self.compute_totals(),
        }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new(DEFAULT_DELIVERY_FEE)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line_item(product: &str, unit_cents: i64, quantity: i64) -> LineItem {
        LineItem {
            product_id: product.to_string(),
            name: format!("Product {}", product),
            quantity,
            unit_price: Money::from_cents(unit_cents),
            total_price: Money::from_cents(unit_cents * quantity),
            chosen: vec![ChosenGroup {
                param_id: "toppings".to_string(),
                label: "Toppings".to_string(),
                options: vec!["Red peppers".to_string()],
            }],
        }
    }

    #[test]
    fn test_add_keeps_order() {
        let mut cart = Cart::default();
        cart.add(line_item("bread", 2100, 3)).unwrap();
        cart.add(line_item("cake", 900, 1)).unwrap();

        let products: Vec<&str> = cart
            .entries()
            .iter()
            .map(|e| e.item.product_id.as_str())
            .collect();
        assert_eq!(products, vec!["bread", "cake"]);
    }

    #[test]
    fn test_identical_items_are_not_merged() {
        let mut cart = Cart::default();
        let item = line_item("bread", 2100, 3);

        let first = cart.add(item.clone()).unwrap();
        let second = cart.add(item.clone()).unwrap();

        assert_ne!(first, second);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.subtotal(), Money::from_major(126));
        assert_eq!(cart.total_quantity(), 6);
    }

    #[test]
    fn test_totals_include_delivery_fee() {
        let mut cart = Cart::new(Money::from_major(20));
        cart.add(line_item("bread", 2100, 3)).unwrap();

        let totals = cart.compute_totals();
        assert_eq!(totals.item_count, 1);
        assert_eq!(totals.subtotal, Money::from_major(63));
        assert_eq!(totals.delivery_fee, Money::from_major(20));
        assert_eq!(totals.total, Money::from_major(83));
    }

    #[test]
    fn test_empty_cart_suppresses_fee_by_default() {
        let cart = Cart::new(Money::from_major(20));
        let totals = cart.compute_totals();
        assert!(totals.subtotal.is_zero());
        assert!(totals.delivery_fee.is_zero());
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_empty_cart_with_always_policy() {
        let cart = Cart::new(Money::from_major(20)).with_delivery_policy(DeliveryPolicy::Always);
        assert_eq!(cart.total(), Money::from_major(20));
    }

    #[test]
    fn test_remove_entry() {
        let mut cart = Cart::default();
        let bread = cart.add(line_item("bread", 2100, 3)).unwrap();
        let cake = cart.add(line_item("cake", 900, 1)).unwrap();

        let removed = cart.remove(bread).unwrap();
        assert_eq!(removed.product_id, "bread");
        assert_eq!(cart.len(), 1);
        assert!(cart.get(cake).is_some());
        assert!(cart.get(bread).is_none());

        assert!(matches!(
            cart.remove(bread),
            Err(CoreError::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_remove_one_of_two_identical_entries() {
        let mut cart = Cart::default();
        let item = line_item("bread", 2100, 1);
        let first = cart.add(item.clone()).unwrap();
        let second = cart.add(item).unwrap();

        cart.remove(first).unwrap();
        assert_eq!(cart.entries()[0].id, second);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::default();
        cart.add(line_item("bread", 2100, 3)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_entry_id_parsing() {
        let mut cart = Cart::default();
        let id = cart.add(line_item("bread", 2100, 1)).unwrap();
        let parsed: EntryId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<EntryId>().is_err());
    }

    #[test]
    fn test_add_refuses_unrepresentable_total() {
        let mut cart = Cart::new(Money::from_major(20));
        let mut gold = line_item("gold", 1, 1);
        gold.total_price = Money::from_cents(i64::MAX - 5000);
        cart.add(gold.clone()).unwrap();

        let err = cart.add(gold).unwrap_err();
        assert!(matches!(err, CoreError::CartOverflow { ref product } if product == "gold"));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Money::from_cents(i64::MAX - 3000));

        let mut edge = line_item("gold", 1, 1);
        edge.total_price = Money::from_cents(i64::MAX - 5000);
        assert!(Cart::new(Money::from_cents(5001)).add(edge.clone()).is_err());
        assert!(Cart::new(Money::from_cents(5000)).add(edge).is_ok());
    }

    #[test]
    fn test_options_for_group_label() {
        let item = line_item("bread", 2100, 1);
        assert_eq!(
            item.options_for("Toppings").map(|o| o.to_vec()),
            Some(vec!["Red peppers".to_string()])
        );
        assert!(item.options_for("Sauce").is_none());
    }
}
