//! # Catalog
//!
//! Read-only menu definitions: products, their parameter groups and the
//! selectable options inside each group.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  Catalog                                                                │
//! │  └── products: IndexMap<String, CatalogEntry>                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogEntry          ParamGroup             ProductOption             │
//! │  ─────────────         ─────────────          ─────────────             │
//! │  id ("pizza")          label ("Sauce")        label ("Olives")          │
//! │  name                  kind (radios, ...)     price_delta (200)         │
//! │  base_price (2000) ──► options ─────────────► is_default (true)         │
//! │  params                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Source Format
//! The catalog arrives once at startup as the menu data document:
//! ```json
//! { "products": { "bread": { "name": "Bread", "price": 2000, "params": {
//!     "toppings": { "label": "Toppings", "type": "checkboxes", "options": {
//!       "olives": { "label": "Olives", "price": 200, "default": true } } } } } } }
//! ```
//! Products, groups and options keep their document order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CatalogError, CoreResult};
use crate::money::Money;
use crate::validation::validate_catalog;

// =============================================================================
// Product Option
// =============================================================================

/// A selectable modifier inside a parameter group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductOption {
    /// Display label, also what a cart line lists.
    pub label: String,

    /// Price adjustment in cents.
    ///
    /// Added when a non-default option is chosen, subtracted when a default
    /// option is removed.
    #[serde(rename = "price", default)]
    pub price_delta: Money,

    /// Whether the option is part of the product as shipped.
    #[serde(rename = "default", default)]
    pub is_default: bool,
}

// =============================================================================
// Parameter Group
// =============================================================================

/// How a parameter group is presented. No pricing meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ParamKind {
    /// Any number of options may be chosen.
    #[default]
    Checkboxes,
    /// Exactly one option, shown as radio buttons.
    Radios,
    /// Exactly one option, shown as a dropdown.
    Select,
}

impl ParamKind {
    /// Returns true if choosing an option replaces the previous choice.
    pub fn is_exclusive(&self) -> bool {
        matches!(self, ParamKind::Radios | ParamKind::Select)
    }
}

/// A named set of related options, e.g. "Toppings".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParamGroup {
    pub label: String,

    #[serde(rename = "type", default)]
    pub kind: ParamKind,

    #[serde(default)]
    #[ts(type = "Record<string, ProductOption>")]
    pub options: IndexMap<String, ProductOption>,
}

impl ParamGroup {
    pub fn option(&self, option_id: &str) -> Option<&ProductOption> {
        self.options.get(option_id)
    }
}

// =============================================================================
// Catalog Entry
// =============================================================================

/// One product on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogEntry {
    /// Product id; the key the product is filed under in the catalog.
    #[serde(default)]
    pub id: String,

    pub name: String,

    /// Optional blurb shown under the product header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Price with exactly the default options, in cents.
    #[serde(rename = "price")]
    pub base_price: Money,

    #[serde(default)]
    #[ts(type = "Record<string, ParamGroup>")]
    pub params: IndexMap<String, ParamGroup>,
}

impl CatalogEntry {
    /// Looks up a parameter group, failing if the product has none by that id.
    pub fn param(&self, param_id: &str) -> Result<&ParamGroup, CatalogError> {
        self.params
            .get(param_id)
            .ok_or_else(|| CatalogError::UnknownParam {
                product: self.id.clone(),
                param: param_id.to_string(),
            })
    }

    /// Looks up an option inside a parameter group.
    pub fn option(&self, param_id: &str, option_id: &str) -> Result<&ProductOption, CatalogError> {
        self.param(param_id)?
            .option(option_id)
            .ok_or_else(|| CatalogError::UnknownOption {
                product: self.id.clone(),
                param: param_id.to_string(),
                option: option_id.to_string(),
            })
    }

    /// Iterates every `(param_id, group, option_id, option)` in catalog order.
    pub fn options(&self) -> impl Iterator<Item = (&str, &ParamGroup, &str, &ProductOption)> {
        self.params.iter().flat_map(|(param_id, group)| {
            group
                .options
                .iter()
                .map(move |(option_id, option)| {
                    (param_id.as_str(), group, option_id.as_str(), option)
                })
        })
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Deserialize)]
struct CatalogDocument {
    products: IndexMap<String, CatalogEntry>,
}

/// The full, validated, read-only menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    products: IndexMap<String, CatalogEntry>,
}

impl Catalog {
    /// Builds a catalog from entries and validates it.
    ///
    /// Entries are filed under their own `id`, in the order given.
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> CoreResult<Self> {
        let products = entries
            .into_iter()
            .map(|entry| (entry.id.clone(), entry))
            .collect();
        let catalog = Catalog { products };
        validate_catalog(&catalog)?;
        Ok(catalog)
    }

    /// Parses the menu data document.
    ///
    /// The map key of each product becomes its `id`, overriding any `id`
    /// field inside the product body.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let document: CatalogDocument = serde_json::from_str(json).map_err(CatalogError::from)?;
        let entries = document.products.into_iter().map(|(id, mut entry)| {
            entry.id = id;
            entry
        });
        let catalog = Catalog::new(entries)?;
        debug!(products = catalog.len(), "Catalog parsed");
        Ok(catalog)
    }

    /// Looks up a product by id.
    pub fn product(&self, product_id: &str) -> Result<&CatalogEntry, CatalogError> {
        self.products
            .get(product_id)
            .ok_or_else(|| CatalogError::UnknownProduct(product_id.to_string()))
    }

    /// Iterates products in menu order.
    pub fn products(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};

    const MENU: &str = r#"{
      "products": {
        "pizza": {
          "name": "Nonno Alberto's Pizza",
          "price": 2000,
          "params": {
            "sauce": {
              "label": "Sauce",
              "type": "radios",
              "options": {
                "tomato": { "label": "Tomato", "price": 0, "default": true },
                "cream": { "label": "Sour cream", "price": 200 }
              }
            },
            "toppings": {
              "label": "Toppings",
              "type": "checkboxes",
              "options": {
                "olives": { "label": "Olives", "price": 200, "default": true },
                "redPeppers": { "label": "Red peppers", "price": 200 }
              }
            }
          }
        },
        "cake": { "name": "Zio Stefano's Doughnut", "price": 900 }
      }
    }"#;

    #[test]
    fn test_parse_menu_document() {
        let catalog = Catalog::from_json(MENU).unwrap();
        assert_eq!(catalog.len(), 2);

        let ids: Vec<&str> = catalog.products().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["pizza", "cake"]);

        let pizza = catalog.product("pizza").unwrap();
        assert_eq!(pizza.base_price, Money::from_major(20));
        assert_eq!(pizza.param("sauce").unwrap().kind, ParamKind::Radios);

        let olives = pizza.option("toppings", "olives").unwrap();
        assert!(olives.is_default);
        assert_eq!(olives.price_delta.cents(), 200);

        let cake = catalog.product("cake").unwrap();
        assert!(cake.params.is_empty());
    }

    #[test]
    fn test_options_iterate_in_catalog_order() {
        let catalog = Catalog::from_json(MENU).unwrap();
        let pizza = catalog.product("pizza").unwrap();
        let keys: Vec<(&str, &str)> = pizza.options().map(|(p, _, o, _)| (p, o)).collect();
        assert_eq!(
            keys,
            vec![
                ("sauce", "tomato"),
                ("sauce", "cream"),
                ("toppings", "olives"),
                ("toppings", "redPeppers"),
            ]
        );
    }

    #[test]
    fn test_unknown_lookups() {
        let catalog = Catalog::from_json(MENU).unwrap();
        assert_eq!(
            catalog.product("salad").unwrap_err(),
            CatalogError::UnknownProduct("salad".to_string())
        );

        let pizza = catalog.product("pizza").unwrap();
        assert!(matches!(
            pizza.param("cheese"),
            Err(CatalogError::UnknownParam { .. })
        ));
        assert!(matches!(
            pizza.option("sauce", "mayo"),
            Err(CatalogError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = Catalog::from_json("{ \"products\": [] }").unwrap_err();
        assert!(matches!(err, CoreError::Catalog(CatalogError::Parse(_))));
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        let err = Catalog::from_json(r#"{"products": {"x": {"name": "", "price": 100}}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_document_order_survives_parsing() {
        let catalog = Catalog::from_json(
            r#"{"products": {
                "zucchini": {"name": "Zucchini fritters", "price": 700},
                "bread": {"name": "Bread", "price": 2000},
                "antipasti": {"name": "Antipasti", "price": 1200}
            }}"#,
        )
        .unwrap();
        let ids: Vec<&str> = catalog.products().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["zucchini", "bread", "antipasti"]);
    }

    #[test]
    fn test_huge_price_is_rejected() {
        let err = Catalog::from_json(
            r#"{"products": {"gold": {"name": "Gold leaf pizza", "price": 5000000000000000000}}}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::TooExpensive { .. })
        ));
    }

    #[test]
    fn test_param_kind_exclusivity() {
        assert!(!ParamKind::Checkboxes.is_exclusive());
        assert!(ParamKind::Radios.is_exclusive());
        assert!(ParamKind::Select.is_exclusive());
    }
}
