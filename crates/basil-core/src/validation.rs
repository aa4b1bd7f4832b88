//! # Validation Module
//!
//! Catalog content checks, run once when the catalog is built.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                       │
//! │  ├── Shape: products → params → options                                 │
//! │  └── Types: prices are integers, flags are booleans                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Names and labels present                                           │
//! │  └── Prices and deltas between zero and MAX_PRICE                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Lookups at use time (CatalogError)                            │
//! │  └── Selections naming unknown groups/options fail fast                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name the menu header has room for.
pub const MAX_NAME_LEN: usize = 200;

/// Highest base price or option delta a catalog may list (1,000,000.00).
///
/// Any selection of a validated product stays far inside `i64` cents at
/// any quantity the stepper allows.
pub const MAX_PRICE: Money = Money::from_major(1_000_000);

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required display string (name or label).
///
/// ## Example
/// ```rust
/// use basil_core::validation::validate_label;
///
/// assert!(validate_label("name", "Bread").is_ok());
/// assert!(validate_label("name", "   ").is_err());
/// ```
pub fn validate_label(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a catalog price. Zero is allowed (free extras).
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    if price > MAX_PRICE {
        return Err(ValidationError::TooExpensive {
            field: field.to_string(),
            max: MAX_PRICE,
        });
    }

    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates one product and everything nested under it.
pub fn validate_entry(entry: &CatalogEntry) -> ValidationResult<()> {
    validate_label("product id", &entry.id)?;
    validate_label(&format!("{} name", entry.id), &entry.name)?;
    validate_price(&format!("{} price", entry.id), entry.base_price)?;

    for (param_id, group) in entry.params.iter() {
        validate_label(&format!("{}.{} label", entry.id, param_id), &group.label)?;

        for (option_id, option) in group.options.iter() {
            let path = format!("{}.{}.{}", entry.id, param_id, option_id);
            validate_label(&format!("{} label", path), &option.label)?;
            validate_price(&format!("{} price", path), option.price_delta)?;
        }
    }

    Ok(())
}

/// Validates every product of the catalog.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult<()> {
    catalog.products().try_for_each(validate_entry)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ParamGroup, ParamKind, ProductOption};
    use indexmap::IndexMap;

    fn entry_with_option(label: &str, cents: i64) -> CatalogEntry {
        let options: IndexMap<String, ProductOption> = [(
            "olives".to_string(),
            ProductOption {
                label: label.to_string(),
                price_delta: Money::from_cents(cents),
                is_default: false,
            },
        )]
        .into_iter()
        .collect();

        CatalogEntry {
            id: "bread".to_string(),
            name: "Bread".to_string(),
            description: None,
            base_price: Money::from_major(20),
            params: [(
                "toppings".to_string(),
                ParamGroup {
                    label: "Toppings".to_string(),
                    kind: ParamKind::Checkboxes,
                    options,
                },
            )]
            .into_iter()
            .collect(),
        }
    }

    #[test]
    fn test_validate_label() {
        assert!(validate_label("name", "Bread").is_ok());
        assert!(validate_label("name", "").is_err());
        assert!(validate_label("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("price", Money::zero()).is_ok());
        assert!(validate_price("price", Money::from_cents(-1)).is_err());
        assert!(validate_price("price", MAX_PRICE).is_ok());
    }

    #[test]
    fn test_price_above_ceiling() {
        let err = validate_price("gold price", MAX_PRICE + Money::from_cents(1)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooExpensive {
                field: "gold price".to_string(),
                max: MAX_PRICE,
            }
        );

        let huge = Money::from_cents(5_000_000_000_000_000_000);
        let err = validate_entry(&entry_with_option("Olives", huge.cents())).unwrap_err();
        assert!(matches!(err, ValidationError::TooExpensive { .. }));
    }

    #[test]
    fn test_validate_entry() {
        assert!(validate_entry(&entry_with_option("Olives", 200)).is_ok());

        let err = validate_entry(&entry_with_option("", 200)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "bread.toppings.olives label".to_string()
            }
        );

        let err = validate_entry(&entry_with_option("Olives", -200)).unwrap_err();
        assert!(matches!(err, ValidationError::Negative { .. }));
    }
}
