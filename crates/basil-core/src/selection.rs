//! # Selection
//!
//! The chosen option ids per parameter group for one product being
//! configured, e.g. `{ sauce: [tomato], toppings: [olives, redPeppers] }`.
//!
//! A selection is plain data. It does not know the catalog; pricing checks
//! it against the product with [`Selection::check_against`] and fails on any
//! id the product does not define.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use ts_rs::TS;

use crate::catalog::CatalogEntry;
use crate::error::CatalogError;

/// Mapping `param_id → set of chosen option ids`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Selection(BTreeMap<String, BTreeSet<String>>);

impl Selection {
    /// Creates an empty selection (nothing chosen anywhere).
    pub fn new() -> Self {
        Self::default()
    }

    /// The selection a freshly rendered product form starts with: every
    /// option flagged as default is chosen.
    pub fn defaults_for(entry: &CatalogEntry) -> Self {
        let mut selection = Selection::new();
        for (param_id, _, option_id, option) in entry.options() {
            if option.is_default {
                selection.select(param_id, option_id);
            }
        }
        selection
    }

    /// Chooses an option. Returns false if it was already chosen.
    pub fn select(&mut self, param_id: &str, option_id: &str) -> bool {
        self.0
            .entry(param_id.to_string())
            .or_default()
            .insert(option_id.to_string())
    }

    /// Un-chooses an option. Returns false if it was not chosen.
    pub fn deselect(&mut self, param_id: &str, option_id: &str) -> bool {
        let Some(options) = self.0.get_mut(param_id) else {
            return false;
        };
        let removed = options.remove(option_id);
        if options.is_empty() {
            self.0.remove(param_id);
        }
        removed
    }

    /// Flips an option and returns whether it is now chosen.
    pub fn toggle(&mut self, param_id: &str, option_id: &str) -> bool {
        if self.deselect(param_id, option_id) {
            false
        } else {
            self.select(param_id, option_id)
        }
    }

    /// Makes `option_id` the only choice in its group (radio/select groups).
    pub fn set_exclusive(&mut self, param_id: &str, option_id: &str) {
        let options = self.0.entry(param_id.to_string()).or_default();
        options.clear();
        options.insert(option_id.to_string());
    }

    pub fn is_selected(&self, param_id: &str, option_id: &str) -> bool {
        self.0
            .get(param_id)
            .is_some_and(|options| options.contains(option_id))
    }

    /// Chosen option ids of one group, in id order.
    pub fn chosen(&self, param_id: &str) -> impl Iterator<Item = &str> {
        self.0
            .get(param_id)
            .into_iter()
            .flat_map(|options| options.iter().map(String::as_str))
    }

    /// Iterates `(param_id, option_id)` for everything chosen.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().flat_map(|(param_id, options)| {
            options
                .iter()
                .map(move |option_id| (param_id.as_str(), option_id.as_str()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fails on the first group or option id that `entry` does not define.
    pub fn check_against(&self, entry: &CatalogEntry) -> Result<(), CatalogError> {
        for (param_id, option_id) in self.iter() {
            entry.option(param_id, option_id)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
