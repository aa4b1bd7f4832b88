//! # Menu UI State
//!
//! Which product panel is open and whether the cart drawer is showing.
//!
//! ```text
//! ┌───────────────────────────────┐
//! │ ▸ Bread          (collapsed)  │
//! │ ▾ Pizza          (expanded)   │ ◄── at most one expanded
//! │   ...options, stepper...      │
//! │ ▸ Cake           (collapsed)  │
//! └───────────────────────────────┘
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PanelState {
    #[default]
    Collapsed,
    Expanded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuUiState {
    panels: BTreeMap<String, PanelState>,
    cart_open: bool,
}

impl MenuUiState {
    /// Starts with every listed product collapsed.
    pub fn new<'a>(product_ids: impl IntoIterator<Item = &'a str>) -> Self {
        MenuUiState {
            panels: product_ids
                .into_iter()
                .map(|id| (id.to_string(), PanelState::Collapsed))
                .collect(),
            cart_open: false,
        }
    }

    pub fn panel(&self, product_id: &str) -> PanelState {
        self.panels.get(product_id).copied().unwrap_or_default()
    }

    /// Opens a collapsed panel (closing any other) or closes an open one.
    pub fn toggle_product(&mut self, product_id: &str) -> PanelState {
        let next = match self.panel(product_id) {
            PanelState::Collapsed => PanelState::Expanded,
            PanelState::Expanded => PanelState::Collapsed,
        };

        if next == PanelState::Expanded {
            for state in self.panels.values_mut() {
                *state = PanelState::Collapsed;
            }
        }
        self.panels.insert(product_id.to_string(), next);
        next
    }

    pub fn expanded(&self) -> Option<&str> {
        self.panels
            .iter()
            .find(|(_, state)| **state == PanelState::Expanded)
            .map(|(id, _)| id.as_str())
    }

    pub fn toggle_cart(&mut self) -> bool {
        self.cart_open = !self.cart_open;
        self.cart_open
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }
}
