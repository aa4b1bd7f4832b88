//! # State Module
//!
//! Everything the kiosk remembers between commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                       AppContext                                │    │
//! │  │  built once in run(), passed as &mut to every command           │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                              │                                          │
//! │      ┌───────────────┬───────┴───────┬──────────────────┐               │
//! │      ▼               ▼               ▼                  ▼               │
//! │  ┌─────────┐  ┌──────────────┐  ┌──────────┐  ┌──────────────────┐      │
//! │  │ Catalog │  │ Sessions     │  │   Cart   │  │  MenuUiState     │      │
//! │  │ (read-  │  │ one per      │  │ line     │  │  panels, drawer  │      │
//! │  │  only)  │  │ product      │  │ items    │  │                  │      │
//! │  └─────────┘  └──────────────┘  └──────────┘  └──────────────────┘      │
//! │                                                                         │
//! │  SINGLE-THREADED: plain ownership, no locks                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod product;
mod ui;

pub use config::{CartSettings, CatalogSettings, ConfigError, ConfigResult, KioskConfig};
pub use product::ProductSession;
pub use ui::{MenuUiState, PanelState};

use basil_core::{Cart, Catalog, CatalogEntry, CatalogError, CoreResult, EntryId};
use indexmap::IndexMap;
use tracing::info;

// =============================================================================
// App Context
// =============================================================================

#[derive(Debug)]
pub struct AppContext {
    config: KioskConfig,
    catalog: Catalog,
    sessions: IndexMap<String, ProductSession>,
    /// The order being assembled.
    pub cart: Cart,
    pub ui: MenuUiState,
}

impl AppContext {
    /// Opens a session for every product and an empty cart.
    pub fn new(config: KioskConfig, catalog: Catalog) -> CoreResult<Self> {
        let mut sessions = IndexMap::with_capacity(catalog.len());
        for entry in catalog.products() {
            sessions.insert(entry.id.clone(), ProductSession::new(entry, config.quantity)?);
        }

        let cart = Cart::new(config.cart.delivery_fee)
            .with_delivery_policy(config.cart.delivery_policy);
        let ui = MenuUiState::new(catalog.products().map(|entry| entry.id.as_str()));

        info!(
            products = catalog.len(),
            delivery_fee = config.cart.delivery_fee.cents(),
            "App context ready"
        );

        Ok(AppContext {
            config,
            catalog,
            sessions,
            cart,
            ui,
        })
    }

    pub fn config(&self) -> &KioskConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self, product_id: &str) -> CoreResult<&ProductSession> {
        self.sessions
            .get(product_id)
            .ok_or_else(|| CatalogError::UnknownProduct(product_id.to_string()).into())
    }

    /// Borrows a product's catalog entry and its session together.
    pub fn session_mut(
        &mut self,
        product_id: &str,
    ) -> CoreResult<(&CatalogEntry, &mut ProductSession)> {
        let entry = self.catalog.product(product_id)?;
        let session = self
            .sessions
            .get_mut(product_id)
            .ok_or_else(|| CatalogError::UnknownProduct(product_id.to_string()))?;
        Ok((entry, session))
    }

    /// Adds the product's current configuration to the cart.
    pub fn commit(&mut self, product_id: &str) -> CoreResult<EntryId> {
        let (entry, session) = self.session_mut(product_id)?;
        let item = session.commit(entry)?;
        self.cart.add(item)
    }
}
