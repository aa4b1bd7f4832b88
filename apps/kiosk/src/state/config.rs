//! # Kiosk Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     BASIL_CATALOG_PATH=/srv/menu.json                                   │
//! │     BASIL_DELIVERY_FEE=1500                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/basil-kiosk/kiosk.toml (Linux)                            │
//! │     ~/Library/Application Support/com.basil.kiosk/kiosk.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     quantity 1..=9 starting at 1, delivery fee 20.00                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # kiosk.toml
//! [quantity]
//! default_value = 1
//! min = 1
//! max = 9
//!
//! [cart]
//! delivery_fee = 2000              # cents
//! delivery_policy = "suppress_when_empty"  # or "always"
//!
//! [catalog]
//! path = "menu.json"
//! ```
//!
//! Read-only after startup.

use basil_core::validation::MAX_PRICE;
use basil_core::{CounterSettings, DeliveryPolicy, Money, DEFAULT_DELIVERY_FEE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[cart]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartSettings {
    /// Flat delivery fee in cents.
    pub delivery_fee: Money,

    /// Whether an empty cart still shows the fee.
    pub delivery_policy: DeliveryPolicy,
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            delivery_fee: DEFAULT_DELIVERY_FEE,
            delivery_policy: DeliveryPolicy::SuppressWhenEmpty,
        }
    }
}

/// `[catalog]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Menu data document. Relative paths resolve against the working
    /// directory.
    pub path: Option<PathBuf>,
}

// =============================================================================
// Kiosk Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KioskConfig {
    #[serde(default)]
    pub quantity: CounterSettings,

    #[serde(default)]
    pub cart: CartSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl KioskConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform config directory)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading kiosk config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Checks quantity bounds and the fee.
    pub fn validate(&self) -> ConfigResult<()> {
        self.quantity
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.cart.delivery_fee.is_negative() {
            return Err(ConfigError::Invalid(
                "delivery_fee must not be negative".into(),
            ));
        }

        if self.cart.delivery_fee > MAX_PRICE {
            return Err(ConfigError::Invalid(format!(
                "delivery_fee must be at most {}",
                MAX_PRICE
            )));
        }

        Ok(())
    }

    /// Applies `BASIL_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("BASIL_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(fee) = lookup("BASIL_DELIVERY_FEE") {
            match fee.parse::<i64>() {
                Ok(cents) => self.cart.delivery_fee = Money::from_cents(cents),
                Err(_) => warn!(value = %fee, "Ignoring non-numeric BASIL_DELIVERY_FEE"),
            }
        }

        if let Some(min) = lookup("BASIL_QUANTITY_MIN") {
            match min.parse::<i64>() {
                Ok(min) => self.quantity.min = min,
                Err(_) => warn!(value = %min, "Ignoring non-numeric BASIL_QUANTITY_MIN"),
            }
        }

        if let Some(max) = lookup("BASIL_QUANTITY_MAX") {
            match max.parse::<i64>() {
                Ok(max) => self.quantity.max = max,
                Err(_) => warn!(value = %max, "Ignoring non-numeric BASIL_QUANTITY_MAX"),
            }
        }
    }

    /// Returns the catalog path or an error if none is configured.
    pub fn catalog_path(&self) -> ConfigResult<&Path> {
        self.catalog.path.as_deref().ok_or_else(|| {
            ConfigError::Invalid("no catalog path (set [catalog].path or BASIL_CATALOG_PATH)".into())
        })
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "basil", "kiosk")
            .map(|dirs| dirs.config_dir().join("kiosk.toml"))
    }
}
