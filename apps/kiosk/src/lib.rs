//! # Basil Kiosk Library
//!
//! Application layer for the Basil ordering kiosk: configuration, the
//! per-session application context, and the commands the rendering layer
//! calls.
//!
//! ## Module Organization
//! ```text
//! basil_kiosk/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── AppContext
//! │   ├── config.rs   ◄─── KioskConfig (TOML + env)
//! │   ├── product.rs  ◄─── ProductSession (selection, counter, quote)
//! │   └── ui.rs       ◄─── Panel and cart drawer state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Menu, options, quantity
//! │   └── cart.rs     ◄─── Cart manipulation
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use basil_core::Catalog;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{AppContext, KioskConfig};

/// Loads config and catalog, builds the context and prints the menu.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: info,basil=debug, can be overridden with RUST_LOG        │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • First CLI argument, else the platform config directory            │
/// │     • BASIL_* environment overrides                                     │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • Menu JSON from [catalog].path, validated                          │
/// │                                                                         │
/// │  4. Build AppContext ─────────────────────────────────────────────────► │
/// │     • One ProductSession per product, empty cart                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Basil kiosk");

    let config = KioskConfig::load(std::env::args().nth(1).map(PathBuf::from))?;
    let catalog_path = config.catalog_path()?.to_path_buf();
    info!(?catalog_path, "Loading catalog");

    let catalog = Catalog::from_json(&std::fs::read_to_string(&catalog_path)?)?;
    let ctx = AppContext::new(config, catalog)?;

    let menu = commands::product::get_menu(&ctx)?;
    println!("{}", serde_json::to_string_pretty(&menu)?);

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=basil_core=trace` - Show per-price trace events
/// - Default: INFO, DEBUG for basil crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,basil=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
