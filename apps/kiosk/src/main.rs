//! # Basil Kiosk Entry Point
//!
//! ```text
//! basil-kiosk [CONFIG.toml]
//! ```
//!
//! The actual setup is in lib.rs so the context and commands can be tested
//! without the binary.

fn main() {
    if let Err(err) = basil_kiosk::run() {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}
