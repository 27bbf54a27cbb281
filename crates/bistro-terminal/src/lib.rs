//! # bistro-terminal: In-Process Terminal for Bistro POS
//!
//! Wraps the pure `bistro-core` engines into one [`PosTerminal`] per
//! ordering session, and owns the parts the core crate stays out of:
//! configuration files, the menu file, logging, order ids and timestamps,
//! and the hand-off to checkout.
//!
//! ## Startup
//! ```text
//! init_tracing()
//!      │
//!      ▼
//! TerminalConfig::load_or_default(None)   defaults → terminal.toml → BISTRO_* env
//!      │
//!      ▼
//! PosTerminal::from_config(config, sink)  menu_path → FileCatalog, else house menu
//!      │
//!      ▼
//! add_to_cart / set_category / order_summary / place_order ...
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use bistro_terminal::{MemoryCheckout, PosTerminal, TerminalConfig};
//!
//! let sink = Arc::new(MemoryCheckout::new());
//! let terminal = PosTerminal::from_config(TerminalConfig::default(), sink.clone()).unwrap();
//!
//! terminal.add_to_cart("1").unwrap();
//! terminal.add_to_cart("5").unwrap();
//! assert_eq!(terminal.order_summary().amount_due().cents(), 2300);
//!
//! let order = terminal.place_order().unwrap();
//! assert_eq!(sink.orders(), vec![order]);
//! assert!(terminal.cart().is_empty());
//! ```

pub mod checkout;
pub mod error;
pub mod menu_file;
pub mod state;
pub mod terminal;

pub use checkout::{CheckoutError, CheckoutSink, MemoryCheckout, Order, OrderLine, TracingCheckout};
pub use error::{ApiError, ErrorCode, TerminalError, TerminalResult};
pub use menu_file::FileCatalog;
pub use state::{CartSnapshot, CartState, StaleCart, TerminalConfig};
pub use terminal::PosTerminal;

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber for the host process.
///
/// Log level comes from `RUST_LOG`, defaulting to `info,bistro_terminal=debug`.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bistro_terminal=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
