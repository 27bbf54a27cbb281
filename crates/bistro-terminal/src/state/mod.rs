//! # State Module
//!
//! Session state owned by a [`PosTerminal`](crate::PosTerminal).
//!
//! ```text
//! ┌──────────────────┐  ┌──────────────────┐
//! │    CartState     │  │  TerminalConfig  │
//! │                  │  │                  │
//! │  versioned slot  │  │  tax rate        │
//! │  Arc<Cart>       │  │  discount        │
//! │  CAS updates     │  │  cashier, menu   │
//! └──────────────────┘  └──────────────────┘
//!
//! CartState: every write is a compare-and-swap of a whole cart value
//! TerminalConfig: read-only after load
//! ```

mod cart;
mod config;

pub use cart::{CartSnapshot, CartState, StaleCart};
pub use config::TerminalConfig;
