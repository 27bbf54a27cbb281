//! # bistro-core: Pure Ordering Logic for Bistro POS
//!
//! This crate is the **heart** of Bistro POS. It holds the menu, the cart
//! and the order math as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation layer (external)                   │   │
//! │  │    Category bar ──► Menu cards ──► Order Summary ──► Place     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bistro-terminal (PosTerminal)                   │   │
//! │  │    add_to_cart, set_category, get_order_summary, place_order   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐       │   │
//! │  │   │ catalog  │  │  filter  │  │   cart   │  │  totals  │       │   │
//! │  │   │ MenuItem │  │ category │  │  Cart    │  │ Order    │       │   │
//! │  │   │ lookup   │  │ search   │  │ reducer  │  │ Summary  │       │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────┘       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Catalog store and the provider seam
//! - [`filter`] - Category and search filtering
//! - [`cart`] - Cart value and its reducer
//! - [`totals`] - Order summary computation
//! - [`money`] - Money type with integer arithmetic
//! - [`types`] - MenuItem, TaxRate, OrderType
//! - [`validation`] - Menu data and settings rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::{compute, Cart, Catalog, ExactMoney, Money, StaticCatalog, TaxRate};
//!
//! let catalog = Catalog::from_provider(&StaticCatalog::house_menu()).unwrap();
//! let cart = Cart::new().add_item(&catalog, "4").unwrap(); // Fried Rice with Pork
//!
//! let summary = compute(&cart, TaxRate::from_bps(1000), Money::zero());
//! assert_eq!(summary.total, ExactMoney::from_cents(4400));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartAction, CartLine};
pub use catalog::{Catalog, CatalogProvider, StaticCatalog};
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{filter_items, CategoryFilter, FilterState, SearchQuery, ALL_MENU};
pub use money::{ExactMoney, Money};
pub use totals::{compute, OrderSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// Catches a fat-fingered quantity edit before it reaches checkout.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price a menu item may carry ($100,000.00).
pub const MAX_PRICE_CENTS: i64 = 10_000_000;

// A full cart at the caps must fit in i64 cents.
const _: () = assert!(
    MAX_PRICE_CENTS as i128 * MAX_ITEM_QUANTITY as i128 * MAX_CART_ITEMS as i128
        <= i64::MAX as i128
);
