//! # Totals Calculator
//!
//! Turns a cart into the figures shown under "Order Summary".
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Order Summary                                                          │
//! │                                                                         │
//! │  Total Items (2)            line_count = Σ quantity                    │
//! │  ─────────────────────────────────────────────                         │
//! │  Subtotal        $30.00     Σ unit_price × quantity                    │
//! │  Tax (10%)        $3.00     subtotal × rate, exact                     │
//! │  Discount       -$10.00     flat amount                                │
//! │  Total           $23.00     subtotal + tax − discount                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax and total are [`ExactMoney`]: fractions of a cent survive until a
//! figure is displayed. `total` is reported as computed, negative or not.
//! What checkout actually collects is [`OrderSummary::amount_due`], the only
//! place the total is rounded to the cent.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::{ExactMoney, Money};
use crate::types::TaxRate;

/// The monetary breakdown of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderSummary {
    /// Units in the cart (not distinct items).
    pub line_count: i64,
    pub subtotal: Money,
    pub tax_rate: TaxRate,
    /// `subtotal × tax_rate`, unrounded.
    pub tax_amount: ExactMoney,
    pub discount: Money,
    /// `subtotal + tax_amount - discount`, unrounded; may be negative.
    pub total: ExactMoney,
}

impl OrderSummary {
    /// The amount to collect: `total` floored at zero, rounded to the cent.
    pub fn amount_due(&self) -> Money {
        self.total.clamp_to_zero().round_to_cents()
    }

    /// True when the discount swallowed more than the order was worth.
    pub fn is_over_discounted(&self) -> bool {
        self.total.is_negative()
    }
}

/// Computes the summary for a cart.
///
/// Pure and deterministic: the same cart, rate and discount always give the
/// same summary. There are no error cases; an empty cart yields
/// `total = -discount`.
///
/// ## Example
/// ```rust
/// use bistro_core::{compute, Cart, Catalog, ExactMoney, Money, StaticCatalog, TaxRate};
///
/// let catalog = Catalog::from_provider(&StaticCatalog::house_menu()).unwrap();
/// let cart = Cart::new()
///     .add_item(&catalog, "1").unwrap()   // Deep Fried Wonton 15.00
///     .add_item(&catalog, "5").unwrap();  // Sausages 15.00
///
/// let summary = compute(&cart, TaxRate::from_bps(1000), Money::from_cents(1000));
/// assert_eq!(summary.subtotal.cents(), 3000);
/// assert_eq!(summary.tax_amount, ExactMoney::from_cents(300));
/// assert_eq!(summary.total, ExactMoney::from_cents(2300));
/// ```
pub fn compute(cart: &Cart, tax_rate: TaxRate, discount: Money) -> OrderSummary {
    let subtotal = cart.subtotal();
    let tax_amount = subtotal.calculate_tax(tax_rate);

    OrderSummary {
        line_count: cart.total_quantity(),
        subtotal,
        tax_rate,
        tax_amount,
        discount,
        total: ExactMoney::from(subtotal) + tax_amount - ExactMoney::from(discount),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
