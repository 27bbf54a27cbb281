//! # Checkout Hand-off
//!
//! The finalized [`Order`] and the [`CheckoutSink`] seam it is handed to.
//!
//! ```text
//! Place Order
//!      │
//!      ▼
//! PosTerminal::place_order
//!      │  claims cart, freezes lines, stamps id + time
//!      ▼
//! CheckoutSink::submit(&Order)
//!      │
//!      ├── MemoryCheckout   keeps orders for the session
//!      └── TracingCheckout  emits the order as a structured log event
//! ```
//!
//! What a real checkout does with the order (payment, kitchen ticket,
//! storage) lives behind the trait.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use ts_rs::TS;
use uuid::Uuid;

use bistro_core::{Cart, CartLine, Money, OrderSummary, OrderType};

// =============================================================================
// Order
// =============================================================================

/// A cart line frozen at the moment the order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLine {
    pub item_id: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub line_total: Money,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        OrderLine {
            item_id: line.item.id.clone(),
            name: line.item.name.clone(),
            unit_price: line.item.unit_price,
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

/// A finalized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// UUID v4.
    pub id: String,
    pub order_type: OrderType,
    pub cashier: String,
    pub lines: Vec<OrderLine>,
    pub summary: OrderSummary,
    /// `summary.total` floored at zero and rounded to the cent.
    pub amount_due: Money,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Freezes a cart and its summary into an order.
    pub fn new(cart: &Cart, summary: OrderSummary, order_type: OrderType, cashier: &str) -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            order_type,
            cashier: cashier.to_string(),
            lines: cart.lines().iter().map(OrderLine::from).collect(),
            summary,
            amount_due: summary.amount_due(),
            placed_at: Utc::now(),
        }
    }
}

// =============================================================================
// Checkout Sink
// =============================================================================

/// Errors a checkout collaborator can report.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The collaborator declined the order.
    #[error("Order rejected: {0}")]
    Rejected(String),

    /// The order could not be serialized for hand-off.
    #[error("Failed to serialize order: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Receives finalized orders.
pub trait CheckoutSink: Send + Sync {
    /// Accepts the order or reports why not. The terminal keeps the cart
    /// when this fails.
    fn submit(&self, order: &Order) -> Result<(), CheckoutError>;
}

/// Keeps every submitted order in memory.
#[derive(Debug, Default)]
pub struct MemoryCheckout {
    orders: Mutex<Vec<Order>>,
}

impl MemoryCheckout {
    pub fn new() -> Self {
        MemoryCheckout::default()
    }

    /// Orders received so far, oldest first.
    pub fn orders(&self) -> Vec<Order> {
        self.orders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl CheckoutSink for MemoryCheckout {
    fn submit(&self, order: &Order) -> Result<(), CheckoutError> {
        self.orders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(order.clone());
        Ok(())
    }
}

/// Emits each order as JSON on the `bistro_terminal::checkout` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingCheckout;

impl CheckoutSink for TracingCheckout {
    fn submit(&self, order: &Order) -> Result<(), CheckoutError> {
        let payload = serde_json::to_string(order)?;
        info!(
            order_id = %order.id,
            order_type = %order.order_type,
            amount_due = order.amount_due.cents(),
            payload = %payload,
            "Order handed to checkout"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::{compute, Catalog, StaticCatalog, TaxRate};

    fn sample_order() -> Order {
        let catalog = Catalog::from_provider(&StaticCatalog::house_menu()).unwrap();
        let cart = Cart::new()
            .add_item(&catalog, "1")
            .and_then(|c| c.add_item(&catalog, "5"))
            .and_then(|c| c.add_item(&catalog, "5"))
            .unwrap();
        let summary = compute(&cart, TaxRate::from_bps(1000), Money::from_cents(1000));
        Order::new(&cart, summary, OrderType::TakeAway, "Cashier 01")
    }

    #[test]
    fn test_order_freezes_lines() {
        let order = sample_order();

        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[1].name, "Sausages");
        assert_eq!(order.lines[1].quantity, 2);
        assert_eq!(order.lines[1].line_total.cents(), 3000);
        assert_eq!(order.summary.subtotal.cents(), 4500);
        assert_eq!(order.amount_due.cents(), 4500 + 450 - 1000);
        assert!(Uuid::parse_str(&order.id).is_ok());
    }

    #[test]
    fn test_order_ids_are_unique() {
        assert_ne!(sample_order().id, sample_order().id);
    }

    #[test]
    fn test_memory_checkout_records_orders() {
        let sink = MemoryCheckout::new();
        let order = sample_order();

        sink.submit(&order).unwrap();
        sink.submit(&order).unwrap();

        assert_eq!(sink.orders().len(), 2);
        assert_eq!(sink.orders()[0], order);
    }

    #[test]
    fn test_tracing_checkout_accepts_orders() {
        assert!(TracingCheckout.submit(&sample_order()).is_ok());
    }

    #[test]
    fn test_order_json_round_trip() {
        let order = sample_order();
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }
}
