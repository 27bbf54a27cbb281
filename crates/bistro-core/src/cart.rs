//! # Cart Engine
//!
//! The lines selected for the order currently being rung up.
//!
//! ## Reducer Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    (cart, action) → new cart                            │
//! │                                                                         │
//! │  Screen Action        CartAction              New Cart                  │
//! │  ─────────────        ──────────              ────────                  │
//! │                                                                         │
//! │  Tap menu card ─────► Add { item_id } ──────► qty + 1 or new line      │
//! │                                                                         │
//! │  Tap "Remove" ──────► Remove { item_id } ───► whole line dropped       │
//! │                                                                         │
//! │  Tap "−" ───────────► Decrement { item_id } ► qty − 1, drop at zero    │
//! │                                                                         │
//! │  Edit quantity ─────► SetQuantity { .. } ───► qty = n, drop at zero    │
//! │                                                                         │
//! │  Cancel / placed ───► Clear ────────────────► empty cart               │
//! │                                                                         │
//! │  NOTE: A cart is never edited in place. Every operation builds the     │
//! │        next cart value and the caller swaps it in whole.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::MenuItem;
use crate::validation::validate_quantity;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One menu item and how many of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// The catalog's record for the item.
    pub item: Arc<MenuItem>,

    /// Units ordered, always at least 1.
    pub quantity: i64,
}

impl CartLine {
    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.item.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Action
// =============================================================================

/// A single user action against the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartAction {
    Add { item_id: String },
    Remove { item_id: String },
    Decrement { item_id: String },
    SetQuantity { item_id: String, quantity: i64 },
    Clear,
}

// =============================================================================
// Cart
// =============================================================================

/// The cart value.
///
/// ## Invariants
/// - Lines are unique by item id
/// - Every quantity is between 1 and `MAX_ITEM_QUANTITY`
/// - At most `MAX_CART_ITEMS` lines
/// - Lines keep first-added-first-shown order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Applies an action and returns the resulting cart.
    ///
    /// On error no new cart is produced, so the current one stays in
    /// effect.
    pub fn apply(&self, catalog: &Catalog, action: &CartAction) -> CoreResult<Cart> {
        match action {
            CartAction::Add { item_id } => self.add_item(catalog, item_id),
            CartAction::Remove { item_id } => Ok(self.remove_item(item_id)),
            CartAction::Decrement { item_id } => Ok(self.decrement_item(item_id)),
            CartAction::SetQuantity { item_id, quantity } => self.set_quantity(item_id, *quantity),
            CartAction::Clear => Ok(self.clear()),
        }
    }

    /// Adds one unit of a catalog item.
    ///
    /// ## Behavior
    /// - Item already in cart: its quantity goes up by one
    /// - Item not in cart: a new line with quantity 1 is appended
    ///
    /// ## Errors
    /// - `ItemNotFound` if the id is not on the menu
    /// - `QuantityTooLarge` past `MAX_ITEM_QUANTITY`
    /// - `CartTooLarge` when a new line would exceed `MAX_CART_ITEMS`
    pub fn add_item(&self, catalog: &Catalog, item_id: &str) -> CoreResult<Cart> {
        let item = catalog.get_by_id(item_id)?;
        let mut lines = self.lines.clone();

        if let Some(line) = lines.iter_mut().find(|l| l.item.id == item.id) {
            let requested = line.quantity + 1;
            if requested > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = requested;
            return Ok(Cart { lines });
        }

        if lines.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        lines.push(CartLine { item, quantity: 1 });
        Ok(Cart { lines })
    }

    /// Drops the whole line for an item, whatever its quantity.
    ///
    /// Removing an item that is not in the cart returns an identical cart.
    pub fn remove_item(&self, item_id: &str) -> Cart {
        Cart {
            lines: self
                .lines
                .iter()
                .filter(|l| l.item.id != item_id)
                .cloned()
                .collect(),
        }
    }

    /// Takes one unit off a line, dropping the line when it reaches zero.
    ///
    /// Absent items are a no-op.
    pub fn decrement_item(&self, item_id: &str) -> Cart {
        Cart {
            lines: self
                .lines
                .iter()
                .filter_map(|l| {
                    if l.item.id != item_id {
                        Some(l.clone())
                    } else if l.quantity > 1 {
                        Some(CartLine {
                            item: Arc::clone(&l.item),
                            quantity: l.quantity - 1,
                        })
                    } else {
                        None
                    }
                })
                .collect(),
        }
    }

    /// Sets the quantity of a line already in the cart.
    ///
    /// ## Behavior
    /// - Quantity 0: removes the line
    /// - Item not in cart: no-op
    ///
    /// ## Errors
    /// - `Validation` for a negative quantity or one above the cap
    pub fn set_quantity(&self, item_id: &str, quantity: i64) -> CoreResult<Cart> {
        if quantity == 0 {
            return Ok(self.remove_item(item_id));
        }
        validate_quantity(quantity)?;

        let mut lines = self.lines.clone();
        if let Some(line) = lines.iter_mut().find(|l| l.item.id == item_id) {
            line.quantity = quantity;
        }
        Ok(Cart { lines })
    }

    /// Returns an empty cart.
    pub fn clear(&self) -> Cart {
        Cart::new()
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for an item, if present.
    pub fn line(&self, item_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item.id == item_id)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct items.
    pub fn distinct_items(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Σ unit price × quantity.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
