//! # Domain Types
//!
//! Value types shared by the catalog, the cart and the totals calculator.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │    TaxRate      │   │   OrderType     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  bps (u32)      │   │  DineIn         │       │
//! │  │  name           │   │  1000 = 10%     │   │  TakeAway       │       │
//! │  │  unit_price     │   └─────────────────┘   │  Delivery       │       │
//! │  │  category       │                         └─────────────────┘       │
//! │  │  image_ref      │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1000 bps = 10%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage, e.g. `10.0` for 10%.
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A dish or drink the terminal can sell.
///
/// Immutable once the catalog is loaded. Carts hold it behind an `Arc`, so a
/// line always points at the catalog's record rather than a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    /// Stable identifier, unique within a catalog.
    pub id: String,

    /// Display name, also the target of free-text search.
    pub name: String,

    /// Price of one unit.
    pub unit_price: Money,

    /// Category label, matched exactly by the category filter.
    pub category: String,

    /// Image reference for the menu card.
    pub image_ref: String,
}

impl MenuItem {
    /// Creates a menu item.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        category: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        MenuItem {
            id: id.into(),
            name: name.into(),
            unit_price,
            category: category.into(),
            image_ref: image_ref.into(),
        }
    }
}

// =============================================================================
// Order Type
// =============================================================================

/// How the order leaves the counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Served at a table.
    #[default]
    DineIn,
    /// Packed for the customer to carry out.
    TakeAway,
    /// Sent out to an address.
    Delivery,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::DineIn => write!(f, "Dine In"),
            OrderType::TakeAway => write!(f, "Take Away"),
            OrderType::Delivery => write!(f, "Delivery"),
        }
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "dine_in" => Ok(OrderType::DineIn),
            "take_away" | "takeaway" => Ok(OrderType::TakeAway),
            "delivery" | "deliver" => Ok(OrderType::Delivery),
            _ => Err(format!("Unknown order type: {}", s)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
