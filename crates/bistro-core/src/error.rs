//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core errors (this file)                                        │
//! │  ├── CoreError        - Catalog and cart rule violations               │
//! │  └── ValidationError  - Malformed menu data                            │
//! │                                                                         │
//! │  bistro-terminal errors (separate crate)                               │
//! │  ├── TerminalError    - Config, checkout, empty orders                 │
//! │  └── ApiError         - What the screen layer sees (serialized)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → TerminalError → ApiError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only `ItemNotFound` and the two cart caps can come out of a cart
//! operation. Removing an absent line and an empty filter result are not
//! errors at all.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Ordering errors raised by the catalog and the cart reducer.
///
/// A failed operation never produces a new cart, so the caller's current
/// cart stays exactly as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Menu item id is not in the catalog.
    ///
    /// ## When This Occurs
    /// - The screen sends a stale id after the menu was reloaded
    /// - A typo in a hand-written menu file reference
    #[error("Menu item not found: {0}")]
    ItemNotFound(String),

    /// A new line would push the cart past its line cap.
    #[error("Cart is full: at most {max} different items per order")]
    CartTooLarge { max: usize },

    /// A line would go past the per-item quantity cap.
    #[error("Quantity {requested} is over the per-item limit of {max}")]
    QuantityTooLarge { requested: i64, max: i64 },

    #[error("Invalid menu data: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Menu data validation errors.
///
/// Raised while a catalog is being loaded, before any cart can see the
/// items.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty or whitespace-only field.
    #[error("{field} must not be empty")]
    Required { field: String },

    #[error("{field} is longer than {max} characters")]
    TooLong { field: String, max: usize },

    /// Number outside its allowed range (inclusive).
    #[error("{field} out of range [{min}, {max}]")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} is malformed: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two menu items share an id.
    #[error("duplicate {field} '{value}' in menu")]
    Duplicate { field: String, value: String },
}

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
