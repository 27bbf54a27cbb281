//! # Validation Module
//!
//! Rules applied to menu data and terminal settings before they reach the
//! cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Catalog load                                                          │
//! │  ├── validate_menu_item  (id, name, price, category)                   │
//! │  └── duplicate ids rejected by Catalog::new                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Terminal config                                                       │
//! │  ├── validate_tax_rate_bps                                             │
//! │  └── validate_discount_cents                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Cart reducer                                                          │
//! │  └── validate_quantity (per line cap)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::MenuItem;
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

pub type ValidationResult<T> = Result<T, ValidationError>;

fn non_blank(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn non_negative(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a menu item id.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 64 characters
///
/// ## Example
/// ```rust
/// use bistro_core::validation::validate_item_id;
///
/// assert!(validate_item_id("1").is_ok());
/// assert!(validate_item_id("  ").is_err());
/// ```
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    non_blank("id", id)?;

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: 64,
        });
    }

    if id.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates a menu item name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    non_blank("name", name)?;

    if name.trim().len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a category label. Categories are matched exactly, so an empty
/// label would make an item unreachable from the category bar.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    non_blank("category", category)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative; zero is a free item
/// - At most `MAX_PRICE_CENTS`, so line and cart totals stay in range
///
/// ## Example
/// ```rust
/// use bistro_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1500).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// assert!(validate_price_cents(i64::MAX).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Validates a flat discount in cents. A discount may exceed the order, but
/// it may not add to it.
pub fn validate_discount_cents(cents: i64) -> ValidationResult<()> {
    non_negative("discount", cents)
}

/// Validates a tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

/// Validates a line quantity: 1 to `MAX_ITEM_QUANTITY`. A line at zero is
/// removed, never kept.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates every field of a menu item.
pub fn validate_menu_item(item: &MenuItem) -> ValidationResult<()> {
    validate_item_id(&item.id)?;
    validate_item_name(&item.name)?;
    validate_price_cents(item.unit_price.cents())?;
    validate_category(&item.category)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
