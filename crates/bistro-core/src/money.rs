//! # Money Module
//!
//! Provides `Money` for prices, subtotals and discounts, and `ExactMoney` for
//! the tax and total figures that can fall between two cents.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing menu prices as binary floats drifts:                          │
//! │    0.1 + 0.2 = 0.30000000000000004                                     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Deep Fried Wonton  1500                                             │
//! │    Sausages           1500                                             │
//! │    ──────────────────────                                              │
//! │    subtotal           3000   (exact, no matter how many lines)         │
//! │                                                                         │
//! │  Only the tax product can land between two cents. A rate in basis      │
//! │  points makes it a whole number of 1/10000 cents, so ExactMoney        │
//! │  carries it without loss:                                               │
//! │    5 cents at 1000 bps = 5000 sub-cents = $0.005                       │
//! │  Rounding to the cent happens only for display and collection.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::money::Money;
//!
//! let price = Money::from_cents(1500); // $15.00
//! let line = price * 2;                // $30.00
//! assert_eq!(line.cents(), 3000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Signed, so a discount larger than the order can show up as a negative
/// total instead of silently wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let price = Money::from_cents(2100); // $21.00
    /// assert_eq!(price.cents(), 2100);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion (truncated toward zero).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the value, or zero when it is negative.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-1000).clamp_to_zero(), Money::zero());
    /// assert_eq!(Money::from_cents(2300).clamp_to_zero().cents(), 2300);
    /// ```
    #[inline]
    pub const fn clamp_to_zero(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            Money(self.0)
        }
    }

    /// Calculates tax on this amount, exactly.
    ///
    /// `cents × bps` is already the tax in 1/10000 cents, so nothing is
    /// rounded here.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::{ExactMoney, Money};
    /// use bistro_core::types::TaxRate;
    ///
    /// let tax = Money::from_cents(3000).calculate_tax(TaxRate::from_bps(1000));
    /// assert_eq!(tax, ExactMoney::from_cents(300));
    ///
    /// // Half a cent stays half a cent
    /// let tax = Money::from_cents(5).calculate_tax(TaxRate::from_bps(1000));
    /// assert_eq!(tax.sub_cents(), 5000);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> ExactMoney {
        ExactMoney(self.0 as i128 * rate.bps() as i128)
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// Catalog prices are capped at `MAX_PRICE_CENTS` and quantities at
    /// `MAX_ITEM_QUANTITY`, so a validated line cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(3100);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 9300);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-style dollar rendering. Receipts go through the terminal's
/// configured currency formatting instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by a line quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Exact Money
// =============================================================================

/// 1/10000 cent units per cent.
pub const SUB_CENTS_PER_CENT: i128 = 10_000;

/// A monetary value in 1/10000 of a cent.
///
/// Fine enough to hold any `cents × basis points` product exactly. Order
/// summaries keep tax and total in this unit and only round when a figure
/// is shown or collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExactMoney(#[ts(type = "number")] i128);

impl ExactMoney {
    #[inline]
    pub const fn from_sub_cents(sub_cents: i128) -> Self {
        ExactMoney(sub_cents)
    }

    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        ExactMoney(cents as i128 * SUB_CENTS_PER_CENT)
    }

    /// The raw value in 1/10000 cents.
    #[inline]
    pub const fn sub_cents(&self) -> i128 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        ExactMoney(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn clamp_to_zero(&self) -> Self {
        if self.0 < 0 {
            ExactMoney(0)
        } else {
            ExactMoney(self.0)
        }
    }

    /// Rounds to the nearest cent, halves away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::ExactMoney;
    ///
    /// assert_eq!(ExactMoney::from_sub_cents(5000).round_to_cents().cents(), 1);
    /// assert_eq!(ExactMoney::from_sub_cents(4999).round_to_cents().cents(), 0);
    /// assert_eq!(ExactMoney::from_sub_cents(-5000).round_to_cents().cents(), -1);
    /// ```
    pub fn round_to_cents(&self) -> Money {
        let half = SUB_CENTS_PER_CENT / 2;
        let cents = if self.0 < 0 {
            (self.0 - half) / SUB_CENTS_PER_CENT
        } else {
            (self.0 + half) / SUB_CENTS_PER_CENT
        };
        let cents = i64::try_from(cents).unwrap_or(if cents < 0 { i64::MIN } else { i64::MAX });
        Money::from_cents(cents)
    }
}

impl From<Money> for ExactMoney {
    fn from(money: Money) -> Self {
        ExactMoney::from_cents(money.cents())
    }
}

/// Rounded to the cent.
impl fmt::Display for ExactMoney {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.round_to_cents(), f)
    }
}

impl Add for ExactMoney {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        ExactMoney(self.0 + other.0)
    }
}

impl Sub for ExactMoney {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        ExactMoney(self.0 - other.0)
    }
}

impl Neg for ExactMoney {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        ExactMoney(-self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1500)), "$15.00");
        assert_eq!(format!("{}", Money::from_cents(-1000)), "-$10.00");
        assert_eq!(format!("{}", Money::from_cents(-5)), "-$0.05");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(3000);
        let b = Money::from_cents(1000);

        assert_eq!((a + b).cents(), 4000);
        assert_eq!((a - b).cents(), 2000);
        assert_eq!((-b).cents(), -1000);
        assert_eq!((b * 3).cents(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_cents(500);
        assert_eq!(c.cents(), 3500);
    }

    #[test]
    fn test_sum() {
        let total: Money = [1500, 2100, 3100].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 6700);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_tax_ten_percent() {
        let tax = Money::from_cents(3000).calculate_tax(TaxRate::from_bps(1000));
        assert_eq!(tax, ExactMoney::from_cents(300));
    }

    #[test]
    fn test_tax_keeps_fractions_of_a_cent() {
        let rate = TaxRate::from_bps(1000);

        // $0.05 at 10% is exactly half a cent
        let tax = Money::from_cents(5).calculate_tax(rate);
        assert_eq!(tax.sub_cents(), 5 * 1000);
        assert_ne!(tax, ExactMoney::from_cents(1));
        assert_ne!(tax, ExactMoney::zero());

        // 8.25% of $0.99 = 8.1675 cents
        let tax = Money::from_cents(99).calculate_tax(TaxRate::from_bps(825));
        assert_eq!(tax.sub_cents(), 81_675);
        assert_eq!(tax.round_to_cents().cents(), 8);
    }

    #[test]
    fn test_tax_on_zero() {
        assert!(Money::zero().calculate_tax(TaxRate::from_bps(1000)).is_zero());
    }

    #[test]
    fn test_exact_money_rounds_only_for_display() {
        let half_cent = ExactMoney::from_sub_cents(5000);
        assert_eq!(half_cent.round_to_cents().cents(), 1);
        assert_eq!(format!("{}", half_cent), "$0.01");

        // Three half cents stay 1.5 cents until rounded
        let sum = half_cent + half_cent + half_cent;
        assert_eq!(sum.sub_cents(), 15_000);
        assert_eq!(sum.round_to_cents().cents(), 2);

        assert_eq!((-half_cent).round_to_cents().cents(), -1);
        assert_eq!(ExactMoney::from(Money::from_cents(-1000)), ExactMoney::from_cents(-1000));
        assert!((-half_cent).clamp_to_zero().is_zero());
    }

    #[test]
    fn test_clamp_to_zero() {
        assert_eq!(Money::from_cents(-1).clamp_to_zero(), Money::zero());
        assert_eq!(Money::from_cents(0).clamp_to_zero(), Money::zero());
        assert_eq!(Money::from_cents(7).clamp_to_zero().cents(), 7);
    }

    #[test]
    fn test_serializes_as_plain_numbers() {
        let json = serde_json::to_string(&Money::from_cents(1500)).unwrap();
        assert_eq!(json, "1500");

        let json = serde_json::to_string(&ExactMoney::from_sub_cents(5000)).unwrap();
        assert_eq!(json, "5000");
    }
}
