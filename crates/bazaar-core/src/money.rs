//! # Money Module
//!
//! Provides the `Money` type for handling catalog prices and order totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  An order total summed from float line totals drifts by fractions      │
//! │  of a cent, and a persisted total stops matching its own lines.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    189900 cents × 2 = 379800 cents, exactly, every time                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//!
//! let doubled = price.multiply_quantity(2);    // $21.98
//! let total = price + Money::from_cents(500);  // $15.99
//! assert_eq!(doubled.cents(), 2198);
//! assert_eq!(total.cents(), 1599);
//!
//! // Operator input is parsed from decimal text, never from floats
//! let min: Money = "19.99".parse().unwrap();
//! assert_eq!(min.cents(), 1999);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──┬──► price filter bounds                              │
/// │                  │                                                      │
/// │                  └──► OrderLine.unit_price (frozen at assembly)        │
/// │                              │                                          │
/// │                              ▼                                          │
/// │                       OrderLine.line_total ──► Order.total_amount      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// Saturates at the `i64` bounds. Catalog validation keeps real
    /// prices and stock far below the point where that matters.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses decimal text such as `"19"`, `"19.9"`, `"19.99"` or `"$19.99"`.
///
/// More than two fractional digits is rejected rather than rounded: a
/// price bound the operator typed should never silently change.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned);

        if unsigned.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }

        let (major_text, minor_text) = match unsigned.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (unsigned, ""),
        };

        if minor_text.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }
        let all_digits = |t: &str| t.chars().all(|c| c.is_ascii_digit());
        if !all_digits(major_text) || !all_digits(minor_text) {
            return Err(invalid("must be a decimal number"));
        }

        let major: i64 = if major_text.is_empty() {
            0
        } else {
            major_text
                .parse()
                .map_err(|_| invalid("amount is too large"))?
        };
        let minor: i64 = match minor_text.len() {
            0 => 0,
            1 => minor_text.parse::<i64>().map_err(|_| invalid("bad cents"))? * 10,
            _ => minor_text.parse().map_err(|_| invalid("bad cents"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
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

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturating, like [`Money::multiply_quantity`].
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

/// Summing line totals into an order total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
