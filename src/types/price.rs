//! Fixed-point price utilities.
//!
//! ## Overview
//!
//! Prices are stored as signed integer ticks, one tick per cent. Integer
//! ticks give a strict total order and exact equality, which the book relies
//! on for its price-keyed maps.
//!
//! ## Tick Size
//!
//! `TICKS_PER_UNIT` is 100, i.e. two decimal places. 100.25 is stored as
//! `10025i64`.
//!
//! ## Examples
//!
//! ```
//! use matchbook::types::price::{to_ticks, from_ticks};
//!
//! let price = to_ticks("100.25").unwrap();
//! assert_eq!(price, 10_025);
//! assert_eq!(from_ticks(price), "100.25");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// A price in ticks. One tick is one cent.
pub type Price = i64;

/// Number of ticks per whole currency unit.
pub const TICKS_PER_UNIT: i64 = 100;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Parse a decimal string into ticks.
///
/// Returns `None` if the string does not parse or the value does not fit.
///
/// # Example
///
/// ```
/// use matchbook::types::price::to_ticks;
///
/// assert_eq!(to_ticks("1"), Some(100));
/// assert_eq!(to_ticks("100.25"), Some(10_025));
/// assert_eq!(to_ticks("-0.5"), Some(-50));
/// assert_eq!(to_ticks("abc"), None);
/// ```
pub fn to_ticks(s: &str) -> Option<Price> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_ticks(decimal)
}

/// Convert a `Decimal` into ticks, rounding to the nearest tick.
pub fn decimal_to_ticks(d: Decimal) -> Option<Price> {
    let scaled = d.checked_mul(Decimal::from(TICKS_PER_UNIT))?;
    scaled.round_dp(0).to_i64()
}

/// Convert ticks into a `Decimal`.
pub fn ticks_to_decimal(price: Price) -> Decimal {
    Decimal::from(price) / Decimal::from(TICKS_PER_UNIT)
}

/// Render ticks as a decimal string with trailing zeros trimmed.
///
/// # Example
///
/// ```
/// use matchbook::types::price::from_ticks;
///
/// assert_eq!(from_ticks(10_000), "100");
/// assert_eq!(from_ticks(10_025), "100.25");
/// assert_eq!(from_ticks(-50), "-0.5");
/// ```
pub fn from_ticks(price: Price) -> String {
    ticks_to_decimal(price).normalize().to_string()
}

// ============================================================================
// Unit Tests
// ============================================================================
