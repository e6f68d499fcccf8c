//! Fixed-point price utilities.
//!
//! ## Overview
//!
//! Prices inside the book are stored as u64 scaled by 10^8 so that matching
//! compares integers only. Conversions to and from decimal text and JSON
//! numbers go through `rust_decimal`.
//!
//! ## Examples
//!
//! ```
//! use exchange_engine::types::price::{to_fixed, from_fixed};
//!
//! let price = to_fixed("150.25").unwrap();
//! assert_eq!(price, 15_025_000_000);
//! assert_eq!(from_fixed(price), "150.25000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point arithmetic: 10^8
pub const SCALE: u64 = 100_000_000;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to fixed-point u64
///
/// Returns `None` if parsing fails or the value is negative / out of range.
///
/// ```
/// use exchange_engine::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// assert_eq!(to_fixed("-1"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert an `f64` (a JSON number on the wire) to fixed-point u64
///
/// Non-finite and negative inputs return `None`.
pub fn f64_to_fixed(value: f64) -> Option<u64> {
    if !value.is_finite() {
        return None;
    }
    decimal_to_fixed(Decimal::from_f64(value)?)
}

/// Convert a Decimal to fixed-point u64, rounding to 8 decimal places
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() && !d.is_zero() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    let rounded = scaled.round_dp(0);
    rounded.to_u64()
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Convert fixed-point u64 to a string with 8 decimal places
///
/// ```
/// use exchange_engine::types::price::from_fixed;
///
/// assert_eq!(from_fixed(100_000_000), "1.00000000");
/// ```
pub fn from_fixed(value: u64) -> String {
    let decimal = fixed_to_decimal(value);
    format!("{:.8}", decimal)
}

/// Convert fixed-point u64 to a human-readable string (trailing zeros trimmed)
///
/// ```
/// use exchange_engine::types::price::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(10_500_000_000), "105");
/// assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    fixed_to_decimal(value).normalize().to_string()
}

// ============================================================================
// Serde helper
// ============================================================================

/// `#[serde(with = "as_number")]` for fixed-point prices that travel as
/// plain JSON numbers (e.g. `105.5`).
pub mod as_number {
    use serde::de::Error as _;
    use serde::{Deserializer, Serializer};

    use super::{decimal_to_fixed, fixed_to_decimal};

    pub fn serialize<S>(price: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&fixed_to_decimal(*price), serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let decimal = rust_decimal::serde::float::deserialize(deserializer)?;
        decimal_to_fixed(decimal)
            .ok_or_else(|| D::Error::custom(format!("price {decimal} is out of range")))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
