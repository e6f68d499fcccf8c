//! Fill (execution) record emitted by the matching engine.

use serde::{Deserialize, Serialize};

use crate::types::price;
use crate::types::Side;

/// A fill records quantity matched against one resting order.
///
/// ## Pricing
///
/// The fill always carries the resting order's price, never the
/// aggressor's: the aggressor receives any price improvement.
///
/// ## Sides
///
/// Each match produces two fills carrying the same quantity and the
/// resting order's sequence number: one tagged with the resting side and
/// one tagged with the aggressor side. `side` therefore tells downstream
/// consumers which side of the book the record closes.
///
/// ## Wire Format
///
/// ```
/// use exchange_engine::types::{Fill, Side};
///
/// let fill = Fill::new("AAPL", 10_000_000_000, 6, 1, Side::Ask);
/// let json = serde_json::to_string(&fill).unwrap();
/// assert_eq!(
///     json,
///     r#"{"symbol":"AAPL","price":100.0,"quantity":6,"sequenceNumber":1,"side":"ask"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    pub symbol: String,

    /// Resting order's price in fixed-point (scaled by 10^8)
    #[serde(with = "price::as_number")]
    pub price: u64,

    /// Matched quantity
    pub quantity: u64,

    /// Sequence number of the resting order that traded
    pub sequence_number: u64,

    /// Side this record closes
    pub side: Side,
}

impl Fill {
    pub fn new(
        symbol: impl Into<String>,
        price: u64,
        quantity: u64,
        sequence_number: u64,
        side: Side,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            quantity,
            sequence_number,
            side,
        }
    }

    /// Notional value (price * quantity), still scaled by 10^8
    pub fn notional_raw(&self) -> u128 {
        (self.price as u128) * (self.quantity as u128)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
