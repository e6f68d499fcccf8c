//! Order types for the matching engine.
//!
//! ## Fixed-Point Representation
//!
//! Prices are stored as u64 scaled by 10^8 (see [`crate::types::price::SCALE`]).
//! Quantities are whole units and are never scaled.

use serde::{Deserialize, Serialize};

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Bid or Ask
///
/// Represented as u8 inside SSZ-encoded book entries:
/// - Bid = 0
/// - Ask = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order - wants to purchase the asset
    #[default]
    Bid,
    /// Sell order - wants to sell the asset
    Ask,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Bid => 0,
            Side::Ask => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Bid),
            1 => Some(Side::Ask),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }

    /// Wire label used by the inbound and fill records
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Bid => "bid",
            Side::Ask => "ask",
        }
    }

    /// Whether an aggressor on this side at `aggressor_price` trades against
    /// a resting order at `resting_price`.
    #[inline]
    pub fn crosses(self, aggressor_price: u64, resting_price: u64) -> bool {
        match self {
            Side::Bid => aggressor_price >= resting_price,
            Side::Ask => aggressor_price <= resting_price,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order, as seen by the engine after admission and sequencing.
///
/// Every field except `quantity` is fixed at creation. `quantity` is only
/// ever reduced by the matching algorithm.
///
/// ## Example
///
/// ```
/// use exchange_engine::types::{Order, Side};
///
/// // Bid for 10 AAPL at 105.00
/// let order = Order::new("AAPL", Side::Bid, 10_500_000_000, 10, 5);
/// assert_eq!(order.side, Side::Bid);
/// assert!(!order.is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Order {
    /// Symbol this order trades; one of the engine's configured universe
    pub symbol: String,

    /// Bid or Ask
    pub side: Side,

    /// Limit price in fixed-point (scaled by 10^8)
    pub price: u64,

    /// Remaining quantity in whole units
    pub quantity: u64,

    /// Arrival rank; unique for the lifetime of the process
    pub sequence_number: u64,
}

impl Order {
    /// Create a new limit order
    ///
    /// # Arguments
    ///
    /// * `symbol` - Tradable symbol
    /// * `side` - Bid or Ask
    /// * `price` - Price in fixed-point (scaled by 10^8)
    /// * `quantity` - Quantity in whole units
    /// * `sequence_number` - Value handed out by the sequence assigner
    pub fn new(
        symbol: impl Into<String>,
        side: Side,
        price: u64,
        quantity: u64,
        sequence_number: u64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            price,
            quantity,
            sequence_number,
        }
    }

    /// Check if the order has no quantity left
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.quantity == 0
    }

    /// Fill a portion of this order
    ///
    /// # Returns
    ///
    /// The actual quantity filled (may be less if the order doesn't have
    /// enough remaining)
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.quantity);
        self.quantity -= actual_fill;
        actual_fill
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
