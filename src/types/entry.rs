//! Compact, deterministic encoding of a resting order.
//!
//! ## SSZ Serialization
//!
//! `BookEntry` derives `SimpleSerialize` from ssz_rs. All fields are basic
//! types, so the encoding is a fixed 25-byte little-endian container. Book
//! state roots are SHA-256 digests over the concatenation of these
//! encodings, which makes them independent of slab layout and hash-map
//! iteration order.

use ssz_rs::prelude::*;

use crate::types::{Order, Side};

/// A resting order stripped of its symbol (the book already knows it).
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct BookEntry {
    pub sequence_number: u64,

    /// Order side as u8 (0=Bid, 1=Ask)
    pub side_raw: u8,

    /// Price in fixed-point (scaled by 10^8)
    pub price: u64,

    /// Remaining quantity
    pub quantity: u64,
}

impl BookEntry {
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or_default()
    }

    /// SSZ bytes for this entry
    pub fn encode(&self) -> Vec<u8> {
        // A container of basic fields always serializes; the fallback
        // keeps hashing total rather than panicking.
        ssz_rs::serialize(self).unwrap_or_default()
    }
}

impl From<&Order> for BookEntry {
    fn from(order: &Order) -> Self {
        Self {
            sequence_number: order.sequence_number,
            side_raw: order.side.to_u8(),
            price: order.price,
            quantity: order.quantity,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_order() {
        let order = Order::new("AAPL", Side::Ask, 10_000_000_000, 6, 1);
        let entry = BookEntry::from(&order);

        assert_eq!(entry.sequence_number, 1);
        assert_eq!(entry.side(), Side::Ask);
        assert_eq!(entry.price, 10_000_000_000);
        assert_eq!(entry.quantity, 6);
    }

    #[test]
    fn test_entry_ssz_size() {
        let entry = BookEntry::from(&Order::new("AAPL", Side::Bid, 1, 1, 1));
        // 8 (sequence) + 1 (side) + 8 (price) + 8 (quantity)
        assert_eq!(entry.encode().len(), 25);
    }

    #[test]
    fn test_entry_ssz_roundtrip() {
        let entry = BookEntry::from(&Order::new("AAPL", Side::Ask, 10_500_000_000, 4, 5));
        let bytes = entry.encode();
        let decoded: BookEntry = ssz_rs::deserialize(&bytes).expect("Failed to deserialize");
        assert_eq!(decoded, entry);
    }
}
