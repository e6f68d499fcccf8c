//! Publication views of the book.
//!
//! Snapshots are read-only copies for market-data consumers; matching never
//! consults them.
//!
//! ## Wire Format
//!
//! ```json
//! { "AAPL": { "bids": [{"price": 105.0, "quantity": 4, "sequenceNumber": 5}],
//!             "asks": [] } }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::price;
use crate::types::Order;

/// One resting order as published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    #[serde(with = "price::as_number")]
    pub price: u64,
    pub quantity: u64,
    pub sequence_number: u64,
}

impl From<&Order> for SnapshotEntry {
    fn from(order: &Order) -> Self {
        Self {
            price: order.price,
            quantity: order.quantity,
            sequence_number: order.sequence_number,
        }
    }
}

/// Both sides of one symbol's book, best-first per side
/// (bids by descending price, asks by ascending price).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub bids: Vec<SnapshotEntry>,
    pub asks: Vec<SnapshotEntry>,
}

impl BookSnapshot {
    pub fn best_bid(&self) -> Option<&SnapshotEntry> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&SnapshotEntry> {
        self.asks.first()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

/// Snapshot of every book, keyed by symbol in lexical order.
pub type MarketSnapshot = BTreeMap<String, BookSnapshot>;

/// Aggregated view of one price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSummary {
    #[serde(with = "price::as_number")]
    pub price: u64,
    pub quantity: u128,
    pub order_count: usize,
}
