//! Read replica of published book snapshots.
//!
//! Mirrors the key/value layout the dashboards read (`orderbook:{symbol}`
//! holding a JSON snapshot). The replica is written after matching and is
//! eventually consistent with the engine; the engine never reloads live
//! state from it. Each record remembers the state root it was taken from so
//! readers can tell whether it is stale.

use std::collections::HashMap;

use tracing::debug;

use crate::engine::MatchingEngine;
use crate::orderbook::{BookSnapshot, OrderBook};

#[derive(Debug, Clone, PartialEq, Eq)]
struct ReplicaRecord {
    payload: String,
    state_root: [u8; 32],
}

/// In-process stand-in for the snapshot cache.
#[derive(Debug, Default)]
pub struct SnapshotReplica {
    records: HashMap<String, ReplicaRecord>,
}

impl SnapshotReplica {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage key for a symbol
    pub fn key(symbol: &str) -> String {
        format!("orderbook:{symbol}")
    }

    /// Store the current snapshot of one book
    pub fn publish_book(&mut self, book: &OrderBook) -> Result<(), serde_json::Error> {
        let payload = serde_json::to_string(&book.snapshot())?;
        let state_root = book.compute_state_root();
        debug!(
            symbol = book.symbol(),
            bytes = payload.len(),
            root = %hex::encode(state_root),
            "snapshot published"
        );
        self.records.insert(
            Self::key(book.symbol()),
            ReplicaRecord {
                payload,
                state_root,
            },
        );
        Ok(())
    }

    /// Store snapshots of every book in the engine
    pub fn publish_all(&mut self, engine: &MatchingEngine) -> Result<(), serde_json::Error> {
        for symbol in engine.symbols() {
            if let Some(book) = engine.book(symbol) {
                self.publish_book(book)?;
            }
        }
        Ok(())
    }

    /// Serialized snapshot as stored
    pub fn raw(&self, symbol: &str) -> Option<&str> {
        self.records
            .get(&Self::key(symbol))
            .map(|record| record.payload.as_str())
    }

    /// Parsed snapshot, or `None` if nothing was published for `symbol`
    pub fn get(&self, symbol: &str) -> Result<Option<BookSnapshot>, serde_json::Error> {
        self.raw(symbol).map(serde_json::from_str).transpose()
    }

    /// True when every stored record matches the engine's live books
    pub fn is_current(&self, engine: &MatchingEngine) -> bool {
        engine.symbols().all(|symbol| {
            match (self.records.get(&Self::key(symbol)), engine.book(symbol)) {
                (Some(record), Some(book)) => record.state_root == book.compute_state_root(),
                _ => false,
            }
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
