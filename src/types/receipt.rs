//! Execution receipt summarizing a run of processed orders.
//!
//! The receipt carries a state root over every book so that two runs of the
//! same order flow can be compared byte for byte.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Summary of processed orders and the resulting book state.
///
/// ## Example
///
/// ```
/// use exchange_engine::types::ExecutionReceipt;
///
/// let receipt = ExecutionReceipt::new(1, 1000, 500, 3, [0u8; 32]);
/// assert_eq!(receipt.state_root_hex().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExecutionReceipt {
    /// Batch sequence number
    pub batch_id: u64,

    /// Orders accepted by the engine
    pub orders_processed: u64,

    /// Fill records emitted (two per match)
    pub fills_emitted: u64,

    /// Orders refused before touching any book
    pub orders_rejected: u64,

    /// SHA-256 over the state roots of every book, in symbol order
    #[serde(serialize_with = "hex::serde::serialize")]
    pub state_root: [u8; 32],
}

impl ExecutionReceipt {
    pub fn new(
        batch_id: u64,
        orders_processed: u64,
        fills_emitted: u64,
        orders_rejected: u64,
        state_root: [u8; 32],
    ) -> Self {
        Self {
            batch_id,
            orders_processed,
            fills_emitted,
            orders_rejected,
            state_root,
        }
    }

    /// Compute SHA-256 hash of the given data
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    /// Matches per accepted order; `None` before any order was processed.
    pub fn fill_rate(&self) -> Option<f64> {
        if self.orders_processed == 0 {
            None
        } else {
            Some((self.fills_emitted / 2) as f64 / self.orders_processed as f64)
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
    fn test_receipt_hash_determinism() {
        let hash1 = ExecutionReceipt::compute_hash(b"book state");
        let hash2 = ExecutionReceipt::compute_hash(b"book state");
        assert_eq!(hash1, hash2);

        let hash3 = ExecutionReceipt::compute_hash(b"other state");
        assert_ne!(hash1, hash3);
    }

    #[test]
    fn test_receipt_state_root_hex() {
        let receipt = ExecutionReceipt::new(1, 0, 0, 0, [0xAB; 32]);

        let hex = receipt.state_root_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("abab"));
    }

    #[test]
    fn test_receipt_fill_rate() {
        let receipt = ExecutionReceipt::new(1, 100, 100, 0, [0u8; 32]);
        assert_eq!(receipt.fill_rate(), Some(0.5));

        let empty = ExecutionReceipt::default();
        assert_eq!(empty.fill_rate(), None);
    }

    #[test]
    fn test_receipt_json() {
        let receipt = ExecutionReceipt::new(2, 10, 4, 1, [0x01; 32]);
        let value = serde_json::to_value(&receipt).unwrap();

        assert_eq!(value["batch_id"], 2);
        assert_eq!(value["orders_rejected"], 1);
        assert_eq!(value["state_root"], "01".repeat(32));
    }
}
