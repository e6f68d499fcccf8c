//! Process-wide arrival sequencing.
//!
//! Sequence numbers are the tie-break key for time priority and the
//! identity of every resting order and fill. The engine does not look for
//! duplicates across books, so the uniqueness of these values rests
//! entirely on this type.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::EngineError;

/// Hands out strictly increasing sequence numbers.
///
/// Safe to share between threads; every call to
/// [`get_next`](Self::get_next) returns a distinct value.
///
/// ```
/// use exchange_engine::engine::SequenceAssigner;
///
/// let sequencer = SequenceAssigner::new();
/// assert_eq!(sequencer.get_next().unwrap(), 1);
/// assert_eq!(sequencer.get_next().unwrap(), 2);
/// ```
#[derive(Debug)]
pub struct SequenceAssigner {
    next: AtomicU64,
}

impl Default for SequenceAssigner {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceAssigner {
    /// Start at 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start at `first`, e.g. one past the last value seen before a restart
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Take the next sequence number.
    ///
    /// Never wraps: once `u64::MAX` is reached every call fails with
    /// [`EngineError::SequenceExhausted`].
    pub fn get_next(&self) -> Result<u64, EngineError> {
        self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .map_err(|_| EngineError::SequenceExhausted)
    }

    /// The value the next call will hand out
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
