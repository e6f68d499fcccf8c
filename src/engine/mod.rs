//! Matching engine module.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Same input sequence always produces the same fills
//!    and the same book state roots
//! 2. **Fixed-Point Math**: Prices compare as integers
//! 3. **Synchronous Execution**: `execute` performs no I/O and never waits
//! 4. **Price-Time Priority**: Best price first, then lowest sequence number
//!
//! ## Matching Rules
//!
//! - **Bids** match against asks (lowest price first)
//! - **Asks** match against bids (highest price first)
//! - Trades print at the resting order's price
//! - **Partial fills** are supported
//! - **Unfilled quantity** rests on the book
//!
//! ## Concurrency
//!
//! [`MatchingEngine`] takes `&mut self` and suits a single consumer loop.
//! [`SharedEngine`] locks one book per symbol so symbols match in parallel.

pub mod matcher;
pub mod sequence;
pub mod shared;

pub use matcher::{MatchResult, MatchingEngine};
pub use sequence::SequenceAssigner;
pub use shared::SharedEngine;
