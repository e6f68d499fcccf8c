//! Core data types for the exchange engine
//!
//! ## Types
//!
//! - [`Order`]: A limit order, sequenced and ready for matching
//! - [`Side`]: Bid or Ask
//! - [`Fill`]: One execution record produced by a match
//! - [`BookEntry`]: SSZ-encoded resting order used for state roots
//! - [`ExecutionReceipt`]: Run summary with a book state root
//!
//! ## Fixed-Point Arithmetic
//!
//! Prices are stored as `u64` scaled by 10^8.
//! Example: 105.25 is stored as 10_525_000_000u64

mod order;
mod fill;
mod entry;
mod receipt;
pub mod price;

pub use order::{Order, Side};
pub use fill::Fill;
pub use entry::BookEntry;
pub use receipt::ExecutionReceipt;
