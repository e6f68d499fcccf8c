//! # Exchange Engine
//!
//! Order-matching core of a simulated securities exchange.
//!
//! ## Architecture
//!
//! - **Types**: Order, Side, Fill, fixed-point prices, receipts
//! - **OrderBook**: per-symbol bid/ask queues with slab-based storage
//! - **Engine**: sequencing and price-time priority matching
//! - **Sink**: forwarding fills to downstream consumers
//! - **Admission**: validation of raw client order records
//! - **Replica**: read-only snapshot store for publishers
//! - **Replay**: raw order stream through admission, engine, sink and replica
//!
//! ## Design Principles
//!
//! 1. **Determinism**: All operations produce identical results for identical inputs
//! 2. **No Floating Point in the book**: prices are fixed-point (10^8 scaling)
//! 3. **One authority per symbol**: each book is mutated only through `execute`
//! 4. **Synchronous Execution**: No async or I/O in the matching path
//!
//! ## Example
//!
//! ```
//! use exchange_engine::{MatchingEngine, Order, SequenceAssigner, Side};
//!
//! let sequencer = SequenceAssigner::new();
//! let mut engine = MatchingEngine::new(["AAPL", "MSFT"]).unwrap();
//!
//! let ask = Order::new("AAPL", Side::Ask, 10_000_000_000, 5, sequencer.get_next().unwrap());
//! let bid = Order::new("AAPL", Side::Bid, 11_000_000_000, 15, sequencer.get_next().unwrap());
//!
//! engine.execute(ask).unwrap();
//! let result = engine.execute(bid).unwrap();
//!
//! assert_eq!(result.matched_quantity(), 5);
//! assert_eq!(result.remaining, 10);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Fill, prices, receipts
pub mod types;

/// Order book: per-symbol queues with slab-based storage
pub mod orderbook;

/// Matching engine: sequencing and price-time matching
pub mod engine;

/// Execution sinks for produced fills
pub mod sink;

/// Raw order admission
pub mod admission;

/// Snapshot read replica
pub mod replica;

/// Replay of raw order streams
pub mod replay;

/// Engine configuration
pub mod config;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{ExecutionReceipt, Fill, Order, Side};
pub use orderbook::{BookSnapshot, MarketSnapshot, OrderBook, PriceLevelQueue};
pub use engine::{MatchResult, MatchingEngine, SequenceAssigner, SharedEngine};
pub use sink::ExecutionSink;
pub use config::EngineConfig;
pub use error::{AdmissionError, BookError, ConfigError, EngineError, SinkError};
