//! Order book module.
//!
//! ## Architecture
//!
//! Each symbol's book is two [`PriceLevelQueue`]s built from:
//!
//! - **Slab-based storage**: O(1) node insertion, removal, and lookup
//! - **Price levels**: Orders grouped by price using BTreeMap
//! - **Price-time priority**: each level is sorted by sequence number
//!
//! ## Components
//!
//! - [`OrderNode`]: Wrapper around `Order` with linked-list pointers
//! - [`PriceLevel`]: Orders at a single price point
//! - [`PriceLevelQueue`]: One side, best-priced earliest order first
//! - [`OrderBook`]: Bid and ask queues for one symbol
//! - [`snapshot`]: Publication views
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Rest order | O(log n) |
//! | Remove by sequence | O(log n) |
//! | Best bid/ask | O(log n) |
//! | Match order | O(k log n) |

pub mod node;
pub mod level;
pub mod queue;
pub mod book;
pub mod snapshot;

pub use node::OrderNode;
pub use level::PriceLevel;
pub use queue::PriceLevelQueue;
pub use book::OrderBook;
pub use snapshot::{BookSnapshot, LevelSummary, MarketSnapshot, SnapshotEntry};
