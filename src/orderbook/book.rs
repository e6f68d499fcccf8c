//! Order book for a single symbol.
//!
//! ## Architecture
//!
//! The book owns two [`PriceLevelQueue`]s:
//!
//! - **Bids** (buy orders): best = highest price, then lowest sequence
//! - **Asks** (sell orders): best = lowest price, then lowest sequence
//!
//! The book exposes matching primitives but does not decide whether two
//! orders cross; that is the engine's job. Outside of an in-flight
//! `execute` call the book is never crossed.
//!
//! ## Example
//!
//! ```
//! use exchange_engine::orderbook::OrderBook;
//! use exchange_engine::types::{Order, Side};
//!
//! let mut book = OrderBook::new("AAPL");
//! book.rest_order(Order::new("AAPL", Side::Bid, 10_000_000_000, 10, 1)).unwrap();
//! book.rest_order(Order::new("AAPL", Side::Ask, 10_100_000_000, 10, 2)).unwrap();
//!
//! assert_eq!(book.best_bid(), Some(10_000_000_000));
//! assert_eq!(book.spread(), Some(100_000_000));
//! ```

use sha2::{Digest, Sha256};

use crate::error::BookError;
use crate::orderbook::snapshot::{BookSnapshot, LevelSummary};
use crate::orderbook::PriceLevelQueue;
use crate::types::{BookEntry, Order, Side};

/// Both sides of the book for one symbol.
#[derive(Debug)]
pub struct OrderBook {
    symbol: String,
    bids: PriceLevelQueue,
    asks: PriceLevelQueue,
}

impl OrderBook {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self::with_capacity(symbol, 0)
    }

    /// Create a book with `order_capacity` pre-allocated slots per side
    pub fn with_capacity(symbol: impl Into<String>, order_capacity: usize) -> Self {
        Self {
            symbol: symbol.into(),
            bids: PriceLevelQueue::with_capacity(Side::Bid, order_capacity),
            asks: PriceLevelQueue::with_capacity(Side::Ask, order_capacity),
        }
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn bids(&self) -> &PriceLevelQueue {
        &self.bids
    }

    #[inline]
    pub fn asks(&self) -> &PriceLevelQueue {
        &self.asks
    }

    /// The queue holding orders of `side`
    #[inline]
    pub fn queue(&self, side: Side) -> &PriceLevelQueue {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    #[inline]
    fn queue_mut(&mut self, side: Side) -> &mut PriceLevelQueue {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    // ========================================================================
    // Size
    // ========================================================================

    #[inline]
    pub fn order_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Remaining quantity resting on both sides
    pub fn resting_quantity(&self) -> u128 {
        self.bids.total_quantity() + self.asks.total_quantity()
    }

    // ========================================================================
    // Best Bid/Ask
    // ========================================================================

    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best_price()
    }

    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best_price()
    }

    /// best_ask - best_bid, or None if either side is empty
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    /// True when the best bid is at or above the best ask
    pub fn is_crossed(&self) -> bool {
        matches!((self.best_bid(), self.best_ask()), (Some(bid), Some(ask)) if bid >= ask)
    }

    // ========================================================================
    // Matching primitives
    // ========================================================================

    /// Best resting order an aggressor on `side` would trade against
    #[inline]
    pub fn best_opposing(&self, side: Side) -> Option<&Order> {
        self.queue(side.opposite()).peek_best()
    }

    /// Rest an unfilled remainder on its own side
    pub fn rest_order(&mut self, order: Order) -> Result<(), BookError> {
        if order.symbol != self.symbol {
            return Err(BookError::WrongSymbol {
                sequence: order.sequence_number,
                expected: self.symbol.clone(),
                actual: order.symbol,
            });
        }
        self.queue_mut(order.side).insert(order)
    }

    /// Decrement a resting order by `filled_qty`; remove it at zero.
    ///
    /// # Returns
    ///
    /// The order's remaining quantity
    pub fn reduce_or_remove(
        &mut self,
        side: Side,
        sequence: u64,
        filled_qty: u64,
    ) -> Result<u64, BookError> {
        self.queue_mut(side).reduce_by_sequence(sequence, filled_qty)
    }

    /// Remove a resting order from whichever side holds it
    pub fn cancel(&mut self, sequence: u64) -> Option<Order> {
        self.bids
            .remove_by_sequence(sequence)
            .or_else(|| self.asks.remove_by_sequence(sequence))
    }

    pub fn get(&self, sequence: u64) -> Option<&Order> {
        self.bids.get(sequence).or_else(|| self.asks.get(sequence))
    }

    #[inline]
    pub fn contains(&self, sequence: u64) -> bool {
        self.bids.contains(sequence) || self.asks.contains(sequence)
    }

    // ========================================================================
    // Publication
    // ========================================================================

    /// Best-first copy of both sides; never used for matching
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            bids: self.bids.to_snapshot(),
            asks: self.asks.to_snapshot(),
        }
    }

    /// Up to `max_levels` aggregated levels per side: (bids, asks)
    pub fn depth(&self, max_levels: usize) -> (Vec<LevelSummary>, Vec<LevelSummary>) {
        (self.bids.depth(max_levels), self.asks.depth(max_levels))
    }

    /// SHA-256 over the SSZ encoding of every resting order, bids best-first
    /// then asks best-first.
    pub fn compute_state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.symbol.as_bytes());
        for order in self.bids.iter().chain(self.asks.iter()) {
            hasher.update(BookEntry::from(order).encode());
        }
        hasher.finalize().into()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
