//! One side of a book: resting orders in (price, sequence) priority.
//!
//! ## Architecture
//!
//! - **Slab**: Pre-allocated storage for O(1) node operations
//! - **BTreeMap**: Price levels sorted by price; the best level is the
//!   highest key for bids and the lowest key for asks
//! - **HashMap**: Sequence number to slab key for removal by identity
//!
//! Comparing on price alone is not enough: two orders at the same price
//! must be ordered by sequence number. Each [`PriceLevel`] keeps its list
//! sorted by sequence, so the head of the best level is always the
//! best-priced, earliest-arrived order.
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | insert | O(log n) |
//! | peek_best | O(log n) |
//! | pop_best | O(log n) |
//! | remove_by_sequence | O(log n) |
//!
//! ## Example
//!
//! ```
//! use exchange_engine::orderbook::PriceLevelQueue;
//! use exchange_engine::types::{Order, Side};
//!
//! let mut asks = PriceLevelQueue::new(Side::Ask);
//! asks.insert(Order::new("AAPL", Side::Ask, 10_100_000_000, 5, 2)).unwrap();
//! asks.insert(Order::new("AAPL", Side::Ask, 10_000_000_000, 5, 3)).unwrap();
//!
//! assert_eq!(asks.peek_best().map(|o| o.sequence_number), Some(3));
//! ```

use std::collections::{BTreeMap, HashMap};

use slab::Slab;

use crate::error::BookError;
use crate::orderbook::snapshot::{LevelSummary, SnapshotEntry};
use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::{Order, Side};

/// Priority queue of resting orders for one side of one symbol.
#[derive(Debug)]
pub struct PriceLevelQueue {
    side: Side,

    /// Resting order storage
    nodes: Slab<OrderNode>,

    /// Price levels, ascending by price
    levels: BTreeMap<u64, PriceLevel>,

    /// Sequence number to slab key
    index: HashMap<u64, usize>,
}

impl PriceLevelQueue {
    pub fn new(side: Side) -> Self {
        Self::with_capacity(side, 0)
    }

    /// Create a queue with `order_capacity` pre-allocated slots
    pub fn with_capacity(side: Side, order_capacity: usize) -> Self {
        Self {
            side,
            nodes: Slab::with_capacity(order_capacity),
            levels: BTreeMap::new(),
            index: HashMap::with_capacity(order_capacity),
        }
    }

    // ========================================================================
    // Size
    // ========================================================================

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of resting orders
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct price levels
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Sum of remaining quantity across all resting orders
    pub fn total_quantity(&self) -> u128 {
        self.levels.values().map(|level| level.total_quantity).sum()
    }

    // ========================================================================
    // Best order
    // ========================================================================

    fn best_level(&self) -> Option<&PriceLevel> {
        match self.side {
            Side::Bid => self.levels.values().next_back(),
            Side::Ask => self.levels.values().next(),
        }
    }

    fn best_key(&self) -> Option<usize> {
        self.best_level()?.peek_head()
    }

    /// Price of the best level
    #[inline]
    pub fn best_price(&self) -> Option<u64> {
        self.best_level().map(|level| level.price)
    }

    /// Best-priced, earliest-arrived resting order
    pub fn peek_best(&self) -> Option<&Order> {
        let key = self.best_key()?;
        self.nodes.get(key).map(|node| &node.order)
    }

    /// Remove and return the order [`peek_best`](Self::peek_best) would return
    pub fn pop_best(&mut self) -> Option<Order> {
        let key = self.best_key()?;
        Some(self.remove_key(key))
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Rest an order on this side.
    ///
    /// Rejects orders for the other side, zero price or quantity, and
    /// sequence numbers that are already resting.
    pub fn insert(&mut self, order: Order) -> Result<(), BookError> {
        let sequence = order.sequence_number;
        if order.side != self.side {
            return Err(BookError::WrongSide {
                sequence,
                expected: self.side,
                actual: order.side,
            });
        }
        if order.quantity == 0 {
            return Err(BookError::ZeroQuantity(sequence));
        }
        if order.price == 0 {
            return Err(BookError::ZeroPrice(sequence));
        }
        if self.index.contains_key(&sequence) {
            return Err(BookError::DuplicateSequence(sequence));
        }

        let price = order.price;
        let key = self.nodes.insert(OrderNode::new(order));
        self.index.insert(sequence, key);
        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .insert(key, &mut self.nodes);

        Ok(())
    }

    /// Remove a resting order wherever it sits in the queue
    pub fn remove_by_sequence(&mut self, sequence: u64) -> Option<Order> {
        let key = *self.index.get(&sequence)?;
        Some(self.remove_key(key))
    }

    /// Reduce a resting order by `quantity`, removing it when it reaches zero.
    ///
    /// Neither price nor sequence changes, so a partially filled order keeps
    /// its place in the queue.
    ///
    /// # Returns
    ///
    /// The order's remaining quantity after the reduction
    pub fn reduce_by_sequence(&mut self, sequence: u64, quantity: u64) -> Result<u64, BookError> {
        let key = *self
            .index
            .get(&sequence)
            .ok_or(BookError::NotFound(sequence))?;

        let node = &mut self.nodes[key];
        let filled = node.fill(quantity);
        let remaining = node.remaining();
        let price = node.price();

        if let Some(level) = self.levels.get_mut(&price) {
            level.reduce_quantity(filled);
        }
        if remaining == 0 {
            self.remove_key(key);
        }

        Ok(remaining)
    }

    fn remove_key(&mut self, key: usize) -> Order {
        let node = &self.nodes[key];
        let sequence = node.sequence();
        let price = node.price();

        if let Some(level) = self.levels.get_mut(&price) {
            level.remove(key, &mut self.nodes);
            if level.is_empty() {
                self.levels.remove(&price);
            }
        }
        self.index.remove(&sequence);

        self.nodes.remove(key).order
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn get(&self, sequence: u64) -> Option<&Order> {
        let key = *self.index.get(&sequence)?;
        self.nodes.get(key).map(|node| &node.order)
    }

    #[inline]
    pub fn contains(&self, sequence: u64) -> bool {
        self.index.contains_key(&sequence)
    }

    /// Price levels in priority order
    fn levels_best_first(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            Side::Bid => Box::new(self.levels.values().rev()),
            Side::Ask => Box::new(self.levels.values()),
        }
    }

    /// Resting orders in the order they would be matched
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.levels_best_first()
            .flat_map(move |level| level.iter(&self.nodes))
            .map(|node| &node.order)
    }

    /// Up to `max_levels` aggregated levels, best-first
    pub fn depth(&self, max_levels: usize) -> Vec<LevelSummary> {
        self.levels_best_first()
            .take(max_levels)
            .map(|level| LevelSummary {
                price: level.price,
                quantity: level.total_quantity,
                order_count: level.order_count,
            })
            .collect()
    }

    /// Resting orders best-first, for publication
    pub fn to_snapshot(&self) -> Vec<SnapshotEntry> {
        self.iter().map(SnapshotEntry::from).collect()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
