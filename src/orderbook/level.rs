//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` represents all resting orders at a single price point.
//! Orders are kept in a doubly-linked list sorted by sequence number, so
//! the head is always the earliest arrival at this price.
//!
//! ## Queue Structure
//!
//! ```text
//! head (lowest seq) <-> order2 <-> order3 <-> tail (highest seq)
//! ```
//!
//! - Sequence numbers normally arrive increasing, so insertion is a tail
//!   append; an out-of-order arrival walks back to its sorted position
//! - Matching consumes orders from the head
//! - Any order can be unlinked in O(1) using its slab key

use slab::Slab;

use crate::orderbook::OrderNode;

/// A price level containing orders at a single price.
///
/// The order data lives in the slab; this struct only holds the list
/// metadata and running aggregates.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level (fixed-point, scaled by 10^8)
    pub price: u64,

    /// Total remaining quantity at this level. Wider than a single order's
    /// quantity so any number of `u64` orders can share a price.
    pub total_quantity: u128,

    /// Earliest-arrived order (slab key); first to be matched
    pub head: Option<usize>,

    /// Latest-arrived order (slab key)
    pub tail: Option<usize>,

    /// Number of orders at this price level
    pub order_count: usize,
}

impl PriceLevel {
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_quantity: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Link an order into the level at its sequence-number position.
    ///
    /// # Panics
    ///
    /// Panics if `key` (or a key already linked in this level) is not in
    /// the slab.
    pub fn insert(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let sequence = slab[key].sequence();
        let quantity = slab[key].remaining();

        // Walk back from the tail to the last order that arrived earlier.
        let mut after = self.tail;
        while let Some(candidate) = after {
            if slab[candidate].sequence() < sequence {
                break;
            }
            after = slab[candidate].prev;
        }
        let before = match after {
            Some(prev) => slab[prev].next,
            None => self.head,
        };

        let node = &mut slab[key];
        node.prev = after;
        node.next = before;

        match after {
            Some(prev) => slab[prev].next = Some(key),
            None => self.head = Some(key),
        }
        match before {
            Some(next) => slab[next].prev = Some(key),
            None => self.tail = Some(key),
        }

        self.order_count += 1;
        self.total_quantity += u128::from(quantity);
    }

    /// Unlink an order from the level by slab key
    ///
    /// # Returns
    ///
    /// The remaining quantity of the unlinked order
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> u64 {
        let node = &slab[key];
        let quantity = node.remaining();
        let prev_key = node.prev;
        let next_key = node.next;

        match prev_key {
            Some(prev) => slab[prev].next = next_key,
            None => self.head = next_key,
        }
        match next_key {
            Some(next) => slab[next].prev = prev_key,
            None => self.tail = prev_key,
        }

        let node = &mut slab[key];
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_quantity -= u128::from(quantity);

        quantity
    }

    /// Slab key of the earliest-arrived order at this price
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Update the total quantity after a partial fill
    pub fn reduce_quantity(&mut self, filled_quantity: u64) {
        self.total_quantity -= u128::from(filled_quantity);
    }

    /// Iterate the level's nodes from head (earliest) to tail
    pub fn iter<'a>(&self, slab: &'a Slab<OrderNode>) -> LevelIter<'a> {
        LevelIter {
            slab,
            cursor: self.head,
        }
    }
}

/// Head-to-tail iterator over one price level.
pub struct LevelIter<'a> {
    slab: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = &'a OrderNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.slab.get(self.cursor?)?;
        self.cursor = node.next;
        Some(node)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
