//! Price-time priority matching.
//!
//! ## Algorithm
//!
//! For an incoming order (the aggressor):
//!
//! 1. Reject unknown symbols, non-positive price/quantity and sequence
//!    numbers already resting, before touching any book.
//! 2. While the aggressor has quantity and the best opposing order crosses
//!    (bid >= ask), trade `min(aggressor, resting)` at the resting price.
//! 3. Each trade emits two fills with the resting order's sequence number:
//!    one tagged with the resting side, one with the aggressor side.
//! 4. A fully consumed resting order leaves the book; a partially filled one
//!    keeps its place.
//! 5. Any remainder rests on the aggressor's side.
//!
//! All book mutation is complete when [`MatchingEngine::execute`] returns;
//! forwarding the fills is the caller's step.

use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use crate::config::{validate_symbols, EngineConfig};
use crate::error::{ConfigError, EngineError, SinkError};
use crate::orderbook::{BookSnapshot, MarketSnapshot, OrderBook};
use crate::sink::ExecutionSink;
use crate::types::{ExecutionReceipt, Fill, Order, Side};

// ============================================================================
// MatchResult
// ============================================================================

/// Outcome of one `execute` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Fill records tagged [`Side::Ask`], in generation order
    pub ask_fills: Vec<Fill>,

    /// Fill records tagged [`Side::Bid`], in generation order
    pub bid_fills: Vec<Fill>,

    /// Aggressor quantity left after matching
    pub remaining: u64,

    /// Whether the remainder now rests in the book
    pub rested: bool,
}

impl MatchResult {
    /// Quantity traded by the aggressor in this call
    pub fn matched_quantity(&self) -> u64 {
        self.ask_fills.iter().map(|fill| fill.quantity).sum()
    }

    /// Number of resting orders traded against
    pub fn match_count(&self) -> usize {
        self.ask_fills.len()
    }

    pub fn fully_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Total fill records (two per match)
    pub fn fill_count(&self) -> usize {
        self.ask_fills.len() + self.bid_fills.len()
    }

    /// Forward ask fills then bid fills, each list in generation order
    pub fn publish<S: ExecutionSink + ?Sized>(&self, sink: &mut S) -> Result<(), SinkError> {
        for fill in self.ask_fills.iter().chain(&self.bid_fills) {
            sink.publish(fill)?;
        }
        Ok(())
    }
}

// ============================================================================
// Shared matching step
// ============================================================================

/// Validate `order` against `book` and run the matching algorithm.
///
/// The caller has already routed the order to the book for its symbol.
pub(crate) fn execute_on_book(book: &mut OrderBook, order: Order) -> Result<MatchResult, EngineError> {
    let sequence = order.sequence_number;
    if order.price == 0 {
        return Err(EngineError::InvalidPrice { sequence });
    }
    if order.quantity == 0 {
        return Err(EngineError::InvalidQuantity { sequence });
    }
    if book.contains(sequence) {
        return Err(EngineError::DuplicateSequence(sequence));
    }

    match_order(book, order)
}

fn match_order(book: &mut OrderBook, mut order: Order) -> Result<MatchResult, EngineError> {
    let side = order.side;
    let resting_side = side.opposite();
    let mut result = MatchResult::default();

    while order.quantity > 0 {
        let Some(resting) = book.best_opposing(side) else {
            break;
        };
        if !side.crosses(order.price, resting.price) {
            break;
        }

        let resting_sequence = resting.sequence_number;
        let price = resting.price;
        let matched = order.quantity.min(resting.quantity);

        order.fill(matched);
        let resting_left = book.reduce_or_remove(resting_side, resting_sequence, matched)?;

        debug!(
            symbol = book.symbol(),
            price,
            quantity = matched,
            resting = resting_sequence,
            aggressor = order.sequence_number,
            resting_left,
            "fill"
        );

        let resting_fill = Fill::new(book.symbol(), price, matched, resting_sequence, resting_side);
        let aggressor_fill = Fill {
            side,
            ..resting_fill.clone()
        };
        let (ask_fill, bid_fill) = match side {
            Side::Bid => (resting_fill, aggressor_fill),
            Side::Ask => (aggressor_fill, resting_fill),
        };
        result.ask_fills.push(ask_fill);
        result.bid_fills.push(bid_fill);
    }

    result.remaining = order.quantity;
    if order.quantity > 0 {
        trace!(
            symbol = book.symbol(),
            side = side.as_str(),
            price = order.price,
            quantity = order.quantity,
            sequence = order.sequence_number,
            "resting"
        );
        book.rest_order(order)?;
        result.rested = true;
    }

    Ok(result)
}

// ============================================================================
// MatchingEngine
// ============================================================================

/// One book per configured symbol; `execute` is the only mutation entry.
///
/// ## Example
///
/// ```
/// use exchange_engine::engine::MatchingEngine;
/// use exchange_engine::types::{Order, Side};
///
/// let mut engine = MatchingEngine::new(["AAPL"]).unwrap();
///
/// engine.execute(Order::new("AAPL", Side::Ask, 10_000_000_000, 6, 1)).unwrap();
/// let result = engine.execute(Order::new("AAPL", Side::Bid, 10_500_000_000, 10, 5)).unwrap();
///
/// assert_eq!(result.matched_quantity(), 6);
/// assert_eq!(result.ask_fills[0].price, 10_000_000_000);
/// assert!(result.rested);
/// ```
#[derive(Debug)]
pub struct MatchingEngine {
    books: BTreeMap<String, OrderBook>,
    orders_processed: u64,
    orders_rejected: u64,
    fills_emitted: u64,
}

impl MatchingEngine {
    /// Create an engine for a fixed symbol universe
    pub fn new<I, S>(symbols: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_capacity(symbols, 0)
    }

    /// Create an engine with `order_capacity` pre-allocated slots per book side
    pub fn with_capacity<I, S>(symbols: I, order_capacity: usize) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        validate_symbols(&symbols)?;

        let books = symbols
            .into_iter()
            .map(|symbol| {
                let book = OrderBook::with_capacity(symbol.clone(), order_capacity);
                (symbol, book)
            })
            .collect();

        Ok(Self {
            books,
            orders_processed: 0,
            orders_rejected: 0,
            fills_emitted: 0,
        })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        Self::with_capacity(config.symbols.iter().cloned(), config.order_capacity)
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Match `order` against its symbol's book and rest any remainder.
    ///
    /// A rejected order leaves every book untouched.
    pub fn execute(&mut self, order: Order) -> Result<MatchResult, EngineError> {
        let sequence = order.sequence_number;
        let outcome = match self.books.get_mut(&order.symbol) {
            Some(book) => execute_on_book(book, order),
            None => Err(EngineError::UnknownSymbol(order.symbol)),
        };

        match &outcome {
            Ok(result) => {
                self.orders_processed += 1;
                self.fills_emitted += result.fill_count() as u64;
            }
            Err(err) => {
                self.orders_rejected += 1;
                warn!(sequence, error = %err, "order rejected");
            }
        }
        outcome
    }

    /// [`execute`](Self::execute), then forward the fills to `sink`.
    ///
    /// Sink failures surface after the book is already updated.
    pub fn execute_into<S: ExecutionSink + ?Sized>(
        &mut self,
        order: Order,
        sink: &mut S,
    ) -> anyhow::Result<MatchResult> {
        let result = self.execute(order)?;
        result.publish(sink)?;
        Ok(result)
    }

    /// Remove a resting order (downstream cancel)
    pub fn cancel(&mut self, symbol: &str, sequence: u64) -> Result<Option<Order>, EngineError> {
        let book = self
            .books
            .get_mut(symbol)
            .ok_or_else(|| EngineError::UnknownSymbol(symbol.to_string()))?;
        Ok(book.cancel(sequence))
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn book(&self, symbol: &str) -> Option<&OrderBook> {
        self.books.get(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.books.keys().map(String::as_str)
    }

    pub fn is_known(&self, symbol: &str) -> bool {
        self.books.contains_key(symbol)
    }

    pub fn book_snapshot(&self, symbol: &str) -> Option<BookSnapshot> {
        self.books.get(symbol).map(OrderBook::snapshot)
    }

    /// Every book, best-first per side
    pub fn snapshot(&self) -> MarketSnapshot {
        self.books
            .iter()
            .map(|(symbol, book)| (symbol.clone(), book.snapshot()))
            .collect()
    }

    /// Digest over every book's state root, in symbol order
    pub fn state_root(&self) -> [u8; 32] {
        let roots: Vec<u8> = self
            .books
            .values()
            .flat_map(|book| book.compute_state_root())
            .collect();
        ExecutionReceipt::compute_hash(&roots)
    }

    pub fn receipt(&self, batch_id: u64) -> ExecutionReceipt {
        ExecutionReceipt::new(
            batch_id,
            self.orders_processed,
            self.fills_emitted,
            self.orders_rejected,
            self.state_root(),
        )
    }

    pub fn orders_processed(&self) -> u64 {
        self.orders_processed
    }

    pub fn orders_rejected(&self) -> u64 {
        self.orders_rejected
    }

    pub fn fills_emitted(&self) -> u64 {
        self.fills_emitted
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
