//! Thread-safe engine with one lock per symbol.
//!
//! Mutations of one book are serialized by that book's mutex; books for
//! different symbols share nothing and can be matched in parallel. A match
//! step never blocks on I/O while holding a lock.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, MutexGuard};
use tracing::warn;

use crate::config::{validate_symbols, EngineConfig};
use crate::engine::matcher::{execute_on_book, MatchResult};
use crate::engine::SequenceAssigner;
use crate::error::{ConfigError, EngineError};
use crate::orderbook::{MarketSnapshot, OrderBook};
use crate::types::{Order, Side};

/// Shareable (`&self`) counterpart of [`crate::engine::MatchingEngine`].
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use exchange_engine::engine::SharedEngine;
/// use exchange_engine::types::Side;
///
/// let engine = Arc::new(SharedEngine::new(["AAPL", "MSFT"]).unwrap());
///
/// let handles: Vec<_> = ["AAPL", "MSFT"]
///     .into_iter()
///     .map(|symbol| {
///         let engine = Arc::clone(&engine);
///         thread::spawn(move || {
///             engine.submit(symbol, Side::Bid, 10_000_000_000, 1).unwrap();
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(engine.orders_processed(), 2);
/// ```
#[derive(Debug)]
pub struct SharedEngine {
    books: BTreeMap<String, Mutex<OrderBook>>,
    sequencer: SequenceAssigner,
    orders_processed: AtomicU64,
    orders_rejected: AtomicU64,
    fills_emitted: AtomicU64,
}

impl SharedEngine {
    pub fn new<I, S>(symbols: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_sequencer(symbols, 0, SequenceAssigner::new())
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        Self::with_sequencer(
            config.symbols.iter().cloned(),
            config.order_capacity,
            SequenceAssigner::new(),
        )
    }

    pub fn with_sequencer<I, S>(
        symbols: I,
        order_capacity: usize,
        sequencer: SequenceAssigner,
    ) -> Result<Self, ConfigError>
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
                (symbol, Mutex::new(book))
            })
            .collect();

        Ok(Self {
            books,
            sequencer,
            orders_processed: AtomicU64::new(0),
            orders_rejected: AtomicU64::new(0),
            fills_emitted: AtomicU64::new(0),
        })
    }

    fn lock(&self, symbol: &str) -> Result<MutexGuard<'_, OrderBook>, EngineError> {
        self.books
            .get(symbol)
            .map(|book| book.lock())
            .ok_or_else(|| EngineError::UnknownSymbol(symbol.to_string()))
    }

    fn record(&self, sequence: u64, outcome: &Result<MatchResult, EngineError>) {
        match outcome {
            Ok(result) => {
                self.orders_processed.fetch_add(1, Ordering::Relaxed);
                self.fills_emitted
                    .fetch_add(result.fill_count() as u64, Ordering::Relaxed);
            }
            Err(err) => {
                self.orders_rejected.fetch_add(1, Ordering::Relaxed);
                warn!(sequence, error = %err, "order rejected");
            }
        }
    }

    /// Match an already-sequenced order under its book's lock
    pub fn execute(&self, order: Order) -> Result<MatchResult, EngineError> {
        let sequence = order.sequence_number;
        let outcome = self
            .lock(&order.symbol)
            .and_then(|mut book| execute_on_book(&mut book, order));
        self.record(sequence, &outcome);
        outcome
    }

    /// Sequence and match a new order in one step.
    ///
    /// The sequence number is drawn while the book's lock is held, so
    /// arrival order within a symbol always equals sequence order.
    pub fn submit(
        &self,
        symbol: &str,
        side: Side,
        price: u64,
        quantity: u64,
    ) -> Result<(u64, MatchResult), EngineError> {
        let mut book = match self.lock(symbol) {
            Ok(book) => book,
            Err(err) => {
                self.record(0, &Err(err.clone()));
                return Err(err);
            }
        };
        let sequence = match self.sequencer.get_next() {
            Ok(sequence) => sequence,
            Err(err) => {
                self.record(0, &Err(err.clone()));
                return Err(err);
            }
        };
        let outcome = execute_on_book(&mut book, Order::new(symbol, side, price, quantity, sequence));
        drop(book);

        self.record(sequence, &outcome);
        outcome.map(|result| (sequence, result))
    }

    pub fn cancel(&self, symbol: &str, sequence: u64) -> Result<Option<Order>, EngineError> {
        Ok(self.lock(symbol)?.cancel(sequence))
    }

    /// Run `f` against one book while holding its lock
    pub fn with_book<R>(&self, symbol: &str, f: impl FnOnce(&OrderBook) -> R) -> Result<R, EngineError> {
        let book = self.lock(symbol)?;
        Ok(f(&book))
    }

    /// Snapshot every book, locking one at a time
    pub fn snapshot(&self) -> Result<MarketSnapshot, EngineError> {
        self.books
            .keys()
            .map(|symbol| Ok((symbol.clone(), self.lock(symbol)?.snapshot())))
            .collect()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.books.keys().map(String::as_str)
    }

    pub fn sequencer(&self) -> &SequenceAssigner {
        &self.sequencer
    }

    pub fn orders_processed(&self) -> u64 {
        self.orders_processed.load(Ordering::Relaxed)
    }

    pub fn orders_rejected(&self) -> u64 {
        self.orders_rejected.load(Ordering::Relaxed)
    }

    pub fn fills_emitted(&self) -> u64 {
        self.fills_emitted.load(Ordering::Relaxed)
    }
}
