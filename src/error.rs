//! Error taxonomy for the matching engine and its collaborators.
//!
//! Every rejection produced by the engine leaves book state untouched.
//! Transport-level failures never originate here: the engine has no
//! network dependency.

use thiserror::Error;

use crate::types::Side;

/// Errors raised by a single side of a book.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// Order was routed to the queue of the other side
    #[error("order {sequence} is a {actual:?} order, queue holds {expected:?}")]
    WrongSide {
        sequence: u64,
        expected: Side,
        actual: Side,
    },

    /// Order belongs to another symbol's book
    #[error("order {sequence} is for {actual:?}, book holds {expected:?}")]
    WrongSymbol {
        sequence: u64,
        expected: String,
        actual: String,
    },

    /// An order with this sequence number is already resting
    #[error("sequence number {0} is already resting in the book")]
    DuplicateSequence(u64),

    /// No resting order carries this sequence number
    #[error("no resting order with sequence number {0}")]
    NotFound(u64),

    /// Orders must rest with a positive quantity
    #[error("order {0} has zero quantity")]
    ZeroQuantity(u64),

    /// Orders must carry a positive price
    #[error("order {0} has zero price")]
    ZeroPrice(u64),
}

/// Errors returned by [`crate::engine::MatchingEngine::execute`] and friends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown symbol {0:?}")]
    UnknownSymbol(String),

    #[error("order {sequence} has non-positive price")]
    InvalidPrice { sequence: u64 },

    #[error("order {sequence} has non-positive quantity")]
    InvalidQuantity { sequence: u64 },

    #[error("sequence number {0} is already resting in the book")]
    DuplicateSequence(u64),

    #[error("sequence numbers exhausted")]
    SequenceExhausted,

    #[error(transparent)]
    Book(#[from] BookError),
}

/// Errors raised while admitting raw client orders.
#[derive(Debug, Error)]
pub enum AdmissionError {
    #[error("malformed order record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("field `{field}` is not numeric: {value:?}")]
    NotNumeric { field: &'static str, value: String },

    #[error("symbol {0:?} must be 4 to 5 characters")]
    SymbolLength(String),

    #[error("unknown order type {0:?}")]
    OrderType(String),

    #[error("unknown trader type {0:?}")]
    TraderType(String),

    #[error("price must be positive, got {0}")]
    Price(String),

    #[error("quantity must be a positive integer, got {0}")]
    Quantity(String),
}

/// Errors raised while forwarding fills downstream.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write fill: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode fill: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("execution sink receiver has been dropped")]
    Disconnected,
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("symbol universe is empty")]
    NoSymbols,

    #[error("blank symbol in universe")]
    BlankSymbol,

    #[error("symbol {0:?} is configured twice")]
    DuplicateSymbol(String),
}
