//! Property tests for price-time priority matching.
//!
//! ```bash
//! cargo test --test matching_properties
//! ```

use std::collections::HashMap;

use proptest::prelude::*;

use exchange_engine::types::price::SCALE;
use exchange_engine::{EngineError, MatchingEngine, Order, SequenceAssigner, Side};

const SYMBOLS: [&str; 2] = ["AAPL", "MSFT"];

/// (symbol index, side, price in whole units, quantity)
type Draw = (usize, Side, u64, u64);

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Bid), Just(Side::Ask)]
}

fn flow_strategy() -> impl Strategy<Value = Vec<Draw>> {
    prop::collection::vec(
        (0..SYMBOLS.len(), side_strategy(), 95u64..=105, 1u64..=20),
        1..200,
    )
}

fn to_orders(flow: &[Draw]) -> Vec<Order> {
    let sequencer = SequenceAssigner::new();
    flow.iter()
        .map(|&(symbol, side, price, quantity)| {
            Order::new(
                SYMBOLS[symbol],
                side,
                price * SCALE,
                quantity,
                sequencer.get_next().unwrap(),
            )
        })
        .collect()
}

fn engine() -> MatchingEngine {
    MatchingEngine::new(SYMBOLS).unwrap()
}

proptest! {
    #[test]
    fn quantity_is_conserved_per_symbol(flow in flow_strategy()) {
        let mut engine = engine();
        let mut submitted: HashMap<String, u64> = HashMap::new();
        let mut matched: HashMap<String, u64> = HashMap::new();

        for order in to_orders(&flow) {
            let symbol = order.symbol.clone();
            *submitted.entry(symbol.clone()).or_default() += order.quantity;
            let result = engine.execute(order).unwrap();
            *matched.entry(symbol).or_default() += result.matched_quantity();
        }

        for symbol in SYMBOLS {
            let resting = engine.book(symbol).unwrap().resting_quantity();
            let submitted = submitted.get(symbol).copied().unwrap_or(0);
            let matched = matched.get(symbol).copied().unwrap_or(0);
            // Every match takes its quantity from both the aggressor and a resting order
            prop_assert_eq!(resting + 2 * u128::from(matched), u128::from(submitted));
        }
    }

    #[test]
    fn book_is_never_crossed(flow in flow_strategy()) {
        let mut engine = engine();
        for order in to_orders(&flow) {
            let symbol = order.symbol.clone();
            engine.execute(order).unwrap();

            let book = engine.book(&symbol).unwrap();
            if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
                prop_assert!(bid < ask, "crossed: bid {} ask {}", bid, ask);
            }
        }
    }

    #[test]
    fn fills_follow_price_time_priority(flow in flow_strategy()) {
        let mut engine = engine();
        for order in to_orders(&flow) {
            let aggressor = order.clone();
            let result = engine.execute(order).unwrap();

            prop_assert_eq!(result.ask_fills.len(), result.bid_fills.len());
            for (ask, bid) in result.ask_fills.iter().zip(&result.bid_fills) {
                prop_assert_eq!(ask.sequence_number, bid.sequence_number);
                prop_assert_eq!(ask.price, bid.price);
                prop_assert_eq!(ask.quantity, bid.quantity);
                prop_assert!(aggressor.side.crosses(aggressor.price, ask.price));
                // Resting orders were all sequenced before the aggressor
                prop_assert!(ask.sequence_number < aggressor.sequence_number);
            }

            for pair in result.ask_fills.windows(2) {
                let (first, second) = (&pair[0], &pair[1]);
                match aggressor.side {
                    Side::Bid => prop_assert!(first.price <= second.price),
                    Side::Ask => prop_assert!(first.price >= second.price),
                }
                if first.price == second.price {
                    prop_assert!(first.sequence_number < second.sequence_number);
                }
            }
        }
    }

    #[test]
    fn snapshot_is_idempotent(flow in flow_strategy()) {
        let mut engine = engine();
        for order in to_orders(&flow) {
            engine.execute(order).unwrap();
        }

        let first = engine.snapshot();
        let root = engine.state_root();
        prop_assert_eq!(&first, &engine.snapshot());
        prop_assert_eq!(root, engine.state_root());

        for book in first.values() {
            for level in book.bids.windows(2) {
                prop_assert!(level[0].price >= level[1].price);
            }
            for level in book.asks.windows(2) {
                prop_assert!(level[0].price <= level[1].price);
            }
        }
    }

    #[test]
    fn same_flow_same_state(flow in flow_strategy()) {
        let mut a = engine();
        let mut b = engine();
        for order in to_orders(&flow) {
            let left = a.execute(order.clone()).unwrap();
            let right = b.execute(order).unwrap();
            prop_assert_eq!(left, right);
        }
        prop_assert_eq!(a.state_root(), b.state_root());
    }

    #[test]
    fn unknown_symbol_never_mutates(flow in flow_strategy(), side in side_strategy()) {
        let mut engine = engine();
        let orders = to_orders(&flow);
        let next = orders.len() as u64 + 1;
        for order in orders {
            engine.execute(order).unwrap();
        }

        let before = engine.snapshot();
        let root = engine.state_root();
        let err = engine
            .execute(Order::new("TSLA", side, 100 * SCALE, 5, next))
            .unwrap_err();

        prop_assert_eq!(err, EngineError::UnknownSymbol("TSLA".to_string()));
        prop_assert_eq!(before, engine.snapshot());
        prop_assert_eq!(root, engine.state_root());
    }
}

// ============================================================================
// Worked examples
// ============================================================================

fn price(units: u64) -> u64 {
    units * SCALE
}

#[test]
fn partial_fill_leaves_bid_remainder() {
    let mut engine = engine();
    engine
        .execute(Order::new("AAPL", Side::Ask, price(100), 6, 1))
        .unwrap();

    let result = engine
        .execute(Order::new("AAPL", Side::Bid, price(105), 10, 5))
        .unwrap();

    assert_eq!(result.ask_fills.len(), 1);
    assert_eq!(result.ask_fills[0].quantity, 6);
    assert_eq!(result.ask_fills[0].price, price(100));
    assert_eq!(result.ask_fills[0].sequence_number, 1);

    let book = engine.book("AAPL").unwrap();
    assert!(book.asks().is_empty());
    let bid = book.bids().peek_best().unwrap();
    assert_eq!((bid.price, bid.quantity, bid.sequence_number), (price(105), 4, 5));
}

#[test]
fn sweep_across_two_levels() {
    let mut engine = engine();
    engine
        .execute(Order::new("AAPL", Side::Ask, price(100), 5, 1))
        .unwrap();
    engine
        .execute(Order::new("AAPL", Side::Ask, price(105), 10, 2))
        .unwrap();

    let result = engine
        .execute(Order::new("AAPL", Side::Bid, price(110), 15, 9))
        .unwrap();

    let traded: Vec<(u64, u64)> = result
        .ask_fills
        .iter()
        .map(|fill| (fill.quantity, fill.price))
        .collect();
    assert_eq!(traded, vec![(5, price(100)), (10, price(105))]);
    assert!(result.fully_filled());
    assert!(engine.book("AAPL").unwrap().is_empty());
}

#[test]
fn non_crossing_ask_rests() {
    let mut engine = engine();
    engine
        .execute(Order::new("AAPL", Side::Bid, price(100), 5, 1))
        .unwrap();

    let result = engine
        .execute(Order::new("AAPL", Side::Ask, price(120), 5, 3))
        .unwrap();

    assert_eq!(result.fill_count(), 0);
    assert!(result.rested);
    let ask = engine.book("AAPL").unwrap().asks().peek_best().unwrap();
    assert_eq!((ask.price, ask.quantity, ask.sequence_number), (price(120), 5, 3));
}

#[test]
fn earlier_order_at_same_price_fills_first() {
    let mut engine = engine();
    // Later sequence arrives first; the book still orders by sequence
    engine
        .execute(Order::new("AAPL", Side::Ask, price(100), 5, 7))
        .unwrap();
    engine
        .execute(Order::new("AAPL", Side::Ask, price(100), 5, 4))
        .unwrap();

    let result = engine
        .execute(Order::new("AAPL", Side::Bid, price(100), 5, 8))
        .unwrap();

    assert_eq!(result.ask_fills[0].sequence_number, 4);
    assert!(engine.book("AAPL").unwrap().contains(7));
}

#[test]
fn sequence_assigner_is_strictly_increasing() {
    let sequencer = SequenceAssigner::new();
    let mut last = 0;
    for _ in 0..10_000 {
        let next = sequencer.get_next().unwrap();
        assert!(next > last);
        last = next;
    }
}
