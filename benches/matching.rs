//! Benchmarks for the exchange matching engine.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- single_match
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use std::time::Duration;

use exchange_engine::types::price::SCALE;
use exchange_engine::{MatchingEngine, Order, OrderBook, Side};

const SYMBOL: &str = "AAPL";

/// 100.00
const BASE_PRICE: u64 = 100 * SCALE;

/// One cent
const TICK: u64 = SCALE / 100;

// ============================================================================
// HELPER FUNCTIONS - Deterministic order generation
// ============================================================================

fn make_order(side: Side, sequence: u64, price: u64, quantity: u64) -> Order {
    Order::new(SYMBOL, side, price, quantity, sequence)
}

/// Rest `count` asks one tick apart starting at `base_price`.
/// Sequence numbers start at `first_sequence`.
fn populate_asks(book: &mut OrderBook, count: usize, first_sequence: u64, base_price: u64, quantity: u64) {
    for i in 0..count as u64 {
        let order = make_order(Side::Ask, first_sequence + i, base_price + i * TICK, quantity);
        book.rest_order(order).unwrap();
    }
}

/// Rest `count` bids one tick apart going down from `base_price`.
fn populate_bids(book: &mut OrderBook, count: usize, first_sequence: u64, base_price: u64, quantity: u64) {
    for i in 0..count as u64 {
        let order = make_order(Side::Bid, first_sequence + i, base_price - i * TICK, quantity);
        book.rest_order(order).unwrap();
    }
}

fn engine_with_asks(count: usize, quantity: u64) -> MatchingEngine {
    let mut engine = MatchingEngine::with_capacity([SYMBOL], count * 2).unwrap();
    for i in 0..count as u64 {
        engine
            .execute(make_order(Side::Ask, i + 1, BASE_PRICE + i * TICK, quantity))
            .unwrap();
    }
    engine
}

/// Deterministic random flow around `BASE_PRICE`.
fn generate_order_batch(count: usize, seed: u64) -> Vec<Order> {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (1..=count as u64)
        .map(|sequence| {
            let side = if rng.gen_bool(0.5) { Side::Bid } else { Side::Ask };
            let offset: i64 = rng.gen_range(-500..=500);
            let price = (BASE_PRICE as i64 + offset * TICK as i64) as u64;
            make_order(side, sequence, price, rng.gen_range(1..=100))
        })
        .collect()
}

// ============================================================================
// BENCHMARK: Single Match Latency
// ============================================================================

fn bench_single_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_match");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("against_1k_orders", |b| {
        b.iter_batched(
            || engine_with_asks(1_000, 100),
            |mut engine| black_box(engine.execute(make_order(Side::Bid, 1_000_000, BASE_PRICE, 100))),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("multi_level_sweep", |b| {
        b.iter_batched(
            || engine_with_asks(100, 10),
            // Sweeps ten levels
            |mut engine| {
                black_box(engine.execute(make_order(Side::Bid, 1_000_000, BASE_PRICE + 10 * TICK, 100)))
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("no_match_rest_on_book", |b| {
        b.iter_batched(
            || engine_with_asks(1_000, 100),
            |mut engine| black_box(engine.execute(make_order(Side::Bid, 1_000_000, BASE_PRICE - TICK, 100))),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Book Operations
// ============================================================================

fn bench_book_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("book_operations");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("rest_on_empty", |b| {
        b.iter_batched(
            || OrderBook::new(SYMBOL),
            |mut book| black_box(book.rest_order(make_order(Side::Bid, 1, BASE_PRICE, 100))),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("rest_on_1k_book", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(SYMBOL, 2_000);
                populate_asks(&mut book, 500, 1, BASE_PRICE, 100);
                populate_bids(&mut book, 500, 501, BASE_PRICE - TICK, 100);
                book
            },
            |mut book| black_box(book.rest_order(make_order(Side::Bid, 5_000, BASE_PRICE - 200 * TICK, 100))),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("cancel_mid_book", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::with_capacity(SYMBOL, 2_000);
                populate_bids(&mut book, 1_000, 1, BASE_PRICE, 100);
                book
            },
            |mut book| black_box(book.cancel(500)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("state_root_1k_book", |b| {
        let mut book = OrderBook::with_capacity(SYMBOL, 2_000);
        populate_asks(&mut book, 500, 1, BASE_PRICE, 100);
        populate_bids(&mut book, 500, 501, BASE_PRICE - TICK, 100);
        b.iter(|| black_box(book.compute_state_root()));
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Throughput
// ============================================================================

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(50);

    for batch_size in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(batch_size as u64));
        group.bench_with_input(BenchmarkId::new("orders", batch_size), &batch_size, |b, &size| {
            let orders = generate_order_batch(size, 42);
            b.iter_batched(
                || {
                    let engine = MatchingEngine::with_capacity([SYMBOL], size).unwrap();
                    (engine, orders.clone())
                },
                |(mut engine, orders)| {
                    for order in orders {
                        black_box(engine.execute(order).ok());
                    }
                    engine.fills_emitted()
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Large Book
// ============================================================================

fn bench_large_book(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_book");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    group.bench_function("match_in_100k_book", |b| {
        let mut engine = MatchingEngine::with_capacity([SYMBOL], 120_000).unwrap();
        for i in 0..50_000u64 {
            engine
                .execute(make_order(Side::Ask, i + 1, BASE_PRICE + i * TICK, 10))
                .unwrap();
            engine
                .execute(make_order(Side::Bid, 50_001 + i, BASE_PRICE - (i + 1) * TICK, 10))
                .unwrap();
        }
        let mut sequence = 100_000u64;

        // Take out the best ask, then replace it so the book stays the same size
        b.iter(|| {
            sequence += 2;
            let result = engine.execute(make_order(Side::Bid, sequence, BASE_PRICE, 10));
            engine
                .execute(make_order(Side::Ask, sequence + 1, BASE_PRICE, 10))
                .ok();
            black_box(result)
        });
    });

    group.finish();
}

// ============================================================================
// CRITERION ENTRY POINT
// ============================================================================

criterion_group!(
    benches,
    bench_single_match,
    bench_book_operations,
    bench_throughput,
    bench_large_book
);

criterion_main!(benches);
