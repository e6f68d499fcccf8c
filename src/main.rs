//! Exchange Engine - Binary Entry Point
//!
//! Replays a file of raw client orders (one JSON object per line) through
//! the matching engine:
//!
//! ```text
//! exchange-engine [--config PATH] ORDERS.jsonl
//! ```
//!
//! Fills stream to stdout as JSON lines. Logs go to stderr and honour
//! `RUST_LOG`, falling back to the configured filter. After the last order
//! the final market snapshot and execution receipt are printed as one JSON
//! document.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use exchange_engine::replay::replay;
use exchange_engine::replica::SnapshotReplica;
use exchange_engine::{EngineConfig, MatchingEngine, SequenceAssigner};

/// Replay raw client orders through the matching engine
#[derive(Debug, Parser)]
#[command(name = "exchange-engine", version)]
struct Args {
    /// Engine configuration file (JSON); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Raw orders, one JSON object per line
    orders: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!(symbols = ?config.symbols, "starting exchange engine");

    let mut engine = MatchingEngine::from_config(&config)?;
    let sequencer = SequenceAssigner::new();
    let mut replica = SnapshotReplica::new();
    replica.publish_all(&engine)?;

    let file = File::open(&args.orders)
        .with_context(|| format!("opening {}", args.orders.display()))?;
    let stats = replay(
        BufReader::new(file),
        io::stdout().lock(),
        &mut engine,
        &sequencer,
        &mut replica,
    )?;

    let receipt = engine.receipt(1);
    info!(
        processed = receipt.orders_processed,
        rejected = receipt.orders_rejected,
        not_admitted = stats.not_admitted,
        fills = receipt.fills_emitted,
        root = %receipt.state_root_hex(),
        replica_current = replica.is_current(&engine),
        "replay complete"
    );

    let summary = serde_json::json!({
        "snapshot": engine.snapshot(),
        "receipt": receipt,
        "replay": stats,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
