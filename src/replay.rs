//! Replay of a raw order stream through the engine.
//!
//! Each non-blank input line is one client order record. Lines that fail
//! admission are logged and skipped without consuming a sequence number.
//! Admitted orders are sequenced, executed, their fills written to the
//! output as JSON lines, and the touched book republished to the replica.

use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::warn;

use crate::admission::admit;
use crate::engine::{MatchingEngine, SequenceAssigner};
use crate::replica::SnapshotReplica;
use crate::sink::{ExecutionSink, JsonLinesSink};

/// Counters for one replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayStats {
    pub admitted: u64,
    pub not_admitted: u64,
    pub executed: u64,
    pub engine_rejects: u64,
    pub fills: u64,
}

/// Feed every record in `input` through `engine`, writing fills to `output`.
pub fn replay<R: BufRead, W: Write>(
    input: R,
    output: W,
    engine: &mut MatchingEngine,
    sequencer: &SequenceAssigner,
    replica: &mut SnapshotReplica,
) -> anyhow::Result<ReplayStats> {
    let mut sink = JsonLinesSink::new(output);
    let mut stats = ReplayStats::default();

    for (line_no, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let admitted = match admit(&line) {
            Ok(admitted) => admitted,
            Err(err) => {
                stats.not_admitted += 1;
                warn!(line = line_no + 1, error = %err, "order not admitted");
                continue;
            }
        };
        stats.admitted += 1;

        let order = admitted.sequence(sequencer.get_next()?);
        let symbol = order.symbol.clone();
        // Engine rejects are logged by the engine
        let Ok(result) = engine.execute(order) else {
            stats.engine_rejects += 1;
            continue;
        };
        stats.executed += 1;
        stats.fills += result.fill_count() as u64;
        result.publish(&mut sink)?;

        if let Some(book) = engine.book(&symbol) {
            replica.publish_book(book)?;
        }
    }

    sink.flush()?;
    Ok(stats)
}
