//! Execution sinks: where fills go once a match step has completed.
//!
//! Delivery is decoupled from matching. The engine finishes every book
//! mutation before a single fill is handed to a sink, so a failing sink
//! can lose notifications but never corrupt a book. Sinks must keep fills
//! in the order they receive them.

use std::io::Write;

use crossbeam_channel::Sender;

use crate::error::SinkError;
use crate::types::Fill;

/// Downstream consumer of fills (market data, queues, dashboards).
pub trait ExecutionSink {
    fn publish(&mut self, fill: &Fill) -> Result<(), SinkError>;

    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Collects fills in memory.
#[derive(Debug, Default, Clone)]
pub struct VecSink {
    pub fills: Vec<Fill>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExecutionSink for VecSink {
    fn publish(&mut self, fill: &Fill) -> Result<(), SinkError> {
        self.fills.push(fill.clone());
        Ok(())
    }
}

/// Writes one JSON fill record per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ExecutionSink for JsonLinesSink<W> {
    fn publish(&mut self, fill: &Fill) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, fill)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Fire-and-forget hand-off to another thread over a crossbeam channel.
///
/// A single channel preserves send order, so fills for a symbol arrive in
/// the order they were generated.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<Fill>,
}

impl ChannelSink {
    pub fn new(tx: Sender<Fill>) -> Self {
        Self { tx }
    }
}

impl ExecutionSink for ChannelSink {
    fn publish(&mut self, fill: &Fill) -> Result<(), SinkError> {
        self.tx
            .send(fill.clone())
            .map_err(|_| SinkError::Disconnected)
    }
}
