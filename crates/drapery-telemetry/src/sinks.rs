//! Pluggable event sinks.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::events::SimulationEvent;

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the simulation ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    fn name(&self) -> &str;
}

/// Shared handle to the events collected by a [`VecSink`].
pub type EventLog = Arc<Mutex<Vec<SimulationEvent>>>;

/// Collects events in memory for tests and inspection.
///
/// The sink is boxed once registered, so read the events back through
/// the [`EventLog`] returned by [`VecSink::log`].
pub struct VecSink {
    events: EventLog,
}

impl VecSink {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn log(&self) -> EventLog {
        Arc::clone(&self.events)
    }
}

impl Default for VecSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Logs events through `tracing`.
///
/// Frame begin/end land at `trace`, releases at `info`, the rest at `debug`.
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        use crate::events::EventKind;
        match &event.kind {
            EventKind::FrameBegin { .. } | EventKind::FrameEnd { .. } => {
                tracing::trace!(frame = event.frame, event = ?event.kind, "simulation_event");
            }
            EventKind::ReleaseTriggered { .. }
            | EventKind::PinReleased { .. }
            | EventKind::ReleaseComplete => {
                tracing::info!(frame = event.frame, event = ?event.kind, "simulation_event");
            }
            _ => {
                tracing::debug!(frame = event.frame, event = ?event.kind, "simulation_event");
            }
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

/// Writes one JSON object per event to any writer.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
    written: usize,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Events successfully written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn handle(&mut self, event: &SimulationEvent) {
        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(%err, "failed to encode telemetry event");
                return;
            }
        };
        match writeln!(self.writer, "{line}") {
            Ok(()) => self.written += 1,
            Err(err) => tracing::warn!(%err, "failed to write telemetry event"),
        }
    }

    fn finalize(&mut self) {
        if let Err(err) = self.writer.flush() {
            tracing::warn!(%err, "failed to flush telemetry sink");
        }
    }

    fn name(&self) -> &str {
        "json_lines_sink"
    }
}
