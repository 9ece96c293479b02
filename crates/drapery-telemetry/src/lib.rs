//! # drapery-telemetry
//!
//! Event bus for simulation telemetry. Emits structured events
//! (frame timing, pin releases, energy) that are consumed by
//! pluggable sinks (in-memory logs, `tracing`, JSON lines).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventLog, EventSink, JsonLinesSink, TracingSink, VecSink};
