//! # drapery-debug
//!
//! Inspection hooks and state snapshots for debugging simulation issues.
//! Snapshots serialize the full simulation state to binary so a run can
//! be resumed or replayed from any frame.

pub mod hooks;
pub mod snapshot;

pub use hooks::{InspectionHook, TelemetryHook};
pub use snapshot::StateSnapshot;
