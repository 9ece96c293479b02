//! Simulation event types.
//!
//! Structured events emitted once or more per frame. Events are small
//! value types carrying just enough data for monitoring and debugging.

use drapery_types::PinId;
use serde::{Deserialize, Serialize};

/// A simulation event, tagged with the frame it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Frame number (0-indexed).
    pub frame: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Frame started.
    FrameBegin {
        /// Simulated time passed to `step` (ms).
        now_ms: f64,
    },

    /// Frame completed.
    FrameEnd {
        /// Wall-clock time for the step (seconds).
        wall_time: f64,
        /// Particles held at rest by pins this frame.
        clamped: usize,
        /// Constraints skipped because their endpoints coincided.
        degenerate: usize,
    },

    /// The pin release sequence was started.
    ReleaseTriggered {
        now_ms: f64,
        /// Pin entries still holding when the sequence began.
        pinned: usize,
    },

    /// One pin entry let go.
    PinReleased {
        pin: PinId,
        /// Pin entries still holding afterwards.
        remaining: usize,
    },

    /// The last pin entry was released.
    ReleaseComplete,

    /// Wind vector applied this frame.
    Wind {
        direction: [f32; 3],
        strength: f32,
    },

    /// Energy snapshot at the end of the frame.
    Energy {
        /// Kinetic energy (0.5 * m * v^2).
        kinetic: f64,
        /// Largest distance of any particle from rest.
        max_displacement: f32,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given frame.
    pub fn new(frame: u64, kind: EventKind) -> Self {
        Self { frame, kind }
    }

    /// Short, stable name of the event kind.
    pub fn label(&self) -> &str {
        match &self.kind {
            EventKind::FrameBegin { .. } => "frame_begin",
            EventKind::FrameEnd { .. } => "frame_end",
            EventKind::ReleaseTriggered { .. } => "release_triggered",
            EventKind::PinReleased { .. } => "pin_released",
            EventKind::ReleaseComplete => "release_complete",
            EventKind::Wind { .. } => "wind",
            EventKind::Energy { .. } => "energy",
            EventKind::Custom { label, .. } => label.as_str(),
        }
    }
}
