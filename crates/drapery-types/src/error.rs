//! Error types for the Drapery simulator.
//!
//! All crates return `DraperyResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Drapery simulator.
#[derive(Debug, Error)]
pub enum DraperyError {
    /// Grid dimensions cannot produce a valid cloth.
    #[error("Invalid topology: {segments_x}x{segments_y} segments (both must be >= 1)")]
    InvalidTopology {
        segments_x: usize,
        segments_y: usize,
    },

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Mesh data is malformed or does not match the cloth.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// `step` was called with a simulated time earlier than the last one.
    #[error("Simulated time went backwards: {now} ms after {previous} ms")]
    NonMonotonicTime {
        previous: f64,
        now: f64,
    },

    /// A snapshot was taken from a cloth with a different particle count.
    #[error("Snapshot has {found} particles, simulation has {expected}")]
    SnapshotMismatch {
        expected: usize,
        found: usize,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, DraperyError>`.
pub type DraperyResult<T> = Result<T, DraperyError>;
