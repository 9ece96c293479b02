//! State snapshot serialization for replay and debugging.
//!
//! A snapshot holds everything needed to rebuild a
//! [`ClothSimulation`] and continue it bit-for-bit: the configuration,
//! both position buffers, pin flags, and release progress.

use std::fs;
use std::path::Path;

use drapery_math::Vec3;
use drapery_solver::{ClothConfig, ClothSimulation, ReleaseState};
use drapery_types::{DraperyError, DraperyResult};
use serde::{Deserialize, Serialize};

/// Bumped whenever the snapshot layout changes.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A complete simulation state snapshot, serialized with `bincode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub version: u32,
    /// Frames simulated when the snapshot was taken.
    pub frame: u64,
    /// Simulated time of the last step (ms).
    pub last_time_ms: Option<f64>,
    pub config: ClothConfig,
    /// Current positions, one `[x, y, z]` per particle.
    pub positions: Vec<[f32; 3]>,
    /// Previous-step positions, one `[x, y, z]` per particle.
    pub previous: Vec<[f32; 3]>,
    /// Pin flag per pin table entry.
    pub pinned: Vec<bool>,
    pub release: ReleaseState,
}

impl StateSnapshot {
    /// Captures the current state of `sim`.
    pub fn capture(sim: &ClothSimulation) -> Self {
        let to_arrays = |v: Vec<Vec3>| -> Vec<[f32; 3]> { v.iter().map(|p| p.to_array()).collect() };
        Self {
            version: SNAPSHOT_VERSION,
            frame: sim.frame(),
            last_time_ms: sim.last_time_ms(),
            config: sim.config().clone(),
            positions: to_arrays(sim.positions()),
            previous: to_arrays(sim.previous_positions()),
            pinned: sim.pins().table().entries().iter().map(|e| e.pinned).collect(),
            release: sim.pins().state(),
        }
    }

    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }

    /// Writes this snapshot's state into an existing simulation.
    ///
    /// The simulation must have the same particle count and pin table size.
    pub fn restore(&self, sim: &mut ClothSimulation) -> DraperyResult<()> {
        self.check_version()?;
        let positions: Vec<Vec3> = self.positions.iter().copied().map(Vec3::from_array).collect();
        let previous: Vec<Vec3> = self.previous.iter().copied().map(Vec3::from_array).collect();
        sim.restore_state(
            &positions,
            &previous,
            &self.pinned,
            self.release,
            self.frame,
            self.last_time_ms,
        )?;
        tracing::debug!(frame = self.frame, particles = positions.len(), "snapshot restored");
        Ok(())
    }

    /// Builds a fresh simulation from the stored config and restores into it.
    pub fn into_simulation(&self) -> DraperyResult<ClothSimulation> {
        let mut sim = ClothSimulation::new(self.config.clone())?;
        self.restore(&mut sim)?;
        Ok(sim)
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> DraperyResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| DraperyError::Serialization(e.to_string()))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> DraperyResult<Self> {
        let snapshot: Self = bincode::deserialize(data)
            .map_err(|e| DraperyError::Serialization(format!("snapshot decode failed: {e}")))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> DraperyResult<()> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> DraperyResult<Self> {
        Self::from_bytes(&fs::read(path)?)
    }

    fn check_version(&self) -> DraperyResult<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(DraperyError::Serialization(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                self.version
            )));
        }
        Ok(())
    }
}
