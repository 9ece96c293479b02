//! Simulation configuration.
//!
//! All values are fixed when a [`ClothSimulation`](crate::ClothSimulation)
//! is constructed. The struct is serde-enabled so the CLI can read it from
//! TOML; missing keys fall back to the defaults below.

use drapery_mesh::Plane;
use drapery_types::constants;
use drapery_types::{DraperyError, DraperyResult};
use serde::{Deserialize, Serialize};

use crate::cloth::GridParams;
use crate::pins::PinLayout;
use crate::wind::WindConfig;

/// Configuration for a cloth simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
    /// Segments along X (particle columns = segments_x + 1).
    pub segments_x: usize,

    /// Segments along Y (particle rows = segments_y + 1).
    pub segments_y: usize,

    /// Structural spacing; also the rest length of every constraint.
    pub rest_distance: f32,

    /// Mass of every particle.
    pub particle_mass: f32,

    /// Fraction of implicit velocity lost per step (0.0 = none).
    pub damping: f32,

    /// Gravity acceleration vector [gx, gy, gz].
    pub gravity: [f32; 3],

    /// Fixed integration step (seconds).
    pub timestep: f32,

    /// Delay between consecutive pin releases (ms of simulated time).
    pub release_interval_ms: f64,

    /// Which top-edge columns start pinned.
    pub pin_layout: PinLayout,

    pub wind: WindConfig,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            segments_x: constants::DEFAULT_SEGMENTS_X,
            segments_y: constants::DEFAULT_SEGMENTS_Y,
            rest_distance: constants::DEFAULT_REST_DISTANCE,
            particle_mass: constants::DEFAULT_PARTICLE_MASS,
            damping: constants::DEFAULT_DAMPING,
            gravity: [0.0, -constants::GRAVITY, 0.0],
            timestep: constants::DEFAULT_TIMESTEP,
            release_interval_ms: constants::DEFAULT_RELEASE_INTERVAL_MS,
            pin_layout: PinLayout::TopRow,
            wind: WindConfig::default(),
        }
    }
}

impl ClothConfig {
    /// A small cloth for quick runs and tests.
    pub fn preview() -> Self {
        Self {
            segments_x: 10,
            segments_y: 5,
            ..Default::default()
        }
    }

    /// Same as the default cloth with wind switched on.
    pub fn windy() -> Self {
        let mut config = Self::default();
        config.wind.enabled = true;
        config
    }

    pub fn grid_params(&self) -> GridParams {
        GridParams {
            segments_x: self.segments_x,
            segments_y: self.segments_y,
            particle_mass: self.particle_mass,
            rest_distance: self.rest_distance,
        }
    }

    /// The flat sheet the cloth rests on, sized to `rest_distance` cells.
    pub fn plane(&self) -> Plane {
        Plane::from_segments(self.segments_x, self.segments_y, self.rest_distance)
    }

    pub fn validate(&self) -> DraperyResult<()> {
        self.grid_params().validate()?;

        if !(0.0..=1.0).contains(&self.damping) {
            return Err(DraperyError::InvalidConfig(format!(
                "damping must be in [0, 1], got {}",
                self.damping
            )));
        }
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(DraperyError::InvalidConfig(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(DraperyError::InvalidConfig(
                "gravity components must be finite".into(),
            ));
        }
        if !(self.release_interval_ms.is_finite() && self.release_interval_ms >= 0.0) {
            return Err(DraperyError::InvalidConfig(format!(
                "release interval must be non-negative, got {}",
                self.release_interval_ms
            )));
        }
        self.pin_layout.columns(self.segments_x)?;
        self.wind.validate()?;
        Ok(())
    }
}
