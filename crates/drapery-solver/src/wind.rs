//! Aerodynamic wind force.
//!
//! The wind vector drifts over time: its direction blends three sinusoids
//! of the simulated clock and its strength swings slowly around a base
//! value. Each triangle corner of the rendered surface then pushes its
//! particle along the vertex normal, scaled by how squarely the normal
//! faces the wind. Vertices facing away get a negative (pulling) force.

use drapery_math::Vec3;
use drapery_mesh::TriangleMesh;
use drapery_types::{DraperyError, DraperyResult};
use serde::{Deserialize, Serialize};

use crate::particle::Particle;

/// Wind parameters. Disabled by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    pub enabled: bool,
    /// Mean wind strength.
    pub base_strength: f32,
    /// Amplitude of the slow strength oscillation.
    pub strength_amplitude: f32,
    /// Period divisor of the strength oscillation (ms).
    pub strength_period_ms: f64,
    /// Period divisors of the x, y, z direction components (ms).
    pub direction_periods_ms: [f64; 3],
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_strength: 40.0,
            strength_amplitude: 20.0,
            strength_period_ms: 7000.0,
            direction_periods_ms: [2000.0, 3000.0, 1000.0],
        }
    }
}

impl WindConfig {
    pub fn validate(&self) -> DraperyResult<()> {
        let periods = std::iter::once(self.strength_period_ms).chain(self.direction_periods_ms);
        for period in periods {
            if !(period.is_finite() && period > 0.0) {
                return Err(DraperyError::InvalidConfig(format!(
                    "wind periods must be positive, got {period}"
                )));
            }
        }
        if !self.base_strength.is_finite() || !self.strength_amplitude.is_finite() {
            return Err(DraperyError::InvalidConfig(
                "wind strength must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Computes and applies the wind force.
#[derive(Debug, Clone, PartialEq)]
pub struct WindField {
    config: WindConfig,
}

impl WindField {
    pub fn new(config: WindConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &WindConfig {
        &self.config
    }

    /// Wind vector at simulated time `now_ms`.
    ///
    /// `strength = cos(now / strength_period) * amplitude + base`,
    /// `direction = normalize(sin(now / px), cos(now / py), sin(now / pz))`.
    pub fn at(&self, now_ms: f64) -> Vec3 {
        let c = &self.config;
        let strength = (now_ms / c.strength_period_ms).cos() as f32 * c.strength_amplitude
            + c.base_strength;
        let [px, py, pz] = c.direction_periods_ms;
        let direction = Vec3::new(
            (now_ms / px).sin() as f32,
            (now_ms / py).cos() as f32,
            (now_ms / pz).sin() as f32,
        )
        .normalize_or_zero();
        direction * strength
    }

    /// Adds `normalize(n) * dot(n, wind)` to the particle behind every
    /// triangle corner of `mesh`. Vertex `i` of the mesh is particle `i`.
    pub fn apply(&self, wind: Vec3, mesh: &TriangleMesh, particles: &mut [Particle]) -> DraperyResult<()> {
        if mesh.vertex_count() != particles.len() {
            return Err(DraperyError::InvalidMesh(format!(
                "mesh has {} vertices, cloth has {} particles",
                mesh.vertex_count(),
                particles.len()
            )));
        }
        for &corner in &mesh.indices {
            let i = corner as usize;
            let normal = mesh.normal_vec3(i);
            let force = normal.normalize_or_zero() * normal.dot(wind);
            particles[i].add_force(force);
        }
        Ok(())
    }
}
