//! Fixed-step damped Verlet integration.

use crate::config::ClothConfig;
use crate::particle::Particle;

/// Advances particles by one fixed timestep.
///
/// The step size is a constant of the simulation, not the time elapsed
/// since the previous frame: every `step` advances exactly `timestep`
/// seconds regardless of how often the host calls it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    timestep: f32,
    timestep_sq: f32,
    drag: f32,
}

impl Integrator {
    /// `damping` is the fraction of implicit velocity removed per step;
    /// the Verlet drag factor is `1 - damping`.
    pub fn new(timestep: f32, damping: f32) -> Self {
        Self {
            timestep,
            timestep_sq: timestep * timestep,
            drag: 1.0 - damping,
        }
    }

    pub fn from_config(config: &ClothConfig) -> Self {
        Self::new(config.timestep, config.damping)
    }

    #[inline]
    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    #[inline]
    pub fn drag(&self) -> f32 {
        self.drag
    }

    /// Integrates every particle and clears its accumulated acceleration.
    pub fn step(&self, particles: &mut [Particle]) {
        for p in particles.iter_mut() {
            p.integrate(self.timestep_sq, self.drag);
        }
    }
}
