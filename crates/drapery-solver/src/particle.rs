//! Verlet particles.

use drapery_math::Vec3;
use drapery_types::{DraperyError, DraperyResult};

/// A point mass with implicit velocity.
///
/// Velocity is never stored; it is the difference between `position` and
/// `previous`. That lets the constraint solver and pin enforcement edit
/// `position` directly without reconciling a separate velocity field.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current simulated position.
    pub position: Vec3,
    /// Position one timestep ago.
    pub previous: Vec3,
    /// Accumulated acceleration for the current frame. Zeroed by `integrate`.
    pub acceleration: Vec3,
    rest: Vec3,
    mass: f32,
    inv_mass: f32,
}

impl Particle {
    /// Creates a particle at rest at `rest`.
    ///
    /// Fails if `mass` is not strictly positive and finite. Pinning is done
    /// procedurally by [`PinManager`](crate::PinManager), never through
    /// infinite mass.
    pub fn new(rest: Vec3, mass: f32) -> DraperyResult<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(DraperyError::InvalidConfig(format!(
                "particle mass must be positive and finite, got {mass}"
            )));
        }
        Ok(Self {
            position: rest,
            previous: rest,
            acceleration: Vec3::ZERO,
            rest,
            mass,
            inv_mass: 1.0 / mass,
        })
    }

    /// Position on the undeformed grid. Never changes.
    #[inline]
    pub fn rest_position(&self) -> Vec3 {
        self.rest
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Accumulates `force / mass` into this frame's acceleration.
    #[inline]
    pub fn add_force(&mut self, force: Vec3) {
        self.acceleration += force * self.inv_mass;
    }

    /// Damped Verlet step.
    ///
    /// `new = position + (position - previous) * drag + acceleration * timestep_sq`,
    /// then the history shifts and the accumulator resets.
    pub fn integrate(&mut self, timestep_sq: f32, drag: f32) {
        let displacement = (self.position - self.previous) * drag + self.acceleration * timestep_sq;
        let next = self.position + displacement;
        self.previous = self.position;
        self.position = next;
        self.acceleration = Vec3::ZERO;
    }

    /// Snaps the particle back onto its rest position.
    ///
    /// Only `position` is overwritten; `previous` keeps whatever history the
    /// integrator produced.
    #[inline]
    pub fn pin_to_rest(&mut self) {
        self.position = self.rest;
    }

    /// Per-step displacement (`position - previous`).
    #[inline]
    pub fn velocity_raw(&self) -> Vec3 {
        self.position - self.previous
    }

    /// Velocity estimate for a step of `timestep` seconds.
    pub fn velocity(&self, timestep: f32) -> Vec3 {
        if timestep <= 0.0 {
            return Vec3::ZERO;
        }
        self.velocity_raw() / timestep
    }

    /// Distance from the rest position.
    #[inline]
    pub fn displacement_from_rest(&self) -> f32 {
        self.position.distance(self.rest)
    }
}
