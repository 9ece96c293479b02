//! Cloth topology: the particle grid and its structural constraints.
//!
//! A cloth of `w × h` segments has `(w + 1) × (h + 1)` particles, indexed
//! `u + v * (w + 1)`, and exactly `2wh + w + h` structural constraints.
//! Nothing is added or removed after construction.

use drapery_mesh::ParametricSurface;
use drapery_types::{DraperyError, DraperyResult, ParticleId};

use crate::constraint::{self, Constraint};
use crate::particle::Particle;

/// Grid dimensions and per-particle parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    /// Segment count along `u` (columns of cells).
    pub segments_x: usize,
    /// Segment count along `v` (rows of cells).
    pub segments_y: usize,
    pub particle_mass: f32,
    /// Rest length shared by every structural constraint.
    pub rest_distance: f32,
}

impl GridParams {
    pub fn validate(&self) -> DraperyResult<()> {
        if self.segments_x < 1 || self.segments_y < 1 {
            return Err(DraperyError::InvalidTopology {
                segments_x: self.segments_x,
                segments_y: self.segments_y,
            });
        }
        if !(self.particle_mass.is_finite() && self.particle_mass > 0.0) {
            return Err(DraperyError::InvalidConfig(format!(
                "particle mass must be positive and finite, got {}",
                self.particle_mass
            )));
        }
        if !(self.rest_distance.is_finite() && self.rest_distance > 0.0) {
            return Err(DraperyError::InvalidConfig(format!(
                "rest distance must be positive and finite, got {}",
                self.rest_distance
            )));
        }
        Ok(())
    }
}

/// A rectangular grid of particles joined by structural constraints.
#[derive(Debug, Clone)]
pub struct Cloth {
    segments_x: usize,
    segments_y: usize,
    particles: Vec<Particle>,
    constraints: Vec<Constraint>,
}

impl Cloth {
    /// Samples `surface` at `(u / w, v / h)` for every grid vertex and links
    /// horizontal and vertical neighbours.
    ///
    /// Constraint order: for each interior cell `(u, v)` the link to
    /// `(u, v + 1)` then to `(u + 1, v)`; then the closing column `u = w`;
    /// then the closing row `v = h`.
    pub fn build<S: ParametricSurface + ?Sized>(
        params: &GridParams,
        surface: &S,
    ) -> DraperyResult<Self> {
        params.validate()?;

        let w = params.segments_x;
        let h = params.segments_y;
        let mut particles = Vec::with_capacity((w + 1) * (h + 1));
        for v in 0..=h {
            for u in 0..=w {
                let rest = surface.evaluate(u as f32 / w as f32, v as f32 / h as f32);
                particles.push(Particle::new(rest, params.particle_mass)?);
            }
        }

        let index = |u: usize, v: usize| ParticleId((u + v * (w + 1)) as u32);
        let rest = params.rest_distance;
        let mut constraints = Vec::with_capacity(2 * w * h + w + h);

        for v in 0..h {
            for u in 0..w {
                constraints.push(Constraint::new(index(u, v), index(u, v + 1), rest));
                constraints.push(Constraint::new(index(u, v), index(u + 1, v), rest));
            }
        }
        for v in 0..h {
            constraints.push(Constraint::new(index(w, v), index(w, v + 1), rest));
        }
        for u in 0..w {
            constraints.push(Constraint::new(index(u, h), index(u + 1, h), rest));
        }

        tracing::debug!(
            segments_x = w,
            segments_y = h,
            particles = particles.len(),
            constraints = constraints.len(),
            "cloth topology built"
        );

        Ok(Self {
            segments_x: w,
            segments_y: h,
            particles,
            constraints,
        })
    }

    /// Flat index of grid vertex `(u, v)`.
    #[inline]
    pub fn index(&self, u: usize, v: usize) -> usize {
        u + v * (self.segments_x + 1)
    }

    #[inline]
    pub fn particle_id(&self, u: usize, v: usize) -> ParticleId {
        ParticleId(self.index(u, v) as u32)
    }

    #[inline]
    pub fn segments_x(&self) -> usize {
        self.segments_x
    }

    #[inline]
    pub fn segments_y(&self) -> usize {
        self.segments_y
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn particle(&self, id: ParticleId) -> &Particle {
        &self.particles[id.index()]
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Particles of the top edge (`v = h`), left to right.
    pub fn top_row(&self) -> &[Particle] {
        let start = self.index(0, self.segments_y);
        &self.particles[start..]
    }

    /// One relaxation sweep over all constraints. Returns the number of
    /// degenerate (coincident) pairs that were skipped.
    pub fn relax(&mut self) -> usize {
        constraint::relax(&mut self.particles, &self.constraints)
    }
}
