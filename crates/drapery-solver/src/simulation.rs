//! The simulation context.
//!
//! [`ClothSimulation`] owns every piece of mutable state (particles, pin
//! table, release progress, frame counter), so independent simulations can
//! run side by side and tests can drive one deterministically.

use std::time::Instant;

use drapery_math::Vec3;
use drapery_mesh::generators::parametric_grid;
use drapery_mesh::normals::compute_vertex_normals;
use drapery_mesh::{ParametricSurface, TriangleMesh};
use drapery_types::{DraperyError, DraperyResult, PinId};

use crate::cloth::Cloth;
use crate::config::ClothConfig;
use crate::integrator::Integrator;
use crate::pins::{PinManager, ReleaseState};
use crate::wind::WindField;

/// What happened during one call to [`ClothSimulation::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Index of the frame just simulated (0-based).
    pub frame: u64,
    /// Pin entries released this frame, in release order.
    pub released: Vec<PinId>,
    /// Pin entries still holding after this frame.
    pub pinned_remaining: usize,
    /// Particles snapped back to rest by pin enforcement.
    pub clamped_particles: usize,
    /// Constraints skipped because their particles coincided.
    pub degenerate_constraints: usize,
    /// Wind vector applied this frame, if any.
    pub wind: Option<Vec3>,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// A cloth, its pins, and the forces acting on it.
#[derive(Debug, Clone)]
pub struct ClothSimulation {
    config: ClothConfig,
    cloth: Cloth,
    pins: PinManager,
    wind: WindField,
    integrator: Integrator,
    gravity: Vec3,
    rest_mesh: TriangleMesh,
    frame: u64,
    last_time_ms: Option<f64>,
}

impl ClothSimulation {
    /// Builds a simulation on the flat plane described by `config`.
    pub fn new(config: ClothConfig) -> DraperyResult<Self> {
        let plane = config.plane();
        Self::with_surface(config, &plane)
    }

    /// Builds a simulation whose rest shape is sampled from `surface`.
    pub fn with_surface<S: ParametricSurface + ?Sized>(
        config: ClothConfig,
        surface: &S,
    ) -> DraperyResult<Self> {
        config.validate()?;

        let cloth = Cloth::build(&config.grid_params(), surface)?;
        let pins = PinManager::new(&cloth, &config.pin_layout, config.release_interval_ms)?;
        let mut rest_mesh = parametric_grid(surface, config.segments_x, config.segments_y);
        compute_vertex_normals(&mut rest_mesh);

        tracing::info!(
            particles = cloth.particle_count(),
            constraints = cloth.constraint_count(),
            pins = pins.table().len(),
            wind = config.wind.enabled,
            "cloth simulation created"
        );

        Ok(Self {
            integrator: Integrator::from_config(&config),
            wind: WindField::new(config.wind.clone()),
            gravity: Vec3::from_array(config.gravity),
            config,
            cloth,
            pins,
            rest_mesh,
            frame: 0,
            last_time_ms: None,
        })
    }

    /// Advances one frame at simulated time `now_ms`.
    ///
    /// `mesh` is the rendered surface from the previous frame; its normals
    /// drive the wind force. It may be `None` when wind is disabled or no
    /// render data is available yet, in which case no wind is applied.
    /// The integration step is always `config.timestep`, whatever the gap
    /// between successive `now_ms` values.
    pub fn step(&mut self, now_ms: f64, mesh: Option<&TriangleMesh>) -> DraperyResult<StepReport> {
        let start = Instant::now();

        if let Some(previous) = self.last_time_ms {
            if now_ms < previous {
                return Err(DraperyError::NonMonotonicTime { previous, now: now_ms });
            }
        }
        if let Some(mesh) = mesh {
            if mesh.vertex_count() != self.cloth.particle_count() {
                return Err(DraperyError::InvalidMesh(format!(
                    "mesh has {} vertices, cloth has {} particles",
                    mesh.vertex_count(),
                    self.cloth.particle_count()
                )));
            }
        }
        self.last_time_ms = Some(now_ms);

        let wind = match mesh {
            Some(mesh) if self.wind.is_enabled() => {
                let w = self.wind.at(now_ms);
                self.wind.apply(w, mesh, self.cloth.particles_mut())?;
                Some(w)
            }
            _ => None,
        };

        let gravity = self.gravity;
        for p in self.cloth.particles_mut() {
            let weight = gravity * p.mass();
            p.add_force(weight);
        }

        self.integrator.step(self.cloth.particles_mut());
        let degenerate_constraints = self.cloth.relax();

        let released = self.pins.tick(now_ms);
        let clamped_particles = self.pins.enforce(self.cloth.particles_mut());

        let frame = self.frame;
        self.frame += 1;

        tracing::trace!(
            frame,
            now_ms,
            released = released.len(),
            degenerate_constraints,
            "frame simulated"
        );

        Ok(StepReport {
            frame,
            released,
            pinned_remaining: self.pins.table().pinned_count(),
            clamped_particles,
            degenerate_constraints,
            wind,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }

    /// Starts the pin release sequence. Only the first call does anything.
    pub fn begin_release(&mut self, now_ms: f64) -> bool {
        self.pins.trigger(now_ms)
    }

    /// Current particle positions in topology order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.cloth.particles().iter().map(|p| p.position).collect()
    }

    /// Previous-step positions in topology order.
    pub fn previous_positions(&self) -> Vec<Vec3> {
        self.cloth.particles().iter().map(|p| p.previous).collect()
    }

    /// Copies particle positions into `mesh` (vertex `i` = particle `i`).
    pub fn write_positions(&self, mesh: &mut TriangleMesh) -> DraperyResult<()> {
        if mesh.vertex_count() != self.cloth.particle_count() {
            return Err(DraperyError::InvalidMesh(format!(
                "mesh has {} vertices, cloth has {} particles",
                mesh.vertex_count(),
                self.cloth.particle_count()
            )));
        }
        for (i, p) in self.cloth.particles().iter().enumerate() {
            mesh.set_position(i, p.position);
        }
        Ok(())
    }

    /// A render mesh of the undeformed cloth, with normals computed.
    pub fn render_mesh(&self) -> TriangleMesh {
        self.rest_mesh.clone()
    }

    /// `0.5 * Σ m * |v|²`, with `v` estimated from the last position delta.
    pub fn kinetic_energy(&self) -> f64 {
        let dt = self.integrator.timestep();
        self.cloth
            .particles()
            .iter()
            .map(|p| 0.5 * p.mass() as f64 * p.velocity(dt).length_squared() as f64)
            .sum()
    }

    /// Largest distance of any particle from its rest position.
    pub fn max_displacement(&self) -> f32 {
        self.cloth
            .particles()
            .iter()
            .map(|p| p.displacement_from_rest())
            .fold(0.0, f32::max)
    }

    /// Overwrites particle history, pin flags, and release progress.
    ///
    /// Used to resume from a snapshot. All slices must match the cloth.
    pub fn restore_state(
        &mut self,
        positions: &[Vec3],
        previous: &[Vec3],
        pinned: &[bool],
        release: ReleaseState,
        frame: u64,
        last_time_ms: Option<f64>,
    ) -> DraperyResult<()> {
        let n = self.cloth.particle_count();
        for found in [positions.len(), previous.len()] {
            if found != n {
                return Err(DraperyError::SnapshotMismatch { expected: n, found });
            }
        }
        self.pins.restore(pinned, release)?;
        for ((p, &pos), &prev) in self.cloth.particles_mut().iter_mut().zip(positions).zip(previous) {
            p.position = pos;
            p.previous = prev;
            p.acceleration = Vec3::ZERO;
        }
        self.frame = frame;
        self.last_time_ms = last_time_ms;
        Ok(())
    }

    pub fn config(&self) -> &ClothConfig {
        &self.config
    }

    pub fn cloth(&self) -> &Cloth {
        &self.cloth
    }

    pub fn pins(&self) -> &PinManager {
        &self.pins
    }

    pub fn wind(&self) -> &WindField {
        &self.wind
    }

    /// Number of frames simulated so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated time passed to the most recent `step`.
    pub fn last_time_ms(&self) -> Option<f64> {
        self.last_time_ms
    }
}
