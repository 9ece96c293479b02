//! Benchmark runner: drives a scenario frame by frame and collects metrics.

use std::time::Instant;

use drapery_debug::hooks::InspectionHook;
use drapery_mesh::normals::compute_vertex_normals;
use drapery_render::{RenderFrame, Renderer};
use drapery_solver::ClothSimulation;
use drapery_types::DraperyResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Metrics plus the simulation in its final state.
pub struct RunOutcome {
    pub metrics: BenchmarkMetrics,
    pub simulation: ClothSimulation,
}

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario headlessly.
    pub fn run(scenario: &Scenario) -> DraperyResult<BenchmarkMetrics> {
        Ok(Self::run_with(scenario, None, None)?.metrics)
    }

    /// Run a scenario, reporting to `hook` and presenting to `renderer`.
    ///
    /// Frame `k` (0-based) is stepped at `(k + 1) * frame_ms`. When
    /// `release_at == Some(k)` the release is triggered just before frame
    /// `k` is stepped.
    pub fn run_with(
        scenario: &Scenario,
        mut hook: Option<&mut dyn InspectionHook>,
        mut renderer: Option<&mut dyn Renderer>,
    ) -> DraperyResult<RunOutcome> {
        let mut sim = ClothSimulation::new(scenario.config.clone())?;
        let mut mesh = sim.render_mesh();
        if let Some(r) = renderer.as_deref_mut() {
            r.init(&mesh)?;
        }

        tracing::info!(
            scenario = scenario.kind.name(),
            particles = sim.cloth().particle_count(),
            frames = scenario.frames,
            "benchmark started"
        );

        let mut step_times = Vec::with_capacity(scenario.frames as usize);
        let mut pins_released = 0;
        let mut release_completed_at = None;
        let mut degenerate_constraints = 0;
        let total_start = Instant::now();

        for k in 0..scenario.frames {
            let frame = u64::from(k);
            let now_ms = f64::from(k + 1) * scenario.frame_ms;

            if scenario.release_at == Some(k) && sim.begin_release(now_ms) {
                let pinned = sim.pins().table().pinned_count();
                if let Some(h) = hook.as_deref_mut() {
                    h.on_release_triggered(frame, now_ms, pinned);
                }
            }
            if let Some(h) = hook.as_deref_mut() {
                h.on_frame_begin(frame, now_ms);
            }

            let report = sim.step(now_ms, scenario.track_mesh.then_some(&mesh))?;
            step_times.push(report.wall_time);
            degenerate_constraints += report.degenerate_constraints;
            if !report.released.is_empty() {
                pins_released += report.released.len();
                if report.pinned_remaining == 0 {
                    release_completed_at = Some(report.frame);
                }
            }

            if scenario.track_mesh {
                sim.write_positions(&mut mesh)?;
                compute_vertex_normals(&mut mesh);
            }
            if let Some(r) = renderer.as_deref_mut() {
                r.submit_frame(&RenderFrame::from_positions(report.frame, &sim.positions()))?;
            }
            if let Some(h) = hook.as_deref_mut() {
                h.on_energy(report.frame, sim.kinetic_energy(), sim.max_displacement());
                h.on_frame_end(&report);
            }
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();
        if let Some(h) = hook.as_deref_mut() {
            h.on_simulation_end();
        }
        if let Some(r) = renderer.as_deref_mut() {
            r.finalize()?;
        }

        let avg_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().copied().fold(f64::MAX, f64::min)
        };
        let max_step = step_times.iter().copied().fold(0.0, f64::max);

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            particle_count: sim.cloth().particle_count(),
            constraint_count: sim.cloth().constraint_count(),
            frames: scenario.frames,
            total_wall_time,
            avg_step_time: avg_step,
            min_step_time: min_step,
            max_step_time: max_step,
            final_kinetic_energy: sim.kinetic_energy(),
            max_displacement: sim.max_displacement(),
            pins_released,
            release_completed_at,
            degenerate_constraints,
        };

        tracing::info!(
            scenario = scenario.kind.name(),
            wall_time = total_wall_time,
            pins_released,
            "benchmark finished"
        );

        Ok(RunOutcome {
            metrics,
            simulation: sim,
        })
    }

    /// Run every canned scenario and return metrics for each.
    pub fn run_all() -> DraperyResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind)))
            .collect()
    }
}
