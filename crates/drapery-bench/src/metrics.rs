//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    pub scenario: String,
    pub particle_count: usize,
    pub constraint_count: usize,
    /// Frames executed.
    pub frames: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per frame (seconds).
    pub avg_step_time: f64,
    pub min_step_time: f64,
    pub max_step_time: f64,
    /// Kinetic energy after the last frame.
    pub final_kinetic_energy: f64,
    /// Largest distance of any particle from its rest position.
    pub max_displacement: f32,
    /// Pin entries released during the run.
    pub pins_released: usize,
    /// Frame on which the last pin let go, if the release finished.
    pub release_completed_at: Option<u64>,
    /// Constraints skipped as degenerate, summed over all frames.
    pub degenerate_constraints: usize,
}

impl BenchmarkMetrics {
    pub fn to_csv_header() -> String {
        "scenario,particles,constraints,frames,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,final_ke,max_displacement,pins_released,release_completed_at,degenerate".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        let completed = self
            .release_completed_at
            .map(|f| f.to_string())
            .unwrap_or_default();
        format!(
            "{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.4},{},{},{}",
            self.scenario,
            self.particle_count,
            self.constraint_count,
            self.frames,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.final_kinetic_energy,
            self.max_displacement,
            self.pins_released,
            completed,
            self.degenerate_constraints,
        )
    }

    /// Header plus one row per entry.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
