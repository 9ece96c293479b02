//! # drapery-bench
//!
//! Benchmark suite for the Drapery cloth simulator.
//!
//! Provides canned cloth scenarios, a runner that drives a
//! [`ClothSimulation`](drapery_solver::ClothSimulation) frame by frame,
//! and CSV export of the collected metrics for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::{BenchmarkRunner, RunOutcome};
pub use scenarios::{Scenario, ScenarioKind};
