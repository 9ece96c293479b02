//! # drapery-solver
//!
//! Particle state, cloth topology, time integration, constraint relaxation,
//! pin management, and the optional wind force.
//!
//! ## Key Types
//!
//! - [`Particle`] — point mass with implicit (Verlet) velocity
//! - [`Cloth`] — particle grid plus structural constraints
//! - [`Integrator`] — damped Verlet with a fixed timestep
//! - [`PinManager`] — per-frame pin enforcement and the one-shot release sequence
//! - [`WindField`] — time-varying aerodynamic force
//! - [`ClothSimulation`] — the simulation context that runs one frame per `step`
//!
//! Per frame, [`ClothSimulation::step`] runs:
//!
//! ```text
//! wind (optional) → gravity → integrate → relax constraints → release tick → enforce pins
//! ```

pub mod cloth;
pub mod config;
pub mod constraint;
pub mod integrator;
pub mod particle;
pub mod pins;
pub mod simulation;
pub mod wind;

pub use cloth::{Cloth, GridParams};
pub use config::ClothConfig;
pub use constraint::{satisfy_constraint, Constraint};
pub use integrator::Integrator;
pub use particle::Particle;
pub use pins::{PinLayout, PinManager, PinPoint, PinTable, ReleaseState};
pub use simulation::{ClothSimulation, StepReport};
pub use wind::{WindConfig, WindField};
