//! # drapery-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the Drapery cloth simulator.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Drapery crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{DraperyError, DraperyResult};
pub use ids::{ParticleId, PinId};
