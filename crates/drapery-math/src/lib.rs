//! # drapery-math
//!
//! Math primitives for the Drapery cloth simulator.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, etc.)
//! - One-decimal quantisation used to match rest positions against pin keys

pub mod quantize;

// Re-export glam types as the canonical math types for Drapery.
pub use glam::Vec3;

pub use quantize::{quantize_tenths, tenths_to_f32};
