//! Parametric surfaces.
//!
//! A surface maps normalised grid coordinates `(u, v)` to a point in space.
//! Both the cloth topology and the render mesh are sampled from the same
//! surface, which is what keeps their vertex orders in lock-step.

use drapery_math::Vec3;
use serde::{Deserialize, Serialize};

/// A surface parameterised over the unit square.
pub trait ParametricSurface {
    /// Returns the point at `(u, v)`, both in `[0, 1]`.
    fn evaluate(&self, u: f32, v: f32) -> Vec3;
}

impl<F> ParametricSurface for F
where
    F: Fn(f32, f32) -> Vec3,
{
    fn evaluate(&self, u: f32, v: f32) -> Vec3 {
        self(u, v)
    }
}

/// Flat rectangle in the XY plane.
///
/// `x` is centred on the origin and `y` runs from `height / 2` (at `v = 0`)
/// up to `1.5 * height` (at `v = 1`), so the top edge of the cloth sits at
/// `v = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Extent along X.
    pub width: f32,
    /// Extent along Y.
    pub height: f32,
}

impl Plane {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Plane sized so that a `segments_x × segments_y` grid has cells of
    /// exactly `spacing` on each side.
    pub fn from_segments(segments_x: usize, segments_y: usize, spacing: f32) -> Self {
        Self {
            width: spacing * segments_x as f32,
            height: spacing * segments_y as f32,
        }
    }
}

impl ParametricSurface for Plane {
    fn evaluate(&self, u: f32, v: f32) -> Vec3 {
        Vec3::new((u - 0.5) * self.width, (v + 0.5) * self.height, 0.0)
    }
}
