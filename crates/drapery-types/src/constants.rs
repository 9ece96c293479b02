//! Physical constants and simulation defaults.
//!
//! Units follow the scene the cloth was tuned for: lengths in scene units
//! (one structural segment is 25 units), time in seconds for integration
//! and milliseconds for the wall/animation clock.

/// Gravitational acceleration magnitude (scene units / s²).
pub const GRAVITY: f32 = 981.0 * 1.4;

/// Fixed integration step (seconds). 20 ms, independent of frame duration.
pub const DEFAULT_TIMESTEP: f32 = 20.0 / 1000.0;

/// Velocity damping. The Verlet drag factor is `1 - DEFAULT_DAMPING`.
pub const DEFAULT_DAMPING: f32 = 0.03;

/// Mass of a single cloth particle.
pub const DEFAULT_PARTICLE_MASS: f32 = 0.1;

/// Structural rest distance between neighbouring particles.
pub const DEFAULT_REST_DISTANCE: f32 = 25.0;

/// Horizontal segment count of the default cloth.
pub const DEFAULT_SEGMENTS_X: usize = 25;

/// Vertical segment count of the default cloth.
pub const DEFAULT_SEGMENTS_Y: usize = 12;

/// Delay between two consecutive pin releases (milliseconds).
pub const DEFAULT_RELEASE_INTERVAL_MS: f64 = 5.0;
