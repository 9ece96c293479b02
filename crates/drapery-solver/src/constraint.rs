//! Structural distance constraints and the relaxation sweep.

use drapery_types::ParticleId;
use serde::{Deserialize, Serialize};

use crate::particle::Particle;

/// Keeps two particles `rest_length` apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub a: ParticleId,
    pub b: ParticleId,
    pub rest_length: f32,
}

impl Constraint {
    pub fn new(a: ParticleId, b: ParticleId, rest_length: f32) -> Self {
        Self { a, b, rest_length }
    }
}

/// Moves `p1` and `p2` halfway each toward `rest_length` apart.
///
/// The correction is split evenly whatever the particles' masses are.
/// Returns `false` and leaves both particles untouched when they coincide
/// exactly, since there is no direction to push along.
pub fn satisfy_constraint(p1: &mut Particle, p2: &mut Particle, rest_length: f32) -> bool {
    let delta = p2.position - p1.position;
    let dist = delta.length();
    if dist == 0.0 {
        return false;
    }
    let half = delta * (1.0 - rest_length / dist) * 0.5;
    p1.position += half;
    p2.position -= half;
    true
}

/// One Gauss-Seidel sweep over `constraints` in order.
///
/// Returns the number of constraints skipped because their particles
/// coincided.
pub fn relax(particles: &mut [Particle], constraints: &[Constraint]) -> usize {
    let mut degenerate = 0;
    for c in constraints {
        let (p1, p2) = pair_mut(particles, c.a.index(), c.b.index());
        if !satisfy_constraint(p1, p2, c.rest_length) {
            degenerate += 1;
        }
    }
    degenerate
}

/// Two distinct mutable elements of `particles`, in argument order.
fn pair_mut(particles: &mut [Particle], a: usize, b: usize) -> (&mut Particle, &mut Particle) {
    debug_assert_ne!(a, b, "constraint endpoints must differ");
    if a < b {
        let (lo, hi) = particles.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = particles.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drapery_math::Vec3;

    fn particle(x: f32) -> Particle {
        Particle::new(Vec3::new(x, 0.0, 0.0), 1.0).unwrap()
    }

    #[test]
    fn pair_mut_keeps_argument_order() {
        let mut ps = vec![particle(0.0), particle(1.0), particle(2.0)];
        let (a, b) = pair_mut(&mut ps, 2, 0);
        assert_eq!(a.position.x, 2.0);
        assert_eq!(b.position.x, 0.0);
    }

    #[test]
    fn relax_counts_degenerate() {
        let mut ps = vec![particle(0.0), particle(0.0), particle(10.0)];
        let constraints = [
            Constraint::new(ParticleId(0), ParticleId(1), 5.0),
            Constraint::new(ParticleId(1), ParticleId(2), 10.0),
        ];
        assert_eq!(relax(&mut ps, &constraints), 1);
    }
}
