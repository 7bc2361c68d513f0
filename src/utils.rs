use crate::body::Body;
use ultraviolet::Vec2;

/// Radius of the disc bodies are scattered across at spawn.
pub const SPAWN_RADIUS: f32 = 10.0;

/// Generates `n` bodies scattered uniformly over a disc.
/// - Positions are area-uniform inside a disc of radius [`SPAWN_RADIUS`].
/// - Velocities are area-uniform inside the unit disc.
/// - The same seed always produces the same body set.
pub fn uniform_disc(n: usize, seed: u64) -> Vec<Body> {
    let mut rng = fastrand::Rng::with_seed(seed);

    (0..n)
        .map(|_| Body::new(disc_point(&mut rng, SPAWN_RADIUS), disc_point(&mut rng, 1.0)))
        .collect()
}

/// Samples a point uniformly from a disc of the given radius.
/// The square root on the radius draw keeps the distribution area-uniform
/// rather than clustered at the center.
fn disc_point(rng: &mut fastrand::Rng, radius: f32) -> Vec2 {
    let a = rng.f32() * std::f32::consts::TAU;
    let (sin, cos) = a.sin_cos();
    let r = rng.f32().sqrt() * radius;

    Vec2::new(cos, sin) * r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_stays_inside_disc() {
        for body in uniform_disc(500, 7) {
            assert!(body.pos.mag() <= SPAWN_RADIUS);
            assert!(body.vel.mag() <= 1.0);
            assert_eq!(body.acc, Vec2::zero());
        }
    }

    #[test]
    fn same_seed_same_bodies() {
        let a = uniform_disc(64, 42);
        let b = uniform_disc(64, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = uniform_disc(64, 1);
        let b = uniform_disc(64, 2);
        assert_ne!(a, b);
    }
}
