use crate::{body::Body, error::SimError, utils};

use log::debug;
use rayon::prelude::*;
use ultraviolet::Vec2;

/// Base strength of the pairwise attraction force.
pub const ATTRACT_STRENGTH: f32 = 5.0;
/// Distance falloff rate of the pairwise attraction force.
pub const ATTRACT_FALLOFF: f32 = 0.01;
/// Base strength of the pointer pull.
pub const POINTER_STRENGTH: f32 = 3.0;
/// Distance falloff rate of the pointer pull.
pub const POINTER_FALLOFF: f32 = 0.001;
/// Offset keeping the force denominators away from zero at contact range.
pub const FORCE_SOFTENING: f32 = 0.1;
/// Squared speed above which the velocity brake kicks in.
pub const MAX_SPEED_SQ: f32 = 2500.0;
/// Minimum separation used in force math; clamps the division at exact overlap.
pub const MIN_DISTANCE: f32 = 1e-6;

/// Attraction exerted across `delta` (from the attracted body towards the
/// other one), for a simulation with the given force scale.
pub fn pair_force(delta: Vec2, force_scale: f32) -> Vec2 {
    let distance = delta.mag().max(MIN_DISTANCE);
    delta / distance * (ATTRACT_STRENGTH / (FORCE_SOFTENING + distance * ATTRACT_FALLOFF) * force_scale)
}

/// Pull towards `pointer` felt by a body at `pos`.
///
/// Below [`MIN_DISTANCE`] the offset is left unnormalized, so a body sitting
/// on the pointer feels (near-)zero pull instead of a spike.
pub fn pointer_force(pointer: Vec2, pos: Vec2) -> Vec2 {
    let mut vec = pointer - pos;
    let distance = vec.mag();
    if distance > MIN_DISTANCE {
        vec /= distance;
    }
    vec * (POINTER_STRENGTH / (FORCE_SOFTENING + distance * POINTER_FALLOFF))
}

/// Contract between a host loop and a simulation strategy.
///
/// Construction belongs to each strategy; everything after that — stepping,
/// publishing positions, teardown — goes through this trait so a host can
/// swap strategies behind a `Box<dyn Simulate>`.
pub trait Simulate {
    /// Advances the simulation by one fixed time step.
    fn step(&mut self, dt: f32, pointer: Vec2, pointer_held: bool) -> Result<(), SimError>;
    /// Copies every body position into the matching view slot.
    fn update_views(&self, views: &mut [Vec2]) -> Result<(), SimError>;
    /// Number of bodies, zero once the instance has been shut down.
    fn body_count(&self) -> usize;
    /// Releases body storage. Idempotent; stepping afterwards is an error.
    fn shutdown(&mut self);
}

/// N-body simulation over one contiguous body array.
///
/// Each [`step`](Simulation::step) runs pairwise attraction, the optional
/// pointer pull, a speed brake, and semi-implicit Euler integration, in that
/// order. The caller serializes `step` and `update_views`; there is no
/// internal locking.
#[derive(Debug)]
pub struct Simulation {
    /// Collection of all bodies in the simulation. The length is fixed for
    /// the lifetime of the instance; changing the body count means creating
    /// a new simulation.
    pub bodies: Vec<Body>,
    /// Per-pair force scale, derived once from the body count.
    force_scale: f32,
    /// Whether the attraction pass runs on the Rayon pool.
    parallel: bool,
    /// Position snapshot consumed by the parallel attraction pass.
    scratch: Vec<Vec2>,
}

impl Simulation {
    /// Seed used by [`Simulation::new`].
    pub const DEFAULT_SEED: u64 = 0;

    /// Creates `count` bodies scattered over the spawn disc.
    ///
    /// `count` must be at least one; zero is rejected rather than clamped.
    pub fn new(count: usize) -> Result<Self, SimError> {
        Self::with_seed(count, Self::DEFAULT_SEED)
    }

    /// Like [`Simulation::new`] with an explicit spawn seed.
    pub fn with_seed(count: usize, seed: u64) -> Result<Self, SimError> {
        Self::with_bodies(utils::uniform_disc(count, seed))
    }

    /// Creates a simulation over a prepared body set.
    pub fn with_bodies(bodies: Vec<Body>) -> Result<Self, SimError> {
        if bodies.is_empty() {
            return Err(SimError::InvalidBodyCount(0));
        }

        debug!("contiguous simulation created with {} bodies", bodies.len());

        Ok(Self {
            force_scale: 1.0 / bodies.len() as f32,
            scratch: Vec::with_capacity(bodies.len()),
            bodies,
            parallel: false,
        })
    }

    /// Sets whether the attraction pass runs in parallel.
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    /// Per-pair force scale (`1 / body count`).
    pub fn force_scale(&self) -> f32 {
        self.force_scale
    }

    /// Advances the simulation by one fixed time step.
    ///
    /// `pointer` is the host's input position mapped into simulation space;
    /// the pointer pull only applies while `pointer_held` is true.
    pub fn step(&mut self, dt: f32, pointer: Vec2, pointer_held: bool) -> Result<(), SimError> {
        if self.bodies.is_empty() {
            return Err(SimError::ShutDown);
        }

        self.attract();
        if pointer_held {
            self.apply_pointer(pointer);
        }
        self.integrate(dt);

        Ok(())
    }

    /// Accumulates mutual attraction into every body's acceleration.
    ///
    /// All-pairs O(N²) on purpose: the crate compares storage and dispatch
    /// strategies, so the work per strategy must stay identical.
    pub fn attract(&mut self) {
        if self.parallel {
            self.attract_parallel();
        } else {
            self.attract_serial();
        }
    }

    /// Walks each unordered pair once, applying the force to one body and
    /// its negation to the other.
    fn attract_serial(&mut self) {
        let n = self.bodies.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let force = pair_force(self.bodies[j].pos - self.bodies[i].pos, self.force_scale);
                self.bodies[i].acc += force;
                self.bodies[j].acc -= force;
            }
        }
    }

    /// Snapshots positions, then sums each body's pull from every other body
    /// on the Rayon pool. Each pair is evaluated twice so no two bodies ever
    /// share a write target.
    fn attract_parallel(&mut self) {
        self.scratch.clear();
        self.scratch.extend(self.bodies.iter().map(|body| body.pos));

        let positions = &self.scratch;
        let force_scale = self.force_scale;

        self.bodies.par_iter_mut().enumerate().for_each(|(i, body)| {
            let mut acc = Vec2::zero();
            for (j, &other) in positions.iter().enumerate() {
                if j != i {
                    acc += pair_force(other - body.pos, force_scale);
                }
            }
            body.acc += acc;
        });
    }

    /// Applies the pointer interaction: body 0 is hijacked as the cursor
    /// body and parked on the pointer, then every body is pulled towards it.
    pub fn apply_pointer(&mut self, pointer: Vec2) {
        let Some(cursor) = self.bodies.first_mut() else {
            return;
        };
        cursor.pos = pointer;
        cursor.vel = Vec2::zero();

        for body in &mut self.bodies {
            body.acc += pointer_force(pointer, body.pos);
        }
    }

    /// Brakes bodies past the speed limit, then integrates every body and
    /// clears its acceleration accumulator.
    pub fn integrate(&mut self, dt: f32) {
        for body in &mut self.bodies {
            if body.vel.mag_sq() > MAX_SPEED_SQ {
                body.acc -= body.vel;
            }
            body.update(dt);
        }
    }

    /// Copies every body position into the matching view slot.
    ///
    /// Read-only with respect to simulation state; `views` must hold exactly
    /// one slot per body.
    pub fn update_views(&self, views: &mut [Vec2]) -> Result<(), SimError> {
        if self.bodies.is_empty() {
            return Err(SimError::ShutDown);
        }
        if views.len() != self.bodies.len() {
            return Err(SimError::ViewMismatch {
                views: views.len(),
                bodies: self.bodies.len(),
            });
        }

        for (view, body) in views.iter_mut().zip(&self.bodies) {
            *view = body.pos;
        }

        Ok(())
    }

    /// Releases body storage. Safe to call more than once; after the first
    /// call the instance only ever reports [`SimError::ShutDown`].
    pub fn shutdown(&mut self) {
        if !self.bodies.is_empty() {
            debug!("contiguous simulation with {} bodies shut down", self.bodies.len());
        }
        self.bodies = Vec::new();
        self.scratch = Vec::new();
    }
}

impl Simulate for Simulation {
    fn step(&mut self, dt: f32, pointer: Vec2, pointer_held: bool) -> Result<(), SimError> {
        Simulation::step(self, dt, pointer, pointer_held)
    }

    fn update_views(&self, views: &mut [Vec2]) -> Result<(), SimError> {
        Simulation::update_views(self, views)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn shutdown(&mut self) {
        Simulation::shutdown(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pair_at(a: Vec2, b: Vec2) -> Simulation {
        Simulation::with_bodies(vec![Body::new(a, Vec2::zero()), Body::new(b, Vec2::zero())])
            .unwrap()
    }

    #[test]
    fn attraction_is_equal_and_opposite() {
        let mut sim = pair_at(Vec2::new(-1.5, 2.0), Vec2::new(3.0, -0.5));
        sim.attract();

        // One pair, one force application: the halves negate exactly.
        assert_eq!(sim.bodies[0].acc, -sim.bodies[1].acc);
        assert!(sim.bodies[0].acc.mag() > 0.0);
    }

    #[test]
    fn overlapping_bodies_stay_finite() {
        let mut sim = pair_at(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0));
        sim.attract();
        sim.integrate(0.01);

        for body in &sim.bodies {
            assert!(body.pos.x.is_finite() && body.pos.y.is_finite());
            assert!(body.vel.x.is_finite() && body.vel.y.is_finite());
        }
    }

    #[test]
    fn single_body_feels_no_attraction() {
        let mut sim = Simulation::with_bodies(vec![Body::new(Vec2::new(2.0, 3.0), Vec2::zero())])
            .unwrap();
        sim.attract();
        assert_eq!(sim.bodies[0].acc, Vec2::zero());

        sim.step(0.02, Vec2::zero(), false).unwrap();
        assert_eq!(sim.bodies[0].pos, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn brake_only_fires_above_speed_limit() {
        let at_limit = Vec2::new(50.0, 0.0);
        let below = Vec2::new(49.99, 0.0);
        let above = Vec2::new(50.01, 0.0);

        let mut sim = Simulation::with_bodies(vec![
            Body::new(Vec2::zero(), below),
            Body::new(Vec2::new(1000.0, 0.0), at_limit),
            Body::new(Vec2::new(-1000.0, 0.0), above),
        ])
        .unwrap();

        let dt = 0.1;
        sim.integrate(dt);

        // No pairwise pass ran, so the only acceleration is the brake.
        assert_eq!(sim.bodies[0].vel, below);
        assert_eq!(sim.bodies[1].vel, at_limit);
        assert_relative_eq!(sim.bodies[2].vel.x, 50.01 * (1.0 - dt), epsilon = 1e-4);
    }

    #[test]
    fn parallel_attraction_matches_serial() {
        let bodies = utils::uniform_disc(100, 3);
        let mut serial = Simulation::with_bodies(bodies.clone()).unwrap();
        let mut parallel = Simulation::with_bodies(bodies).unwrap();
        parallel.set_parallel(true);

        serial.attract();
        parallel.attract();

        for (a, b) in serial.bodies.iter().zip(&parallel.bodies) {
            assert_relative_eq!(a.acc.x, b.acc.x, epsilon = 1e-4, max_relative = 1e-3);
            assert_relative_eq!(a.acc.y, b.acc.y, epsilon = 1e-4, max_relative = 1e-3);
        }
    }

    #[test]
    fn pointer_pull_is_strongest_near_the_pointer() {
        let near = pointer_force(Vec2::zero(), Vec2::new(0.5, 0.0)).mag();
        let far = pointer_force(Vec2::zero(), Vec2::new(50.0, 0.0)).mag();
        assert!(near > far);
    }
}
