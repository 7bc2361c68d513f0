//! Per-object storage strategy.
//!
//! Same algorithm as [`Simulation`](crate::Simulation), but every body lives
//! in its own heap allocation. This is the pointer-chasing arm of the
//! storage comparison; it exists to be measured against the contiguous
//! baseline, not to be fast.

use crate::{
    body::Body,
    error::SimError,
    simulation::{MAX_SPEED_SQ, Simulate, pair_force, pointer_force},
    utils,
};

use log::debug;
use ultraviolet::Vec2;

/// N-body simulation over individually boxed bodies.
#[derive(Debug)]
pub struct BoxedSimulation {
    bodies: Vec<Box<Body>>,
    force_scale: f32,
}

impl BoxedSimulation {
    /// Creates `count` boxed bodies scattered over the spawn disc.
    ///
    /// Zero counts are rejected, matching [`Simulation::new`](crate::Simulation::new).
    pub fn new(count: usize) -> Result<Self, SimError> {
        Self::with_seed(count, crate::Simulation::DEFAULT_SEED)
    }

    /// Like [`BoxedSimulation::new`] with an explicit spawn seed.
    pub fn with_seed(count: usize, seed: u64) -> Result<Self, SimError> {
        Self::with_bodies(utils::uniform_disc(count, seed))
    }

    /// Boxes a prepared body set.
    pub fn with_bodies(bodies: Vec<Body>) -> Result<Self, SimError> {
        if bodies.is_empty() {
            return Err(SimError::InvalidBodyCount(0));
        }

        debug!("boxed simulation created with {} bodies", bodies.len());

        Ok(Self {
            force_scale: 1.0 / bodies.len() as f32,
            bodies: bodies.into_iter().map(Box::new).collect(),
        })
    }

    /// Advances the simulation by one fixed time step.
    pub fn step(&mut self, dt: f32, pointer: Vec2, pointer_held: bool) -> Result<(), SimError> {
        if self.bodies.is_empty() {
            return Err(SimError::ShutDown);
        }

        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let force = pair_force(self.bodies[j].pos - self.bodies[i].pos, self.force_scale);
                self.bodies[i].acc += force;
                self.bodies[j].acc -= force;
            }
        }

        if pointer_held {
            self.bodies[0].pos = pointer;
            self.bodies[0].vel = Vec2::zero();

            for body in &mut self.bodies {
                body.acc += pointer_force(pointer, body.pos);
            }
        }

        for body in &mut self.bodies {
            if body.vel.mag_sq() > MAX_SPEED_SQ {
                body.acc -= body.vel;
            }
            body.update(dt);
        }

        Ok(())
    }

    /// Copies every body position into the matching view slot.
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

    /// Releases body storage. Idempotent.
    pub fn shutdown(&mut self) {
        if !self.bodies.is_empty() {
            debug!("boxed simulation with {} bodies shut down", self.bodies.len());
        }
        self.bodies = Vec::new();
    }
}

impl Simulate for BoxedSimulation {
    fn step(&mut self, dt: f32, pointer: Vec2, pointer_held: bool) -> Result<(), SimError> {
        BoxedSimulation::step(self, dt, pointer, pointer_held)
    }

    fn update_views(&self, views: &mut [Vec2]) -> Result<(), SimError> {
        BoxedSimulation::update_views(self, views)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn shutdown(&mut self) {
        BoxedSimulation::shutdown(self);
    }
}
