//! Host-loop harness around a simulation strategy.
//!
//! Owns the strategy and its render views, drives fixed-tick stepping with
//! pause support, and keeps the step-time statistics the host displays.

use crate::{error::SimError, simulation::Simulate};

use log::info;
use std::time::{Duration, Instant};
use ultraviolet::Vec2;

/// Accumulated stepping statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunnerStats {
    /// Steps executed since the current strategy was installed.
    pub steps: u64,
    /// Total wall-clock time spent inside `step`.
    pub work: Duration,
}

impl RunnerStats {
    /// Average wall-clock time per step, zero before the first step.
    pub fn avg_step(&self) -> Duration {
        if self.steps == 0 {
            Duration::ZERO
        } else {
            self.work / self.steps as u32
        }
    }
}

/// Drives a simulation strategy from a host's fixed-tick loop.
pub struct Runner {
    sim: Box<dyn Simulate>,
    views: Vec<Vec2>,
    running: bool,
    stats: RunnerStats,
}

impl Runner {
    /// Wraps a freshly constructed strategy, allocating one view per body.
    pub fn new(sim: Box<dyn Simulate>) -> Self {
        info!("runner started with {} bodies", sim.body_count());

        Self {
            views: vec![Vec2::zero(); sim.body_count()],
            sim,
            running: true,
            stats: RunnerStats::default(),
        }
    }

    /// Shuts down the current strategy and installs a new one, resetting
    /// views and statistics.
    pub fn replace(&mut self, sim: Box<dyn Simulate>) {
        self.sim.shutdown();
        info!("runner switched to a simulation with {} bodies", sim.body_count());

        self.views = vec![Vec2::zero(); sim.body_count()];
        self.sim = sim;
        self.stats = RunnerStats::default();
    }

    /// Whether ticks currently advance the simulation.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Pauses or resumes stepping. Paused ticks are free no-ops.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Flips between paused and running.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// One fixed-tick advance. Skipped while paused; otherwise the step is
    /// timed and counted.
    pub fn tick(&mut self, dt: f32, pointer: Vec2, pointer_held: bool) -> Result<(), SimError> {
        if !self.running {
            return Ok(());
        }

        let start = Instant::now();
        self.sim.step(dt, pointer, pointer_held)?;
        self.stats.work += start.elapsed();
        self.stats.steps += 1;

        Ok(())
    }

    /// Refreshes the view buffer from the simulation and exposes it.
    /// Called once per render frame by the drawing side.
    pub fn views(&mut self) -> Result<&[Vec2], SimError> {
        self.sim.update_views(&mut self.views)?;
        Ok(&self.views)
    }

    /// Number of bodies in the current strategy.
    pub fn body_count(&self) -> usize {
        self.sim.body_count()
    }

    /// Statistics for the current strategy.
    pub fn stats(&self) -> RunnerStats {
        self.stats
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        self.sim.shutdown();
    }
}
