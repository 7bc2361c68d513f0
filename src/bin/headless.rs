//! Headless sweep over body-count presets and storage strategies.
//!
//! Runs every strategy at each preset for a fixed number of steps, with a
//! scripted pointer standing in for mouse input, and reports average step
//! time per configuration.

use nbody2d::{BoxedSimulation, Runner, SimError, Simulate, Simulation};
use ultraviolet::Vec2;

const PRESETS: &[usize] = &[10, 100, 200, 400, 800, 1600, 2400];
const STEPS: u32 = 240;
const DT: f32 = 0.02;

fn main() -> Result<(), SimError> {
    env_logger::init();

    println!("{:>12} {:>8} {:>8} {:>14}", "strategy", "bodies", "steps", "avg step");

    for &count in PRESETS {
        run("contiguous", Box::new(Simulation::new(count)?), count)?;

        let mut parallel = Simulation::new(count)?;
        parallel.set_parallel(true);
        run("parallel", Box::new(parallel), count)?;

        run("boxed", Box::new(BoxedSimulation::new(count)?), count)?;
    }

    Ok(())
}

fn run(name: &str, sim: Box<dyn Simulate>, count: usize) -> Result<(), SimError> {
    let mut runner = Runner::new(sim);

    for step in 0..STEPS {
        // Drag a scripted pointer around the spawn disc for half the run.
        let t = step as f32 * DT;
        let pointer = Vec2::new(t.cos(), t.sin()) * 5.0;
        runner.tick(DT, pointer, step % 2 == 0)?;
    }
    runner.views()?;

    let stats = runner.stats();
    println!(
        "{:>12} {:>8} {:>8} {:>14}",
        name,
        count,
        stats.steps,
        format!("{:.3?}", stats.avg_step())
    );

    Ok(())
}
