pub mod body;
pub mod boxed;
pub mod error;
pub mod runner;
pub mod simulation;
pub mod utils;

pub use body::Body;
pub use boxed::BoxedSimulation;
pub use error::SimError;
pub use runner::{Runner, RunnerStats};
pub use simulation::{Simulate, Simulation};
