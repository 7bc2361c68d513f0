//! Error type for simulation misuse.
//!
//! Numeric edge cases (near-coincident bodies) are handled inside the force
//! passes and never surface here; everything in this enum is a caller error.

use std::fmt;

/// Errors returned by simulation construction and the host-facing calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// A simulation was requested with zero bodies.
    InvalidBodyCount(usize),
    /// The instance was shut down; it cannot be stepped or read again.
    ShutDown,
    /// The view buffer length does not match the body count.
    ViewMismatch { views: usize, bodies: usize },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidBodyCount(count) => {
                write!(f, "simulation needs at least one body, got {}", count)
            }
            SimError::ShutDown => {
                write!(f, "simulation has been shut down and cannot be reused")
            }
            SimError::ViewMismatch { views, bodies } => {
                write!(f, "view buffer holds {} slots but there are {} bodies", views, bodies)
            }
        }
    }
}

impl std::error::Error for SimError {}
