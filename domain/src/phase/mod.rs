//! Phase inference: classifying free-text log messages into workflow phases.

pub mod classifier;
pub mod entities;
pub mod tracker;

pub use classifier::classify;
pub use entities::Phase;
pub use tracker::{PhaseTracker, PhaseTransition};
