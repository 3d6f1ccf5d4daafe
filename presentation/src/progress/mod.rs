//! Progress display for the workflow phase

pub mod phase_indicator;

pub use phase_indicator::PhaseIndicator;
