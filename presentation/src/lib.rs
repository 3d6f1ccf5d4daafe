//! Presentation layer for videofactory-feed
//!
//! This crate contains the CLI definition, console formatting, the phase
//! progress indicator and the console implementation of the presenter port.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, TransportArg};
pub use output::console::ConsoleFormatter;
pub use output::presenter::{ConsolePresenter, ResultOnlyPresenter};
pub use progress::PhaseIndicator;
