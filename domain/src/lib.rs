//! Domain layer for videofactory-feed
//!
//! This crate contains the records, state machines and extraction rules of
//! the live activity feed. It has no knowledge of transports or rendering.
//!
//! # Core Concepts
//!
//! - **LogRecord**: one normalized event from the orchestrator, keyed by its
//!   timestamp
//! - **LogBuffer**: arrival-ordered, deduplicated display store
//! - **Phase**: coarse workflow stage inferred from message text
//! - **CompletionWatcher**: joins a result URL and a finished marker into a
//!   single "show result" signal

pub mod completion;
pub mod core;
pub mod phase;
pub mod record;

// Re-export commonly used types
pub use completion::{CompletionSignal, CompletionWatcher};
pub use core::{
    connection::ConnectionState,
    error::DomainError,
    transport::{DeploymentContext, TransportMode},
};
pub use phase::{Phase, PhaseTracker, PhaseTransition, classify};
pub use record::{AppendOutcome, LogBuffer, LogKind, LogRecord};
