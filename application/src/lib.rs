//! Application layer for videofactory-feed
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::FeedParams;
pub use ports::{
    connectivity_probe::{ConnectivityProbe, ProbeReport},
    feed_source::{FeedError, FeedEvent, FeedSender, FeedSource},
    presenter::{FeedPresenter, NoPresenter},
    record_archive::{NoRecordArchive, RecordArchive},
};
pub use use_cases::completion_feed::CompletionFeed;
pub use use_cases::log_feed::{LogFeed, SharedBuffer};
pub use use_cases::phase_engine::{PhaseEngine, PhaseSnapshot};
pub use use_cases::run_feed::{FeedHandle, RunFeedUseCase};
