//! Infrastructure layer for videofactory-feed
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP feed transports, the connectivity probe,
//! the JSONL record archive, and configuration file loading.

pub mod archive;
pub mod config;
pub mod transport;

// Re-export commonly used types
pub use archive::JsonlRecordArchive;
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use transport::{
    HttpConnectivityProbe, OrchestratorEndpoints, PollingFeedSource, PollingOptions,
    StreamingFeedSource, build_feed_source,
};
