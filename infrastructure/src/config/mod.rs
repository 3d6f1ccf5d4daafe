//! Configuration file loading for videofactory-feed
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `VIDEOFACTORY_FEED_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./feed.toml` or `./.feed.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/videofactory-feed/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBufferConfig, FileConfig, FileOrchestratorConfig,
    FileOutputConfig, FilePhaseConfig, FilePollingConfig, FileProbeConfig,
};
pub use loader::ConfigLoader;
