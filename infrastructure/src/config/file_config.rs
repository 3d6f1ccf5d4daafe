//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain/application
//! types after validation.

use feed_application::FeedParams;
use feed_domain::{DeploymentContext, TransportMode};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("orchestrator.url cannot be empty")]
    EmptyUrl,

    #[error("orchestrator.url is not a valid http(s) URL: {0}")]
    InvalidUrl(String),

    #[error("unknown orchestrator.transport: {0} (expected auto, streaming or polling)")]
    UnknownTransport(String),

    #[error("polling.interval_ms cannot be 0")]
    InvalidPollInterval,

    #[error("polling.limit cannot be 0")]
    InvalidPageLimit,

    #[error("polling.timeout_ms cannot be 0")]
    InvalidPollTimeout,
}

/// Raw orchestrator configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestratorConfig {
    /// Base URL of the orchestrator
    pub url: String,
    /// Production deployments poll instead of streaming
    pub production: bool,
    /// "auto", "streaming" or "polling"
    pub transport: String,
}

impl Default for FileOrchestratorConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3001".to_string(),
            production: false,
            transport: "auto".to_string(),
        }
    }
}

/// Raw polling configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePollingConfig {
    /// Fixed delay between pulls, in milliseconds
    pub interval_ms: u64,
    /// Page-size cap sent as `limit`
    pub limit: u32,
    /// Upper bound on a single pull, in milliseconds
    pub timeout_ms: u64,
}

impl Default for FilePollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            limit: 100,
            timeout_ms: 10_000,
        }
    }
}

/// Raw phase configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePhaseConfig {
    /// Delay before `complete` falls back to idle, in milliseconds
    pub reset_delay_ms: u64,
}

impl Default for FilePhaseConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: 5000,
        }
    }
}

/// Raw buffer configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBufferConfig {
    /// Maximum buffered records (unbounded when absent)
    pub capacity: Option<usize>,
}

/// Raw connectivity probe configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProbeConfig {
    pub enabled: bool,
    pub timeout_ms: u64,
}

impl Default for FileProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: 3000,
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Show the phase spinner
    pub show_progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_progress: true,
        }
    }
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub orchestrator: FileOrchestratorConfig,
    pub polling: FilePollingConfig,
    pub phase: FilePhaseConfig,
    pub buffer: FileBufferConfig,
    pub probe: FileProbeConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.base_url()?;
        self.transport_override()?;

        if self.polling.interval_ms == 0 {
            return Err(ConfigValidationError::InvalidPollInterval);
        }
        if self.polling.limit == 0 {
            return Err(ConfigValidationError::InvalidPageLimit);
        }
        if self.polling.timeout_ms == 0 {
            return Err(ConfigValidationError::InvalidPollTimeout);
        }

        Ok(())
    }

    /// Parsed orchestrator base URL
    pub fn base_url(&self) -> Result<Url, ConfigValidationError> {
        let raw = self.orchestrator.url.trim();
        if raw.is_empty() {
            return Err(ConfigValidationError::EmptyUrl);
        }
        let url = Url::parse(raw).map_err(|e| ConfigValidationError::InvalidUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ConfigValidationError::InvalidUrl(raw.to_string()));
        }
        Ok(url)
    }

    /// `None` means "decide from the deployment context"
    pub fn transport_override(&self) -> Result<Option<TransportMode>, ConfigValidationError> {
        let raw = self.orchestrator.transport.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("auto") {
            return Ok(None);
        }
        raw.parse()
            .map(Some)
            .map_err(|_| ConfigValidationError::UnknownTransport(raw.to_string()))
    }

    pub fn deployment_context(&self) -> Result<DeploymentContext, ConfigValidationError> {
        let url = self.base_url()?;
        Ok(DeploymentContext::new(url.host_str().unwrap_or_default())
            .with_production(self.orchestrator.production)
            .with_mode_override(self.transport_override()?))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.polling.interval_ms)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.polling.timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe.timeout_ms)
    }

    pub fn feed_params(&self) -> FeedParams {
        FeedParams::default()
            .with_reset_delay(Duration::from_millis(self.phase.reset_delay_ms))
            .with_buffer_capacity(self.buffer.capacity)
    }
}
