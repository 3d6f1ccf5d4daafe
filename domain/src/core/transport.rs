//! Transport mode selection
//!
//! The feed is delivered either by server push (SSE) or by polling. The
//! choice is a pure function of the deployment context, made once when the
//! feed is constructed.

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hosts that cannot hold long-lived push connections.
const PULL_ONLY_HOST_SUFFIXES: [&str; 2] = ["vercel.app", "vercel.com"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Streaming,
    Polling,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Streaming => "streaming",
            TransportMode::Polling => "polling",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "streaming" | "stream" | "sse" => Ok(TransportMode::Streaming),
            "polling" | "poll" => Ok(TransportMode::Polling),
            other => Err(DomainError::UnknownTransport(other.to_string())),
        }
    }
}

/// Facts about where the feed client runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentContext {
    /// Explicit choice; wins over everything else.
    pub mode_override: Option<TransportMode>,
    /// Production deployments sit behind proxies that buffer push streams.
    pub production: bool,
    /// Host name of the orchestrator (or the page serving the client).
    pub host: String,
}

impl DeploymentContext {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    pub fn with_production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    pub fn with_mode_override(mut self, mode: Option<TransportMode>) -> Self {
        self.mode_override = mode;
        self
    }

    pub fn select_mode(&self) -> TransportMode {
        if let Some(mode) = self.mode_override {
            return mode;
        }
        let host = self.host.to_ascii_lowercase();
        if self.production || PULL_ONLY_HOST_SUFFIXES.iter().any(|s| host.ends_with(s)) {
            TransportMode::Polling
        } else {
            TransportMode::Streaming
        }
    }
}
