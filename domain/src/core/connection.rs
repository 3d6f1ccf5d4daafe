//! Connection state of the feed transport

use serde::{Deserialize, Serialize};
use std::fmt;

/// Owned by the transport adapter; read-only everywhere else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
        }
    }

    /// Short indicator label.
    pub fn indicator(&self) -> &'static str {
        match self {
            ConnectionState::Connected => "LIVE",
            ConnectionState::Connecting => "CONNECTING",
            ConnectionState::Disconnected => "OFFLINE",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
