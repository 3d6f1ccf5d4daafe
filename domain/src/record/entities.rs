//! Log record entities
//!
//! A [`LogRecord`] is the normalized unit flowing from the orchestrator into
//! every consumer. Records are immutable once ingested.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Kind of a log record (wire field `type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Success,
    Error,
    Warning,
    Transaction,
    Channel,
    Settlement,
    Connected,
    /// Control record: resets the log buffer, never stored.
    Clear,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Info => "info",
            LogKind::Success => "success",
            LogKind::Error => "error",
            LogKind::Warning => "warning",
            LogKind::Transaction => "transaction",
            LogKind::Channel => "channel",
            LogKind::Settlement => "settlement",
            LogKind::Connected => "connected",
            LogKind::Clear => "clear",
        }
    }

    pub fn is_control(&self) -> bool {
        matches!(self, LogKind::Clear)
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One normalized event from the orchestrator feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Opaque, non-decreasing identifier (ISO-8601 in practice). Dedup key.
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl LogRecord {
    pub fn new(timestamp: impl Into<String>, kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            kind,
            message: message.into(),
            metadata: None,
        }
    }

    /// Parse a wire payload.
    ///
    /// Anything that does not decode into a full record (bad JSON, unknown
    /// `type`, missing fields) is reported as [`DomainError::MalformedPayload`].
    pub fn from_json(payload: &str) -> Result<Self, DomainError> {
        serde_json::from_str(payload).map_err(|e| DomainError::MalformedPayload(e.to_string()))
    }

    /// Decode a record from an already-parsed JSON value (polling pages).
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        serde_json::from_value(value).map_err(|e| DomainError::MalformedPayload(e.to_string()))
    }

    pub fn is_clear(&self) -> bool {
        self.kind.is_control()
    }
}
