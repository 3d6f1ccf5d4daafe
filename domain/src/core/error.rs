//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// None of these are fatal to the feed: malformed payloads are dropped and
/// configuration problems are reported before the feed starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Unknown transport mode: {0}")]
    UnknownTransport(String),
}
