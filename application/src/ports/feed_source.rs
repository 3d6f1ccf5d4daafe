//! Feed source port
//!
//! Defines the interface for delivering orchestrator log records. Two
//! strategies (server push and polling) implement it in the infrastructure
//! layer; consumers never branch on which one is in use.

use feed_domain::{ConnectionState, LogRecord, TransportMode};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors raised inside a feed source.
///
/// These never cross the source boundary: a source turns them into a
/// [`ConnectionState::Disconnected`] event and carries on per its policy.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(u16),

    #[error("Undecodable response: {0}")]
    Decode(String),

    #[error("Stream closed by server")]
    StreamClosed,
}

/// Everything a feed source reports.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Record(LogRecord),
    Connection(ConnectionState),
}

/// Channel a source publishes on.
pub type FeedSender = mpsc::UnboundedSender<FeedEvent>;

/// Source of orchestrator log records.
///
/// Once started, every distinct server-side event that reaches the client is
/// sent at least once as [`FeedEvent::Record`]; connection changes are sent
/// as [`FeedEvent::Connection`]. Implementations spawn their work on the
/// current Tokio runtime.
pub trait FeedSource: Send + Sync {
    /// Delivery strategy, fixed at construction.
    fn mode(&self) -> TransportMode;

    /// Begin delivering. Restarts the source if it is already running.
    fn start(&self, events: FeedSender);

    /// Release the connection or timer. Idempotent and safe before `start`.
    fn stop(&self);
}
