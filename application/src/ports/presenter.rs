//! Presentation port
//!
//! Callbacks through which the rendering layer observes the feed. Each
//! consumer of the record stream calls its own subset of these, possibly
//! from different tasks, so implementations must be thread-safe.

use crate::use_cases::phase_engine::PhaseSnapshot;
use feed_domain::{CompletionSignal, ConnectionState, LogRecord};

pub trait FeedPresenter: Send + Sync {
    /// A record was accepted into the log buffer.
    fn on_record(&self, record: &LogRecord, buffered: usize);

    /// The log buffer was emptied (control record or user action).
    fn on_cleared(&self);

    fn on_connection_change(&self, state: ConnectionState);

    fn on_phase_change(&self, snapshot: PhaseSnapshot);

    /// Both the result URL and the finished marker have been seen.
    fn on_result_ready(&self, signal: &CompletionSignal);
}

/// No-op presenter for headless runs and tests
pub struct NoPresenter;

impl FeedPresenter for NoPresenter {
    fn on_record(&self, _record: &LogRecord, _buffered: usize) {}
    fn on_cleared(&self) {}
    fn on_connection_change(&self, _state: ConnectionState) {}
    fn on_phase_change(&self, _snapshot: PhaseSnapshot) {}
    fn on_result_ready(&self, _signal: &CompletionSignal) {}
}
