//! Run Feed use case
//!
//! Wires one [`FeedSource`] to the three independent consumers of the record
//! stream: the log buffer, the phase engine and the completion watcher.
//!
//! A dispatcher task reads source events in arrival order and gives each
//! consumer its own unbounded channel, so a slow consumer never holds up
//! the others. Each consumer processes its records strictly in order.

use crate::config::FeedParams;
use crate::ports::feed_source::{FeedEvent, FeedSender, FeedSource};
use crate::ports::presenter::{FeedPresenter, NoPresenter};
use crate::ports::record_archive::{NoRecordArchive, RecordArchive};
use crate::use_cases::completion_feed::CompletionFeed;
use crate::use_cases::log_feed::{LogFeed, SharedBuffer, lock_buffer};
use crate::use_cases::phase_engine::{PhaseEngine, PhaseSnapshot};
use feed_domain::{CompletionSignal, ConnectionState, LogBuffer, LogRecord, TransportMode};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Use case for running a live feed session
pub struct RunFeedUseCase {
    source: Arc<dyn FeedSource>,
    params: FeedParams,
    presenter: Arc<dyn FeedPresenter>,
    archive: Arc<dyn RecordArchive>,
}

impl RunFeedUseCase {
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self {
            source,
            params: FeedParams::default(),
            presenter: Arc::new(NoPresenter),
            archive: Arc::new(NoRecordArchive),
        }
    }

    pub fn with_params(mut self, params: FeedParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_presenter(mut self, presenter: Arc<dyn FeedPresenter>) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn with_archive(mut self, archive: Arc<dyn RecordArchive>) -> Self {
        self.archive = archive;
        self
    }

    /// Spawn the consumers, start the source and hand back the session.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(self) -> FeedHandle {
        let cancel = CancellationToken::new();
        let buffer: SharedBuffer = Arc::new(Mutex::new(match self.params.buffer_capacity {
            Some(capacity) => LogBuffer::with_capacity(capacity),
            None => LogBuffer::new(),
        }));

        let log_feed = LogFeed::new(buffer.clone(), self.presenter.clone(), self.archive);
        let (engine, phase) = PhaseEngine::new(self.params.reset_delay, self.presenter.clone());
        let (completion, completions) = CompletionFeed::new(self.presenter.clone());

        let (log_tx, log_rx) = mpsc::unbounded_channel();
        let (phase_tx, phase_rx) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (connection_tx, connection) = watch::channel(ConnectionState::Disconnected);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let tasks = vec![
            tokio::spawn(log_feed.run(log_rx, cancel.child_token())),
            tokio::spawn(engine.run(phase_rx, cancel.child_token())),
            tokio::spawn(completion.run(completion_rx, cancel.child_token())),
            tokio::spawn(dispatch(
                events_rx,
                vec![log_tx, phase_tx, completion_tx],
                connection_tx,
                self.presenter.clone(),
                cancel.child_token(),
            )),
        ];

        info!("Starting feed in {} mode", self.source.mode());
        self.source.start(events_tx.clone());

        FeedHandle {
            source: self.source,
            events: events_tx,
            buffer,
            presenter: self.presenter,
            connection,
            phase,
            completions,
            cancel,
            tasks,
        }
    }
}

/// Fan source events out to the consumers, in arrival order.
async fn dispatch(
    mut events: mpsc::UnboundedReceiver<FeedEvent>,
    consumers: Vec<mpsc::UnboundedSender<LogRecord>>,
    connection: watch::Sender<ConnectionState>,
    presenter: Arc<dyn FeedPresenter>,
    cancel: CancellationToken,
) {
    loop {
        let event = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            event = events.recv() => match event {
                Some(event) => event,
                None => break,
            },
        };

        match event {
            FeedEvent::Record(record) => {
                for consumer in &consumers {
                    // A consumer that has gone away must not affect the others.
                    let _ = consumer.send(record.clone());
                }
            }
            FeedEvent::Connection(state) => {
                let changed = connection.send_if_modified(|current| {
                    if *current == state {
                        false
                    } else {
                        *current = state;
                        true
                    }
                });
                if changed {
                    info!("Feed connection: {}", state);
                    presenter.on_connection_change(state);
                }
            }
        }
    }
    debug!("Feed dispatcher stopped");
}

/// A running feed session.
///
/// Dropping the handle stops the source and aborts every task; prefer
/// [`FeedHandle::shutdown`] to also wait for them.
pub struct FeedHandle {
    source: Arc<dyn FeedSource>,
    events: FeedSender,
    buffer: SharedBuffer,
    presenter: Arc<dyn FeedPresenter>,
    connection: watch::Receiver<ConnectionState>,
    phase: watch::Receiver<PhaseSnapshot>,
    completions: mpsc::UnboundedReceiver<CompletionSignal>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl FeedHandle {
    pub fn mode(&self) -> TransportMode {
        self.source.mode()
    }

    /// Buffered records in display order.
    pub fn logs(&self) -> Vec<LogRecord> {
        lock_buffer(&self.buffer).snapshot()
    }

    pub fn log_count(&self) -> usize {
        lock_buffer(&self.buffer).len()
    }

    /// User-initiated clear of the display buffer.
    pub fn clear_logs(&self) {
        lock_buffer(&self.buffer).clear();
        self.presenter.on_cleared();
    }

    pub fn connection_state(&self) -> ConnectionState {
        *self.connection.borrow()
    }

    pub fn phase(&self) -> PhaseSnapshot {
        *self.phase.borrow()
    }

    pub fn watch_phase(&self) -> watch::Receiver<PhaseSnapshot> {
        self.phase.clone()
    }

    /// Inject a record originated locally (e.g. "request submitted").
    ///
    /// It travels the same path as server records. Returns `false` once the
    /// session has shut down.
    pub fn publish_local(&self, record: LogRecord) -> bool {
        self.events.send(FeedEvent::Record(record)).is_ok()
    }

    /// Wait for the next "show result" signal.
    pub async fn next_completion(&mut self) -> Option<CompletionSignal> {
        self.completions.recv().await
    }

    /// Stop the source and wait for every consumer to finish.
    pub async fn shutdown(mut self) {
        self.source.stop();
        self.cancel.cancel();
        for task in std::mem::take(&mut self.tasks) {
            let _ = task.await;
        }
        debug!("Feed session shut down");
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.source.stop();
        self.cancel.cancel();
        for task in &self.tasks {
            task.abort();
        }
    }
}
