//! Log feed consumer
//!
//! Moves records from the stream into the shared [`LogBuffer`], notifying the
//! presenter and archive about every record that was actually stored.

use crate::ports::presenter::FeedPresenter;
use crate::ports::record_archive::RecordArchive;
use feed_domain::{AppendOutcome, LogBuffer, LogRecord};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Buffer shared between the consumer task and the session handle.
pub type SharedBuffer = Arc<Mutex<LogBuffer>>;

pub(crate) fn lock_buffer(buffer: &SharedBuffer) -> MutexGuard<'_, LogBuffer> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct LogFeed {
    buffer: SharedBuffer,
    presenter: Arc<dyn FeedPresenter>,
    archive: Arc<dyn RecordArchive>,
}

impl LogFeed {
    pub fn new(
        buffer: SharedBuffer,
        presenter: Arc<dyn FeedPresenter>,
        archive: Arc<dyn RecordArchive>,
    ) -> Self {
        Self {
            buffer,
            presenter,
            archive,
        }
    }

    pub fn ingest(&self, record: LogRecord) -> AppendOutcome {
        let (outcome, len) = {
            let mut buffer = lock_buffer(&self.buffer);
            let outcome = buffer.append(record.clone());
            (outcome, buffer.len())
        };

        match outcome {
            AppendOutcome::Appended => {
                self.archive.append(&record);
                self.presenter.on_record(&record, len);
            }
            AppendOutcome::Duplicate => {
                debug!("Dropping duplicate record {}", record.timestamp);
            }
            AppendOutcome::Cleared => {
                debug!("Log buffer cleared by control record {}", record.timestamp);
                self.presenter.on_cleared();
            }
        }
        outcome
    }

    pub async fn run(self, mut records: mpsc::UnboundedReceiver<LogRecord>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                record = records.recv() => match record {
                    Some(record) => {
                        self.ingest(record);
                    }
                    None => break,
                },
            }
        }
        debug!("Log feed stopped");
    }
}
