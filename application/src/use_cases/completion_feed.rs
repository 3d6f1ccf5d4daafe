//! Completion consumer
//!
//! Feeds the record stream into a [`CompletionWatcher`] and forwards every
//! "show result" signal to the presenter and the session handle.

use crate::ports::presenter::FeedPresenter;
use feed_domain::{CompletionSignal, CompletionWatcher, LogRecord};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub struct CompletionFeed {
    watcher: CompletionWatcher,
    presenter: Arc<dyn FeedPresenter>,
    signals: mpsc::UnboundedSender<CompletionSignal>,
}

impl CompletionFeed {
    pub fn new(
        presenter: Arc<dyn FeedPresenter>,
    ) -> (Self, mpsc::UnboundedReceiver<CompletionSignal>) {
        let (signals, rx) = mpsc::unbounded_channel();
        let feed = Self {
            watcher: CompletionWatcher::new(),
            presenter,
            signals,
        };
        (feed, rx)
    }

    pub fn handle_record(&mut self, record: &LogRecord) -> Option<CompletionSignal> {
        let signal = self.watcher.observe(record)?;
        info!(
            "Result ready: {} (request {})",
            signal.url,
            signal.request_id.as_deref().unwrap_or("unknown")
        );
        self.presenter.on_result_ready(&signal);
        // Nobody listening for signals is fine.
        let _ = self.signals.send(signal.clone());
        Some(signal)
    }

    pub async fn run(
        mut self,
        mut records: mpsc::UnboundedReceiver<LogRecord>,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                record = records.recv() => match record {
                    Some(record) => {
                        self.handle_record(&record);
                    }
                    None => break,
                },
            }
        }
        debug!("Completion feed stopped");
    }
}
