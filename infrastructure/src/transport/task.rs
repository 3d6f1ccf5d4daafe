//! Lifetime of a source's background task

use feed_application::{FeedEvent, FeedSender};
use feed_domain::ConnectionState;
use std::sync::{Mutex, PoisonError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct RunningTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
    events: FeedSender,
}

/// Holds at most one running background task for a feed source.
#[derive(Default)]
pub(crate) struct TaskSlot {
    running: Mutex<Option<RunningTask>>,
}

impl TaskSlot {
    /// Stop whatever is running, then spawn a new task.
    pub(crate) fn replace<F>(&self, events: FeedSender, spawn: F)
    where
        F: FnOnce(CancellationToken) -> JoinHandle<()>,
    {
        self.stop();
        let cancel = CancellationToken::new();
        let handle = spawn(cancel.clone());
        *self.running.lock().unwrap_or_else(PoisonError::into_inner) = Some(RunningTask {
            cancel,
            handle,
            events,
        });
    }

    /// Cancel and abort the running task, reporting `disconnected`.
    ///
    /// Returns `false` if nothing was running.
    pub(crate) fn stop(&self) -> bool {
        let running = self
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match running {
            Some(task) => {
                task.cancel.cancel();
                task.handle.abort();
                let _ = task
                    .events
                    .send(FeedEvent::Connection(ConnectionState::Disconnected));
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        self.stop();
    }
}
