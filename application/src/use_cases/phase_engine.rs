//! Phase inference engine
//!
//! Consumes the record stream, drives a [`PhaseTracker`], and owns the
//! delayed reset from `complete` back to `idle`. The reset is an explicit
//! timer held by the engine: any later transition disarms it, and the
//! tracker's generation check rejects it if it was armed for an older
//! `complete`.

use crate::ports::presenter::FeedPresenter;
use feed_domain::{LogRecord, Phase, PhaseTracker, PhaseTransition};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// What the status display shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseSnapshot {
    pub phase: Phase,
    /// True from `detecting` until the auto-reset to idle fires.
    pub processing: bool,
}

impl PhaseSnapshot {
    /// Nothing to show: idle and not processing.
    pub fn is_hidden(&self) -> bool {
        !self.processing && self.phase == Phase::Idle
    }
}

/// Pending auto-reset: deadline plus the tracker generation it was armed at.
#[derive(Debug, Default, Clone, Copy)]
struct ResetTimer {
    armed: Option<(Instant, u64)>,
}

impl ResetTimer {
    fn arm(&mut self, delay: Duration, generation: u64) {
        self.armed = Some((Instant::now() + delay, generation));
    }

    fn cancel(&mut self) {
        self.armed = None;
    }
}

/// Resolves with the armed generation at the deadline; never if unarmed.
async fn reset_due(armed: Option<(Instant, u64)>) -> u64 {
    match armed {
        Some((deadline, generation)) => {
            sleep_until(deadline).await;
            generation
        }
        None => std::future::pending().await,
    }
}

pub struct PhaseEngine {
    tracker: PhaseTracker,
    reset_delay: Duration,
    timer: ResetTimer,
    snapshot: watch::Sender<PhaseSnapshot>,
    presenter: Arc<dyn FeedPresenter>,
}

impl PhaseEngine {
    pub fn new(
        reset_delay: Duration,
        presenter: Arc<dyn FeedPresenter>,
    ) -> (Self, watch::Receiver<PhaseSnapshot>) {
        let (snapshot, rx) = watch::channel(PhaseSnapshot::default());
        let engine = Self {
            tracker: PhaseTracker::new(),
            reset_delay,
            timer: ResetTimer::default(),
            snapshot,
            presenter,
        };
        (engine, rx)
    }

    pub fn snapshot(&self) -> PhaseSnapshot {
        PhaseSnapshot {
            phase: self.tracker.phase(),
            processing: self.tracker.is_processing(),
        }
    }

    pub fn reset_pending(&self) -> bool {
        self.timer.armed.is_some()
    }

    /// Classify one record and apply the resulting transition, if any.
    pub fn handle_record(&mut self, record: &LogRecord) -> Option<PhaseTransition> {
        let transition = self.tracker.observe(record)?;

        // Any transition supersedes a pending reset.
        self.timer.cancel();
        if transition.schedules_reset() {
            self.timer.arm(self.reset_delay, transition.generation);
            debug!(
                "Auto-reset armed for generation {} in {:?}",
                transition.generation, self.reset_delay
            );
        }

        self.publish(transition);
        Some(transition)
    }

    /// Apply a reset that came due for `generation`.
    pub fn handle_reset(&mut self, generation: u64) -> Option<PhaseTransition> {
        self.timer.cancel();
        match self.tracker.reset_if_current(generation) {
            Some(transition) => {
                self.publish(transition);
                Some(transition)
            }
            None => {
                debug!("Discarding stale auto-reset for generation {}", generation);
                None
            }
        }
    }

    /// Process records in arrival order until the stream ends or `cancel` fires.
    pub async fn run(
        mut self,
        mut records: mpsc::UnboundedReceiver<LogRecord>,
        cancel: CancellationToken,
    ) {
        loop {
            let armed = self.timer.armed;
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                record = records.recv() => match record {
                    Some(record) => {
                        self.handle_record(&record);
                    }
                    None => break,
                },
                generation = reset_due(armed) => {
                    self.handle_reset(generation);
                }
            }
        }
        debug!("Phase engine stopped");
    }

    fn publish(&self, transition: PhaseTransition) {
        let snapshot = self.snapshot();
        if transition.from != transition.to {
            info!("Phase: {} -> {}", transition.from.as_str(), transition.to.as_str());
        }
        self.snapshot.send_replace(snapshot);
        self.presenter.on_phase_change(snapshot);
    }
}
