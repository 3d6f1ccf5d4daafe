//! Phase state machine
//!
//! [`PhaseTracker`] is the synchronous core of phase inference. It applies
//! classified transitions unconditionally and hands out a generation number
//! with every transition. A delayed reset to idle is only honoured when it
//! carries the current generation, so a timer armed for an earlier
//! `complete` can never reset a later phase.

use super::classifier::classify;
use super::entities::Phase;
use crate::record::LogRecord;

/// A phase change produced by [`PhaseTracker::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
    /// Generation the tracker is at after this transition.
    pub generation: u64,
}

impl PhaseTransition {
    /// Whether an auto-reset to idle must be scheduled for this transition.
    pub fn schedules_reset(&self) -> bool {
        self.to == Phase::Complete
    }
}

#[derive(Debug, Clone, Default)]
pub struct PhaseTracker {
    phase: Phase,
    processing: bool,
    generation: u64,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True from entering `detecting` until the auto-reset fires.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Feed one record. Clear records and unmatched messages yield `None`.
    pub fn observe(&mut self, record: &LogRecord) -> Option<PhaseTransition> {
        if record.is_clear() {
            return None;
        }
        let to = classify(&record.message)?;
        Some(self.transition(to))
    }

    /// Apply the delayed reset armed at `generation`.
    ///
    /// Returns the transition to idle, or `None` if anything happened since
    /// the reset was armed.
    pub fn reset_if_current(&mut self, generation: u64) -> Option<PhaseTransition> {
        if generation != self.generation || self.phase != Phase::Complete {
            return None;
        }
        self.processing = false;
        Some(self.transition(Phase::Idle))
    }

    fn transition(&mut self, to: Phase) -> PhaseTransition {
        let from = self.phase;
        self.phase = to;
        self.generation += 1;
        if to == Phase::Detecting {
            self.processing = true;
        }
        PhaseTransition {
            from,
            to,
            generation: self.generation,
        }
    }
}
