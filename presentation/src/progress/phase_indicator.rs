//! Phase indicator: a spinner with a five-step progress bar

use colored::Colorize;
use feed_application::PhaseSnapshot;
use feed_domain::Phase;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Shows the current phase while a request is being processed.
///
/// The bar only exists while there is something to show; lines printed
/// through [`PhaseIndicator::println`] appear above it.
pub struct PhaseIndicator {
    bar: Mutex<Option<ProgressBar>>,
}

impl PhaseIndicator {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    pub fn update(&self, snapshot: PhaseSnapshot) {
        let mut slot = self.bar.lock().unwrap_or_else(PoisonError::into_inner);

        if snapshot.is_hidden() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
            return;
        }

        let bar = slot.get_or_insert_with(|| {
            let bar = ProgressBar::new(Phase::IN_PROGRESS.len() as u64);
            bar.set_style(Self::style());
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        });

        let phase = snapshot.phase;
        bar.set_prefix(phase.display_name());
        match phase.step() {
            Some(step) => {
                bar.set_position(step as u64);
                bar.set_message("Watch the log for details");
            }
            None if phase == Phase::Complete => {
                bar.set_position(Phase::IN_PROGRESS.len() as u64);
                bar.set_message("Complete!".green().to_string());
            }
            None => bar.set_message(""),
        }
    }

    /// Print a line without tearing the bar.
    pub fn println(&self, line: &str) {
        let slot = self.bar.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(bar) => bar.suspend(|| println!("{}", line)),
            None => println!("{}", line),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Default for PhaseIndicator {
    fn default() -> Self {
        Self::new()
    }
}
