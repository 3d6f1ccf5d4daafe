//! Console presenter: renders the feed to the terminal

use super::console::ConsoleFormatter;
use crate::progress::PhaseIndicator;
use colored::Colorize;
use feed_application::{FeedPresenter, PhaseSnapshot};
use feed_domain::{CompletionSignal, ConnectionState, LogRecord};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Renders log lines, connection changes, phase progress and results.
///
/// With `show_progress` off, phase changes are printed as plain lines
/// instead of driving a progress bar. The buffered entry count is shown on
/// every connection status line and when the log is cleared.
pub struct ConsolePresenter {
    indicator: PhaseIndicator,
    show_progress: bool,
    entries: AtomicUsize,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self {
            indicator: PhaseIndicator::new(),
            show_progress: true,
            entries: AtomicUsize::new(0),
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn print(&self, line: &str) {
        self.indicator.println(line);
    }
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedPresenter for ConsolePresenter {
    fn on_record(&self, record: &LogRecord, buffered: usize) {
        self.entries.store(buffered, Ordering::Relaxed);
        self.print(&ConsoleFormatter::format_record(record));
    }

    fn on_cleared(&self) {
        let dropped = self.entries.swap(0, Ordering::Relaxed);
        self.print(&ConsoleFormatter::format_cleared(dropped));
    }

    fn on_connection_change(&self, state: ConnectionState) {
        let entries = self.entries.load(Ordering::Relaxed);
        self.print(&ConsoleFormatter::format_connection(state, entries));
    }

    fn on_phase_change(&self, snapshot: PhaseSnapshot) {
        if self.show_progress {
            self.indicator.update(snapshot);
        } else if !snapshot.is_hidden() {
            self.print(&format!(
                "{} {}",
                "->".cyan(),
                snapshot.phase.display_name().bold()
            ));
        }
    }

    fn on_result_ready(&self, signal: &CompletionSignal) {
        self.print(&ConsoleFormatter::format_result(signal));
    }
}

/// Prints only result panels (for `--quiet`)
pub struct ResultOnlyPresenter;

impl FeedPresenter for ResultOnlyPresenter {
    fn on_record(&self, _record: &LogRecord, _buffered: usize) {}
    fn on_cleared(&self) {}
    fn on_connection_change(&self, _state: ConnectionState) {}
    fn on_phase_change(&self, _snapshot: PhaseSnapshot) {}

    fn on_result_ready(&self, signal: &CompletionSignal) {
        println!("{}", ConsoleFormatter::format_result(signal));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_domain::LogKind;

    #[test]
    fn test_entry_count_follows_buffer() {
        let presenter = ConsolePresenter::new().with_progress(false);
        presenter.on_record(&LogRecord::new("t1", LogKind::Info, "a"), 1);
        presenter.on_record(&LogRecord::new("t2", LogKind::Info, "b"), 2);
        assert_eq!(presenter.entries.load(Ordering::Relaxed), 2);

        presenter.on_cleared();
        assert_eq!(presenter.entries.load(Ordering::Relaxed), 0);
    }
}
