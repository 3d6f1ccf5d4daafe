//! Console formatting for feed records and results

use colored::{ColoredString, Colorize};
use feed_domain::{CompletionSignal, ConnectionState, LogKind, LogRecord};

/// Formats feed output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Single-character marker shown before each log line
    pub fn prefix(kind: LogKind) -> &'static str {
        match kind {
            LogKind::Success => "✓",
            LogKind::Error => "✗",
            LogKind::Warning => "⚠",
            LogKind::Transaction => "⛓",
            LogKind::Channel => "📡",
            LogKind::Settlement => "💰",
            LogKind::Connected => "🔌",
            LogKind::Info | LogKind::Clear => "›",
        }
    }

    fn paint(kind: LogKind, text: &str) -> ColoredString {
        match kind {
            LogKind::Success => text.green(),
            LogKind::Error => text.red(),
            LogKind::Warning => text.yellow(),
            LogKind::Transaction => text.blue(),
            LogKind::Channel => text.purple(),
            LogKind::Settlement => text.cyan(),
            LogKind::Connected => text.bright_green(),
            LogKind::Info | LogKind::Clear => text.normal(),
        }
    }

    /// Local wall-clock time for ISO-8601 timestamps; the raw value otherwise.
    pub fn time_of(timestamp: &str) -> String {
        match chrono::DateTime::parse_from_rfc3339(timestamp) {
            Ok(at) => at
                .with_timezone(&chrono::Local)
                .format("%H:%M:%S")
                .to_string(),
            Err(_) => timestamp.to_string(),
        }
    }

    /// One terminal line for a record
    pub fn format_record(record: &LogRecord) -> String {
        format!(
            "{} {} {}",
            Self::time_of(&record.timestamp).dimmed(),
            Self::paint(record.kind, Self::prefix(record.kind)),
            Self::paint(record.kind, &record.message)
        )
    }

    /// Status line: connection indicator plus how many entries are shown
    pub fn format_connection(state: ConnectionState, entries: usize) -> String {
        let dot = match state {
            ConnectionState::Connected => "●".green(),
            ConnectionState::Connecting => "●".yellow(),
            ConnectionState::Disconnected => "●".red(),
        };
        format!(
            "{} {} {}",
            dot,
            state.indicator().bold(),
            format!("({})", Self::format_entry_count(entries)).dimmed()
        )
    }

    /// Marker printed when the log is emptied
    pub fn format_cleared(dropped: usize) -> String {
        format!("── log cleared, {} removed ──", Self::format_entry_count(dropped))
            .dimmed()
            .to_string()
    }

    pub fn format_entry_count(count: usize) -> String {
        let noun = if count == 1 { "entry" } else { "entries" };
        format!("{} {}", count, noun)
    }

    /// Result panel shown when the completion signal fires
    pub fn format_result(signal: &CompletionSignal) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Your AI-Generated Video"));
        output.push('\n');
        if let Some(id) = &signal.request_id {
            output.push_str(&format!("{} {}\n", "Request ID:".cyan().bold(), id));
        }
        output.push_str(&format!("{} {}\n", "Video URL:".cyan().bold(), signal.url));
        let file_name = format!("video-{}.mp4", signal.request_id.as_deref().unwrap_or("latest"));
        output.push_str(&format!(
            "{} curl -L -o {} {}\n",
            "Download:".cyan().bold(),
            file_name,
            signal.url
        ));
        output.push_str(&Self::footer());
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}
