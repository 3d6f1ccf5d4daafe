//! Completion detection
//!
//! [`CompletionWatcher`] joins two facts that may arrive in either order: a
//! finished marker and a result URL. When both are known it yields a single
//! [`CompletionSignal`] and forgets both, so the next pair can fire again.
//! A newly detected request also forgets both, so a marker left over from a
//! run that never produced a URL cannot pair with the next run's URL.

use super::patterns::{extract_request_id, extract_video_url, is_finished_marker};
use crate::phase::{Phase, classify};
use crate::record::LogRecord;
use serde::Serialize;

/// One-shot "show result" signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionSignal {
    pub url: String,
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CompletionWatcher {
    finished: bool,
    url: Option<String>,
    request_id: Option<String>,
}

impl CompletionWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_finished_marker(&self) -> bool {
        self.finished
    }

    pub fn pending_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Feed one record; returns the signal when both facts are now known.
    pub fn observe(&mut self, record: &LogRecord) -> Option<CompletionSignal> {
        if record.is_clear() {
            return None;
        }
        let message = record.message.as_str();

        if classify(message) == Some(Phase::Detecting) {
            self.finished = false;
            self.url = None;
        }
        if let Some(url) = extract_video_url(message) {
            self.url = Some(url.to_string());
        }
        if let Some(id) = extract_request_id(message) {
            self.request_id = Some(id.to_string());
        }
        if is_finished_marker(message) {
            self.finished = true;
        }

        if !self.finished {
            return None;
        }
        let url = self.url.take()?;
        self.finished = false;
        Some(CompletionSignal {
            url,
            request_id: self.request_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LogKind;

    fn rec(text: &str) -> LogRecord {
        LogRecord::new("t", LogKind::Success, text)
    }

    const URL_MSG: &str =
        "✅ Video Generation Complete! Video URL: https://cdn.example.com/v/77.mp4";
    const DONE_MSG: &str = "COMPLETE PAYMENT CHANNEL FLOW FINISHED";

    #[test]
    fn test_url_then_marker() {
        let mut watcher = CompletionWatcher::new();
        assert!(watcher.observe(&rec(URL_MSG)).is_none());
        let signal = watcher.observe(&rec(DONE_MSG)).unwrap();
        assert_eq!(signal.url, "https://cdn.example.com/v/77.mp4");
        assert_eq!(signal.request_id, None);
    }

    #[test]
    fn test_marker_then_url() {
        let mut watcher = CompletionWatcher::new();
        assert!(watcher.observe(&rec(DONE_MSG)).is_none());
        assert!(watcher.has_finished_marker());
        let signal = watcher.observe(&rec(URL_MSG)).unwrap();
        assert_eq!(signal.url, "https://cdn.example.com/v/77.mp4");
    }

    #[test]
    fn test_fires_once_per_pair() {
        let mut watcher = CompletionWatcher::new();
        let mut fired = 0;
        for text in [URL_MSG, DONE_MSG, DONE_MSG, "idle chatter"] {
            if watcher.observe(&rec(text)).is_some() {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert!(watcher.pending_url().is_none());
    }

    #[test]
    fn test_next_pair_fires_again() {
        let mut watcher = CompletionWatcher::new();
        watcher.observe(&rec(URL_MSG));
        assert!(watcher.observe(&rec(DONE_MSG)).is_some());

        watcher.observe(&rec("Video URL: https://cdn.example.com/v/78.mp4"));
        let second = watcher.observe(&rec("Request 78 FULLY COMPLETED")).unwrap();
        assert_eq!(second.url, "https://cdn.example.com/v/78.mp4");
    }

    #[test]
    fn test_request_id_attached_when_seen() {
        let mut watcher = CompletionWatcher::new();
        watcher.observe(&rec("Video request submitted! Request ID: 1234"));
        watcher.observe(&rec(URL_MSG));
        let signal = watcher.observe(&rec(DONE_MSG)).unwrap();
        assert_eq!(signal.request_id.as_deref(), Some("1234"));
    }

    #[test]
    fn test_latest_url_wins_before_marker() {
        let mut watcher = CompletionWatcher::new();
        watcher.observe(&rec("Video URL: https://a.test/1.mp4"));
        watcher.observe(&rec("Video URL: https://a.test/2.mp4"));
        let signal = watcher.observe(&rec(DONE_MSG)).unwrap();
        assert_eq!(signal.url, "https://a.test/2.mp4");
    }

    #[test]
    fn test_url_and_marker_in_one_message() {
        let mut watcher = CompletionWatcher::new();
        let signal = watcher
            .observe(&rec("FULLY COMPLETED. Video URL: https://a.test/x.mp4"))
            .unwrap();
        assert_eq!(signal.url, "https://a.test/x.mp4");
    }

    #[test]
    fn test_new_request_drops_unpaired_marker() {
        let mut watcher = CompletionWatcher::new();
        assert!(watcher.observe(&rec(DONE_MSG)).is_none());
        assert!(watcher.has_finished_marker());

        watcher.observe(&rec("🔔 New video request detected: #13"));
        assert!(!watcher.has_finished_marker());

        // The new run's URL waits for its own marker.
        assert!(watcher.observe(&rec(URL_MSG)).is_none());
        let signal = watcher.observe(&rec(DONE_MSG)).unwrap();
        assert_eq!(signal.url, "https://cdn.example.com/v/77.mp4");
    }

    #[test]
    fn test_request_id_in_detection_message_is_kept() {
        let mut watcher = CompletionWatcher::new();
        watcher.observe(&rec("New video request detected. Request ID: 77"));
        watcher.observe(&rec(URL_MSG));
        let signal = watcher.observe(&rec(DONE_MSG)).unwrap();
        assert_eq!(signal.request_id.as_deref(), Some("77"));
    }

    #[test]
    fn test_clear_record_ignored() {
        let mut watcher = CompletionWatcher::new();
        let clear = LogRecord::new("t", LogKind::Clear, DONE_MSG);
        assert!(watcher.observe(&clear).is_none());
        assert!(!watcher.has_finished_marker());
    }
}
