//! Extraction of result facts from orchestrator messages.

use regex::Regex;
use std::sync::LazyLock;

static VIDEO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Video URL:\s*(https?://\S+)").expect("static video url pattern")
});

static REQUEST_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Request ID:\s*(\d+)").expect("static request id pattern"));

/// Markers the orchestrator prints once the whole flow is done.
const FINISHED_MARKERS: [&str; 2] = ["COMPLETE PAYMENT CHANNEL FLOW FINISHED", "FULLY COMPLETED"];

pub fn extract_video_url(message: &str) -> Option<&str> {
    VIDEO_URL
        .captures(message)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub fn extract_request_id(message: &str) -> Option<&str> {
    REQUEST_ID
        .captures(message)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Case-sensitive, matching the orchestrator's upper-case banner.
pub fn is_finished_marker(message: &str) -> bool {
    FINISHED_MARKERS.iter().any(|m| message.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_url_up_to_whitespace() {
        let msg = "✅ Video Generation Complete! Video URL: https://cdn.example.com/v/77.mp4 (ready)";
        assert_eq!(extract_video_url(msg), Some("https://cdn.example.com/v/77.mp4"));
        assert_eq!(
            extract_video_url("Video URL:http://x.test/a"),
            Some("http://x.test/a")
        );
        assert_eq!(extract_video_url("Video URL: ftp://x.test/a"), None);
        assert_eq!(extract_video_url("video url: https://x.test/a"), None);
    }

    #[test]
    fn extracts_numeric_request_id() {
        assert_eq!(extract_request_id("Request ID: 42 submitted"), Some("42"));
        assert_eq!(extract_request_id("Request ID: abc"), None);
    }

    #[test]
    fn finished_markers_are_case_sensitive() {
        assert!(is_finished_marker("🎉 COMPLETE PAYMENT CHANNEL FLOW FINISHED 🎉"));
        assert!(is_finished_marker("Request 7 FULLY COMPLETED"));
        assert!(!is_finished_marker("complete payment channel flow finished"));
    }
}
