//! Text classifier mapping log messages to phases.
//!
//! Matching is a case-insensitive substring test against a fixed table,
//! checked in priority order; the first matching row wins. The message
//! wording is an external contract of the orchestrator, so the patterns are
//! kept verbatim.

use super::entities::Phase;

/// Classification table, highest priority first.
const RULES: &[(&[&str], Phase)] = &[
    (&["new video request detected"], Phase::Detecting),
    (&["ap2", "authorization"], Phase::Authorization),
    (&["payment channels opened"], Phase::Channels),
    (&["settlement", "off-chain payment"], Phase::Settlements),
    (&["closing", "channel closed"], Phase::Closing),
    (&["complete payment channel flow finished"], Phase::Complete),
];

/// Classify a message. `None` means no transition (not an error).
pub fn classify(message: &str) -> Option<Phase> {
    let lowered = message.to_lowercase();
    RULES
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| lowered.contains(p)))
        .map(|(_, phase)| *phase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_row_matches() {
        let cases = [
            ("🔔 New video request detected: #12", Phase::Detecting),
            ("Creating AP2 mandate", Phase::Authorization),
            ("Authorization granted for agents", Phase::Authorization),
            ("✅ 3 payment channels opened in 1 tx", Phase::Channels),
            ("Processing settlement for script agent", Phase::Settlements),
            ("Signed off-chain payment of 0.0001 ETH", Phase::Settlements),
            ("Closing channels...", Phase::Closing),
            ("Channel closed by agent 2", Phase::Closing),
            ("COMPLETE PAYMENT CHANNEL FLOW FINISHED", Phase::Complete),
        ];
        for (message, expected) in cases {
            assert_eq!(classify(message), Some(expected), "{message}");
        }
    }

    #[test]
    fn test_priority_order_wins() {
        assert_eq!(
            classify("authorization attached to settlement"),
            Some(Phase::Authorization)
        );
        assert_eq!(
            classify("New video request detected, awaiting AP2"),
            Some(Phase::Detecting)
        );
        // "settlement" (row 4) precedes "closing" (row 5)
        assert_eq!(classify("settlement before closing"), Some(Phase::Settlements));
    }

    #[test]
    fn test_flow_finished_with_closing_word_still_complete() {
        // Row 5 patterns do not appear in the finished marker.
        assert_eq!(
            classify("🎉 Complete payment channel flow finished"),
            Some(Phase::Complete)
        );
    }

    #[test]
    fn test_unmatched_message() {
        assert_eq!(classify("Generating script with LLM"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("PAYMENT CHANNELS OPENED"), Some(Phase::Channels));
        assert_eq!(classify("Ap2 intent"), Some(Phase::Authorization));
    }
}
