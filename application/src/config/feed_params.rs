//! Feed parameters: consumer behaviour that is not transport specific.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay before a `complete` phase falls back to idle.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(5);

/// Parameters controlling how a feed session consumes records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedParams {
    /// Time from reaching `complete` until the automatic reset to idle.
    pub reset_delay: Duration,
    /// Maximum records kept for display; `None` keeps everything.
    pub buffer_capacity: Option<usize>,
}

impl Default for FeedParams {
    fn default() -> Self {
        Self {
            reset_delay: DEFAULT_RESET_DELAY,
            buffer_capacity: None,
        }
    }
}

impl FeedParams {
    // ==================== Builder Methods ====================

    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: Option<usize>) -> Self {
        self.buffer_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = FeedParams::default();
        assert_eq!(params.reset_delay, Duration::from_secs(5));
        assert_eq!(params.buffer_capacity, None);
    }

    #[test]
    fn test_builder_chaining() {
        let params = FeedParams::default()
            .with_reset_delay(Duration::from_millis(250))
            .with_buffer_capacity(Some(500));
        assert_eq!(params.reset_delay, Duration::from_millis(250));
        assert_eq!(params.buffer_capacity, Some(500));
    }
}
