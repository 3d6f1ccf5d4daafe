//! Workflow phase entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse workflow stage inferred from the orchestrator's log text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Detecting,
    Authorization,
    Channels,
    Settlements,
    Closing,
    Complete,
}

impl Phase {
    /// Phases shown with a progress bar, in workflow order.
    pub const IN_PROGRESS: [Phase; 5] = [
        Phase::Detecting,
        Phase::Authorization,
        Phase::Channels,
        Phase::Settlements,
        Phase::Closing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Detecting => "detecting",
            Phase::Authorization => "authorization",
            Phase::Channels => "channels",
            Phase::Settlements => "settlements",
            Phase::Closing => "closing",
            Phase::Complete => "complete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Idle => "Ready",
            Phase::Detecting => "Detecting Request",
            Phase::Authorization => "Setting up Authorization",
            Phase::Channels => "Opening Payment Channels",
            Phase::Settlements => "Processing Settlements",
            Phase::Closing => "Closing Channels",
            Phase::Complete => "Complete!",
        }
    }

    /// 1-based position among [`Phase::IN_PROGRESS`], `None` for idle/complete.
    pub fn step(&self) -> Option<usize> {
        Self::IN_PROGRESS
            .iter()
            .position(|p| p == self)
            .map(|i| i + 1)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
