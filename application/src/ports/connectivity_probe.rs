//! Connectivity probe port
//!
//! A one-shot reachability check made at startup. The result is for
//! diagnostics only and never drives transport selection.

use async_trait::async_trait;

/// Outcome of a reachability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeReport {
    Reachable { status: u16 },
    Unreachable { reason: String },
}

impl ProbeReport {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeReport::Reachable { .. })
    }
}

#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn probe(&self) -> ProbeReport;
}
