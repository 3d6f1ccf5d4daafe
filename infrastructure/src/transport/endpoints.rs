//! Orchestrator endpoint layout

use reqwest::Url;

const STREAM_PATH: &str = "api/logs/stream";
const LOGS_PATH: &str = "api/logs";
const HEALTH_PATH: &str = "health";

/// URLs of the orchestrator's log endpoints, derived from its base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorEndpoints {
    base: Url,
}

impl OrchestratorEndpoints {
    pub fn new(mut base: Url) -> Self {
        // Joining relative paths onto "/prefix" would drop "prefix".
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Server-push endpoint (`text/event-stream`)
    pub fn stream_url(&self) -> Url {
        self.join(STREAM_PATH)
    }

    /// Polling endpoint (`?since=&limit=`)
    pub fn logs_url(&self) -> Url {
        self.join(LOGS_PATH)
    }

    pub fn health_url(&self) -> Url {
        self.join(HEALTH_PATH)
    }

    fn join(&self, path: &str) -> Url {
        // `path` is a fixed relative path, joining cannot fail.
        self.base.join(path).unwrap_or_else(|_| self.base.clone())
    }
}
