//! HTTP transports for the orchestrator log feed
//!
//! - [`StreamingFeedSource`]: server-sent events, no internal retry
//! - [`PollingFeedSource`]: fixed-interval pulls with a session cursor
//! - [`HttpConnectivityProbe`]: startup reachability check
//!
//! [`build_feed_source`] picks the strategy once, from the deployment context.

mod endpoints;
mod polling;
mod probe;
mod streaming;
mod task;
#[cfg(test)]
mod test_server;

pub use endpoints::OrchestratorEndpoints;
pub use polling::{
    DEFAULT_PAGE_LIMIT, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT, PollCursor,
    PollingFeedSource, PollingOptions,
};
pub use probe::HttpConnectivityProbe;
pub use streaming::{StreamingFeedSource, parse_event_data};

use feed_application::FeedSource;
use feed_domain::{DeploymentContext, TransportMode};
use std::sync::Arc;

/// Construct the feed source for this deployment.
pub fn build_feed_source(
    client: reqwest::Client,
    endpoints: &OrchestratorEndpoints,
    context: &DeploymentContext,
    polling: PollingOptions,
) -> Arc<dyn FeedSource> {
    match context.select_mode() {
        TransportMode::Streaming => Arc::new(StreamingFeedSource::new(client, endpoints)),
        TransportMode::Polling => Arc::new(PollingFeedSource::new(client, endpoints, polling)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;

    #[test]
    fn test_build_feed_source_follows_context() {
        let endpoints = OrchestratorEndpoints::new(Url::parse("http://localhost:3001").unwrap());

        let local = build_feed_source(
            reqwest::Client::new(),
            &endpoints,
            &DeploymentContext::new("localhost"),
            PollingOptions::default(),
        );
        assert_eq!(local.mode(), TransportMode::Streaming);

        let production = build_feed_source(
            reqwest::Client::new(),
            &endpoints,
            &DeploymentContext::new("localhost").with_production(true),
            PollingOptions::default(),
        );
        assert_eq!(production.mode(), TransportMode::Polling);
    }
}
