//! HTTP connectivity probe

use super::endpoints::OrchestratorEndpoints;
use async_trait::async_trait;
use feed_application::{ConnectivityProbe, ProbeReport};
use reqwest::Url;
use std::time::Duration;

/// One-shot `GET /health` check. Any HTTP answer counts as reachable.
pub struct HttpConnectivityProbe {
    client: reqwest::Client,
    url: Url,
    timeout: Duration,
}

impl HttpConnectivityProbe {
    pub fn new(client: reqwest::Client, endpoints: &OrchestratorEndpoints, timeout: Duration) -> Self {
        Self {
            client,
            url: endpoints.health_url(),
            timeout,
        }
    }
}

#[async_trait]
impl ConnectivityProbe for HttpConnectivityProbe {
    async fn probe(&self) -> ProbeReport {
        match self
            .client
            .get(self.url.clone())
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => ProbeReport::Reachable {
                status: response.status().as_u16(),
            },
            Err(e) => ProbeReport::Unreachable {
                reason: e.to_string(),
            },
        }
    }
}
