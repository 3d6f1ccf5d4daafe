//! Polling feed source
//!
//! Pulls `GET /api/logs?since=<cursor>&limit=<n>` on a fixed interval. The
//! first pull happens immediately. Records already seen this session are
//! filtered out before the cursor advances. A failed pull reports
//! `disconnected` and is simply retried on the next tick: no backoff, no
//! retry cap, until `stop`.

use super::endpoints::OrchestratorEndpoints;
use super::task::TaskSlot;
use feed_application::{FeedError, FeedEvent, FeedSender, FeedSource};
use feed_domain::{ConnectionState, LogRecord, TransportMode};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_PAGE_LIMIT: u32 = 100;
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingOptions {
    pub interval: Duration,
    pub limit: u32,
    /// A pull still unanswered after this counts as failed.
    pub timeout: Duration,
}

impl Default for PollingOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            limit: DEFAULT_PAGE_LIMIT,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

/// Session-wide polling cursor.
///
/// Remembers every timestamp delivered so far and the highest one, which
/// becomes the `since` parameter of the next pull.
#[derive(Debug, Clone, Default)]
pub struct PollCursor {
    seen: HashSet<String>,
    since: Option<String>,
}

impl PollCursor {
    pub fn since(&self) -> Option<&str> {
        self.since.as_deref()
    }

    /// Keep only unseen records (in page order) and advance the cursor.
    pub fn accept(&mut self, page: Vec<LogRecord>) -> Vec<LogRecord> {
        let fresh: Vec<LogRecord> = page
            .into_iter()
            .filter(|record| self.seen.insert(record.timestamp.clone()))
            .collect();

        if let Some(max) = fresh.iter().map(|r| r.timestamp.as_str()).max()
            && self.since.as_deref().is_none_or(|since| max > since)
        {
            self.since = Some(max.to_string());
        }
        fresh
    }
}

/// Response body of the polling endpoint
#[derive(Debug, Deserialize)]
struct LogPage {
    #[serde(default)]
    logs: Vec<Value>,
}

impl LogPage {
    fn into_records(self) -> Vec<LogRecord> {
        self.logs
            .into_iter()
            .filter_map(|value| match LogRecord::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!("Dropping malformed polled record: {}", e);
                    None
                }
            })
            .collect()
    }
}

/// Feed source backed by periodic pulls
pub struct PollingFeedSource {
    client: reqwest::Client,
    url: Url,
    options: PollingOptions,
    task: TaskSlot,
}

impl PollingFeedSource {
    pub fn new(
        client: reqwest::Client,
        endpoints: &OrchestratorEndpoints,
        options: PollingOptions,
    ) -> Self {
        Self {
            client,
            url: endpoints.logs_url(),
            options,
            task: TaskSlot::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }
}

impl FeedSource for PollingFeedSource {
    fn mode(&self) -> TransportMode {
        TransportMode::Polling
    }

    fn start(&self, events: FeedSender) {
        let client = self.client.clone();
        let url = self.url.clone();
        let options = self.options;
        let task_events = events.clone();
        self.task.replace(events, move |cancel| {
            tokio::spawn(poll_loop(client, url, options, task_events, cancel))
        });
    }

    fn stop(&self) {
        if self.task.stop() {
            debug!("Stopped log polling");
        }
    }
}

async fn poll_loop(
    client: reqwest::Client,
    url: Url,
    options: PollingOptions,
    events: FeedSender,
    cancel: CancellationToken,
) {
    let mut cursor = PollCursor::default();
    let mut ticker = tokio::time::interval(options.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let _ = events.send(FeedEvent::Connection(ConnectionState::Connecting));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let pulled = tokio::select! {
            _ = cancel.cancelled() => break,
            pulled = fetch_page(&client, &url, cursor.since(), &options) => pulled,
        };

        match pulled {
            Ok(page) => {
                let fresh = cursor.accept(page);
                if !fresh.is_empty() {
                    debug!("Polled {} new records", fresh.len());
                }
                let _ = events.send(FeedEvent::Connection(ConnectionState::Connected));
                for record in fresh {
                    if events.send(FeedEvent::Record(record)).is_err() {
                        return;
                    }
                }
            }
            Err(e) => {
                warn!("Failed to fetch logs: {}", e);
                if events
                    .send(FeedEvent::Connection(ConnectionState::Disconnected))
                    .is_err()
                {
                    return;
                }
            }
        }
    }
}

async fn fetch_page(
    client: &reqwest::Client,
    url: &Url,
    since: Option<&str>,
    options: &PollingOptions,
) -> Result<Vec<LogRecord>, FeedError> {
    let mut request = client.get(url.clone()).timeout(options.timeout);
    if let Some(since) = since {
        request = request.query(&[("since", since)]);
    }
    let response = request
        .query(&[("limit", options.limit)])
        .send()
        .await
        .map_err(|e| FeedError::ConnectionError(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::HttpStatus(status.as_u16()));
    }

    let page: LogPage = response
        .json()
        .await
        .map_err(|e| FeedError::Decode(e.to_string()))?;
    Ok(page.into_records())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::test_server::{StubResponse, StubServer, collect_until};
    use feed_domain::LogKind;
    use tokio::sync::mpsc;

    fn rec(ts: &str) -> LogRecord {
        LogRecord::new(ts, LogKind::Info, format!("record {ts}"))
    }

    fn page(timestamps: &[&str]) -> String {
        let logs: Vec<Value> = timestamps
            .iter()
            .map(|ts| serde_json::to_value(rec(ts)).unwrap())
            .collect();
        serde_json::json!({ "logs": logs }).to_string()
    }

    fn fast() -> PollingOptions {
        PollingOptions {
            interval: Duration::from_millis(20),
            limit: DEFAULT_PAGE_LIMIT,
            timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_cursor_filters_repeats_and_advances() {
        let mut cursor = PollCursor::default();
        assert_eq!(cursor.since(), None);

        let first = cursor.accept(["t1", "t2", "t3", "t4", "t5"].map(rec).to_vec());
        assert_eq!(first.len(), 5);
        assert_eq!(cursor.since(), Some("t5"));

        let second = cursor.accept(["t3", "t4", "t5", "t6", "t7"].map(rec).to_vec());
        let timestamps: Vec<_> = second.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(timestamps, vec!["t6", "t7"]);
        assert_eq!(cursor.since(), Some("t7"));
    }

    #[test]
    fn test_cursor_never_moves_backwards() {
        let mut cursor = PollCursor::default();
        cursor.accept(vec![rec("2025-01-01T00:00:09Z")]);
        cursor.accept(vec![rec("2025-01-01T00:00:03Z")]);
        assert_eq!(cursor.since(), Some("2025-01-01T00:00:09Z"));
    }

    #[test]
    fn test_cursor_empty_page_keeps_position() {
        let mut cursor = PollCursor::default();
        cursor.accept(vec![rec("t1")]);
        assert!(cursor.accept(vec![]).is_empty());
        assert_eq!(cursor.since(), Some("t1"));
    }

    #[test]
    fn test_page_drops_malformed_entries() {
        let page: LogPage = serde_json::from_str(
            r#"{"logs":[{"timestamp":"t1","type":"info","message":"ok"},{"bad":true}]}"#,
        )
        .unwrap();
        assert_eq!(page.into_records().len(), 1);

        let empty: LogPage = serde_json::from_str("{}").unwrap();
        assert!(empty.into_records().is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_pages_yield_only_new_records() {
        let server = StubServer::start(
            vec![
                StubResponse::json(page(&["t1", "t2", "t3", "t4", "t5"])),
                StubResponse::json(page(&["t3", "t4", "t5", "t6", "t7"])),
            ],
            Some(StubResponse::json(page(&[]))),
        )
        .await;
        let endpoints = OrchestratorEndpoints::new(server.base_url());
        let source = PollingFeedSource::new(reqwest::Client::new(), &endpoints, fast());

        let (tx, mut rx) = mpsc::unbounded_channel();
        source.start(tx);

        let events = collect_until(&mut rx, |e| {
            matches!(e, FeedEvent::Record(r) if r.timestamp == "t7")
        })
        .await;
        source.stop();

        let timestamps: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                FeedEvent::Record(r) => Some(r.timestamp.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(timestamps, vec!["t1", "t2", "t3", "t4", "t5", "t6", "t7"]);

        let requests = server.requests();
        assert_eq!(requests[0], "GET /api/logs?limit=100 HTTP/1.1");
        assert_eq!(requests[1], "GET /api/logs?since=t5&limit=100 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_failed_pull_disconnects_then_recovers() {
        let server = StubServer::start(
            vec![StubResponse::status(500), StubResponse::json(page(&["t1"]))],
            Some(StubResponse::json(page(&[]))),
        )
        .await;
        let endpoints = OrchestratorEndpoints::new(server.base_url());
        let source = PollingFeedSource::new(reqwest::Client::new(), &endpoints, fast());

        let (tx, mut rx) = mpsc::unbounded_channel();
        source.start(tx);

        let events = collect_until(&mut rx, |e| matches!(e, FeedEvent::Record(_))).await;
        source.stop();

        let states: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                FeedEvent::Connection(s) => Some(*s),
                _ => None,
            })
            .collect();
        assert_eq!(
            states,
            vec![
                ConnectionState::Connecting,
                ConnectionState::Disconnected,
                ConnectionState::Connected
            ]
        );
    }

    #[tokio::test]
    async fn test_unanswered_pull_times_out_and_next_tick_retries() {
        let server = StubServer::unresponsive().await;
        let endpoints = OrchestratorEndpoints::new(server.base_url());
        let options = PollingOptions {
            interval: Duration::from_millis(50),
            limit: DEFAULT_PAGE_LIMIT,
            timeout: Duration::from_millis(100),
        };
        let source = PollingFeedSource::new(reqwest::Client::new(), &endpoints, options);

        let (tx, mut rx) = mpsc::unbounded_channel();
        source.start(tx);

        let events = collect_until(&mut rx, |e| {
            *e == FeedEvent::Connection(ConnectionState::Disconnected)
        })
        .await;
        assert_eq!(
            events,
            vec![
                FeedEvent::Connection(ConnectionState::Connecting),
                FeedEvent::Connection(ConnectionState::Disconnected)
            ]
        );

        tokio::time::sleep(Duration::from_millis(600)).await;
        source.stop();
        assert!(server.requests().len() >= 3, "{:?}", server.requests());
    }

    #[tokio::test]
    async fn test_stop_halts_polling() {
        let server = StubServer::start(vec![], Some(StubResponse::json(page(&[])))).await;
        let endpoints = OrchestratorEndpoints::new(server.base_url());
        let source = PollingFeedSource::new(reqwest::Client::new(), &endpoints, fast());

        source.stop();
        let (tx, mut rx) = mpsc::unbounded_channel();
        source.start(tx);
        collect_until(&mut rx, |e| {
            *e == FeedEvent::Connection(ConnectionState::Connected)
        })
        .await;

        source.stop();
        source.stop();
        assert!(!source.is_running());

        tokio::time::sleep(Duration::from_millis(60)).await;
        let after_stop = server.requests().len();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(server.requests().len(), after_stop);
    }
}
