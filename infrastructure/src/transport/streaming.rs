//! Server-push feed source
//!
//! Opens one `text/event-stream` connection and turns each event's `data`
//! into a [`LogRecord`]. Malformed payloads are dropped. Any transport error
//! or end of stream reports `disconnected`; reconnecting is left to the
//! caller (`stop` then `start`).

use super::endpoints::OrchestratorEndpoints;
use super::task::TaskSlot;
use eventsource_stream::Eventsource;
use feed_application::{FeedError, FeedEvent, FeedSender, FeedSource};
use feed_domain::{ConnectionState, LogRecord, TransportMode};
use futures::StreamExt;
use reqwest::Url;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Feed source backed by server-sent events
pub struct StreamingFeedSource {
    client: reqwest::Client,
    url: Url,
    task: TaskSlot,
}

impl StreamingFeedSource {
    pub fn new(client: reqwest::Client, endpoints: &OrchestratorEndpoints) -> Self {
        Self {
            client,
            url: endpoints.stream_url(),
            task: TaskSlot::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }
}

impl FeedSource for StreamingFeedSource {
    fn mode(&self) -> TransportMode {
        TransportMode::Streaming
    }

    fn start(&self, events: FeedSender) {
        let client = self.client.clone();
        let url = self.url.clone();
        let task_events = events.clone();
        self.task.replace(events, move |cancel| {
            tokio::spawn(run_stream(client, url, task_events, cancel))
        });
    }

    fn stop(&self) {
        if self.task.stop() {
            debug!("Closed orchestrator log stream");
        }
    }
}

async fn run_stream(
    client: reqwest::Client,
    url: Url,
    events: FeedSender,
    cancel: CancellationToken,
) {
    let _ = events.send(FeedEvent::Connection(ConnectionState::Connecting));

    let result = tokio::select! {
        _ = cancel.cancelled() => return,
        result = read_stream(&client, &url, &events) => result,
    };

    match result {
        Ok(()) => debug!("Log stream consumer went away"),
        Err(e) => warn!("Lost connection to orchestrator: {}", e),
    }
    let _ = events.send(FeedEvent::Connection(ConnectionState::Disconnected));
}

async fn read_stream(
    client: &reqwest::Client,
    url: &Url,
    events: &FeedSender,
) -> Result<(), FeedError> {
    let response = client
        .get(url.clone())
        .header(ACCEPT, "text/event-stream")
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await
        .map_err(|e| FeedError::ConnectionError(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::HttpStatus(status.as_u16()));
    }

    info!("Connected to orchestrator log stream at {}", url);
    let _ = events.send(FeedEvent::Connection(ConnectionState::Connected));

    let mut stream = response.bytes_stream().eventsource();
    while let Some(event) = stream.next().await {
        let event = event.map_err(|e| FeedError::ConnectionError(e.to_string()))?;

        // Only unnamed ("message") events carry log records.
        if !event.event.is_empty() && event.event != "message" {
            continue;
        }
        let Some(record) = parse_event_data(&event.data) else {
            continue;
        };
        if events.send(FeedEvent::Record(record)).is_err() {
            return Ok(());
        }
    }

    Err(FeedError::StreamClosed)
}

/// Decode one event payload, dropping anything malformed.
pub fn parse_event_data(data: &str) -> Option<LogRecord> {
    match LogRecord::from_json(data) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!("Dropping malformed log payload: {}", e);
            None
        }
    }
}
