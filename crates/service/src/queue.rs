//! Transports that deliver [`PromptEvent`]s to a namespace's subscribers.
//!
//! Delivery guarantees belong to the transport; callers only learn whether
//! the hand-off succeeded.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use teleprompter_core::PromptEvent;
use thiserror::Error;
use tokio::sync::broadcast;

/// Maximum response body length kept in error messages.
const MAX_ERROR_BODY_LEN: usize = 200;

/// Errors from handing an event to a transport.
#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("invalid webhook url: {0}")]
    InvalidUrl(String),
}

/// Per-namespace channel for change notifications.
#[async_trait]
pub trait NotificationQueue: Send + Sync {
    /// Hand `event` to the channel for `namespace`.
    async fn send(&self, namespace: &str, event: &PromptEvent) -> Result<(), PropagationError>;
}

/// Delivers events by `POST {base_url}/{namespace}` with a JSON body.
#[derive(Debug, Clone)]
pub struct WebhookQueue {
    client: reqwest::Client,
    base_url: Url,
}

impl WebhookQueue {
    /// Creates a webhook transport rooted at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the URL cannot carry path segments or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PropagationError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| PropagationError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(PropagationError::InvalidUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// URL events for `namespace` are posted to. The namespace is percent-encoded
    /// as a single path segment.
    pub fn endpoint(&self, namespace: &str) -> Result<Url, PropagationError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| PropagationError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(namespace);
        Ok(url)
    }
}

#[async_trait]
impl NotificationQueue for WebhookQueue {
    async fn send(&self, namespace: &str, event: &PromptEvent) -> Result<(), PropagationError> {
        let response = self.client.post(self.endpoint(namespace)?).json(event).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body =
            response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
        Err(PropagationError::HttpStatus {
            code: status.as_u16(),
            body: truncate(&body, MAX_ERROR_BODY_LEN).to_owned(),
        })
    }
}

/// In-process broadcast of `(namespace, event)` pairs.
///
/// Used when no webhook is configured; subscribers that lag behind lose the
/// oldest events.
#[derive(Debug, Clone)]
pub struct ChannelQueue {
    sender: broadcast::Sender<(String, PromptEvent)>,
}

impl ChannelQueue {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _initial_rx) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<(String, PromptEvent)> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl NotificationQueue for ChannelQueue {
    async fn send(&self, namespace: &str, event: &PromptEvent) -> Result<(), PropagationError> {
        if self.sender.send((namespace.to_owned(), event.clone())).is_err() {
            tracing::debug!(namespace, kind = event.kind(), "No subscribers for prompt event");
        }
        Ok(())
    }
}

/// Truncates a string to the given maximum length at a char boundary.
fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end = end.saturating_sub(1);
    }
    s.get(..end).unwrap_or("")
}
