pub(crate) mod prompts;
pub(crate) mod serve;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use teleprompter_core::constants::{DEFAULT_SHUTDOWN_DRAIN_SECS, DEFAULT_WEBHOOK_TIMEOUT_SECS};
use teleprompter_core::{env_optional, env_parse_with_default};
use teleprompter_service::{ChannelQueue, NotificationQueue, PromptService, Propagator, WebhookQueue};
use teleprompter_storage::Storage;

const CHANNEL_CAPACITY: usize = 256;

/// Webhook transport when `TELEPROMPTER_WEBHOOK_URL` is set, in-process
/// broadcast otherwise.
pub(crate) fn build_propagator() -> Result<Propagator> {
    let default_namespace = env_optional("TELEPROMPTER_DEFAULT_NAMESPACE");
    let queue: Arc<dyn NotificationQueue> = match env_optional("TELEPROMPTER_WEBHOOK_URL") {
        Some(url) => {
            let timeout_secs = env_parse_with_default(
                "TELEPROMPTER_WEBHOOK_TIMEOUT_SECS",
                DEFAULT_WEBHOOK_TIMEOUT_SECS,
            );
            let queue = WebhookQueue::new(&url, Duration::from_secs(timeout_secs))?;
            tracing::info!(url = %url, timeout_secs, "Propagating prompt changes via webhook");
            Arc::new(queue)
        },
        None => {
            tracing::warn!(
                "TELEPROMPTER_WEBHOOK_URL not set, prompt change notifications are disabled \
                 and every update or delete event will be dropped"
            );
            Arc::new(ChannelQueue::new(CHANNEL_CAPACITY))
        },
    };
    if let Some(ns) = &default_namespace {
        tracing::info!(namespace = %ns, "Default propagation namespace");
    }
    Ok(Propagator::new(queue, default_namespace))
}

pub(crate) fn build_service(storage: Storage) -> Result<PromptService> {
    let propagator = Arc::new(build_propagator()?);
    Ok(PromptService::new(Arc::new(storage), propagator))
}

pub(crate) async fn drain_propagation(service: &PromptService) {
    let drain_secs =
        env_parse_with_default("TELEPROMPTER_SHUTDOWN_DRAIN_SECS", DEFAULT_SHUTDOWN_DRAIN_SECS);
    let aborted = service.propagator().drain(Duration::from_secs(drain_secs)).await;
    if aborted > 0 {
        tracing::warn!(aborted, "Propagation tasks abandoned after drain timeout");
    }
}
