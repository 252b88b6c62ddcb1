//! Fire-and-forget delivery of change notifications.
//!
//! Every committed write, rollback, or delete hands a [`PromptEvent`] to
//! [`Propagator::propagate`], which spawns the delivery and returns at once.
//! Delivery failures are logged, never retried, and never reach the caller.
//! Spawned deliveries are tracked so shutdown can wait for them.

use std::sync::Arc;
use std::time::Duration;

use teleprompter_core::PromptEvent;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

use crate::queue::NotificationQueue;

pub struct Propagator {
    queue: Arc<dyn NotificationQueue>,
    default_namespace: Option<String>,
    tasks: Mutex<JoinSet<()>>,
}

impl Propagator {
    #[must_use]
    pub fn new(queue: Arc<dyn NotificationQueue>, default_namespace: Option<String>) -> Self {
        Self { queue, default_namespace, tasks: Mutex::new(JoinSet::new()) }
    }

    /// Channel that receives events for a prompt in `namespace`: its own
    /// namespace, else the configured default.
    #[must_use]
    pub fn resolve_namespace<'a>(&'a self, namespace: Option<&'a str>) -> Option<&'a str> {
        namespace.or(self.default_namespace.as_deref())
    }

    /// Schedule delivery of `event` and return without waiting for it.
    pub async fn propagate(&self, namespace: Option<&str>, event: PromptEvent) {
        let Some(namespace) = self.resolve_namespace(namespace).map(ToOwned::to_owned) else {
            tracing::debug!(
                id = event.prompt_id(),
                kind = event.kind(),
                "No namespace for prompt, skipping propagation"
            );
            return;
        };

        let queue = Arc::clone(&self.queue);
        let mut tasks = self.tasks.lock().await;
        // Reap finished deliveries so the set only holds in-flight work.
        while let Some(finished) = tasks.try_join_next() {
            log_join_result(finished);
        }
        tasks.spawn(async move {
            match queue.send(&namespace, &event).await {
                Ok(()) => {
                    tracing::debug!(
                        namespace = %namespace,
                        id = event.prompt_id(),
                        kind = event.kind(),
                        "Prompt event propagated"
                    );
                },
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        namespace = %namespace,
                        id = event.prompt_id(),
                        kind = event.kind(),
                        "Prompt event propagation failed, subscribers will miss this change"
                    );
                },
            }
        });
    }

    /// Number of deliveries spawned and not yet reaped.
    pub async fn in_flight(&self) -> usize {
        self.tasks.lock().await.len()
    }

    /// Wait up to `timeout` for every spawned delivery, then abort the rest.
    /// Returns the number of deliveries that were aborted.
    pub async fn drain(&self, timeout: Duration) -> usize {
        let mut tasks = self.tasks.lock().await;
        let pending = tasks.len();
        if pending > 0 {
            tracing::info!(pending, "Waiting for in-flight prompt propagation");
        }

        let drained = tokio::time::timeout(timeout, async {
            while let Some(finished) = tasks.join_next().await {
                log_join_result(finished);
            }
        })
        .await;

        if drained.is_ok() {
            return 0;
        }
        let remaining = tasks.len();
        tracing::warn!(remaining, ?timeout, "Propagation drain timed out, aborting deliveries");
        tasks.abort_all();
        while tasks.join_next().await.is_some() {}
        remaining
    }
}

fn log_join_result(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        if e.is_panic() {
            tracing::error!(error = %e, "Prompt propagation task panicked");
        }
    }
}
