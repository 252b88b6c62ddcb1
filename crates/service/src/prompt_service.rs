use std::sync::Arc;

use teleprompter_core::{Prompt, PromptEvent, PromptInput, validate_prompt_id};
use teleprompter_storage::{PromptStore, StorageError};

use crate::ServiceError;
use crate::propagator::Propagator;

/// Prompt operations behind the HTTP surface.
///
/// Storage effects complete before this returns; propagation of the change
/// is only scheduled.
pub struct PromptService {
    storage: Arc<dyn PromptStore>,
    propagator: Arc<Propagator>,
}

impl PromptService {
    #[must_use]
    pub fn new(storage: Arc<dyn PromptStore>, propagator: Arc<Propagator>) -> Self {
        Self { storage, propagator }
    }

    #[must_use]
    pub fn propagator(&self) -> &Arc<Propagator> {
        &self.propagator
    }

    pub async fn list_prompts(&self) -> Result<Vec<Prompt>, ServiceError> {
        Ok(self.storage.list_prompts().await?)
    }

    pub async fn get_prompt(&self, id: &str) -> Result<Prompt, ServiceError> {
        Ok(self.storage.get_prompt(id).await?)
    }

    pub async fn get_prompt_versions(&self, id: &str) -> Result<Vec<Prompt>, ServiceError> {
        Ok(self.storage.get_prompt_versions(id).await?)
    }

    /// Validate and store a new version, then schedule an `update` event.
    pub async fn write_prompt(&self, input: PromptInput) -> Result<Prompt, ServiceError> {
        input.validate()?;
        let prompt = self.storage.write_prompt(&input).await?;
        tracing::info!(id = %prompt.id, version = prompt.version, "Prompt written");

        let namespace = prompt.namespace.clone();
        self.propagator
            .propagate(namespace.as_deref(), PromptEvent::Update { prompt: prompt.clone() })
            .await;
        Ok(prompt)
    }

    /// Write the content of history entry `version` again as a new version.
    ///
    /// The target's own version number is never reused.
    pub async fn rollback_prompt(&self, id: &str, version: i64) -> Result<Prompt, ServiceError> {
        let target = self.storage.get_prompt_version(id, version).await?.ok_or_else(|| {
            StorageError::NotFound { entity: "prompt version", id: format!("{id}@{version}") }
        })?;
        tracing::info!(id, from_version = version, "Rolling back prompt");
        self.write_prompt(target.to_input()).await
    }

    /// Delete the current value, then schedule a `delete` event on the
    /// namespace the prompt belonged to.
    ///
    /// The id is validated like a write, so no marker is ever recorded for an
    /// id that could not have been written.
    pub async fn delete_prompt(&self, id: &str) -> Result<(), ServiceError> {
        validate_prompt_id(id)?;
        let removed = self.storage.delete_prompt(id).await?;
        tracing::info!(id, existed = removed.is_some(), "Prompt deleted");

        let namespace = removed.and_then(|p| p.namespace);
        self.propagator
            .propagate(namespace.as_deref(), PromptEvent::Delete { id: id.to_owned() })
            .await;
        Ok(())
    }
}
