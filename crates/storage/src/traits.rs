//! Storage backend trait abstraction
//!
//! Async view of the versioned store, so services and handlers never block
//! the runtime on `SQLite` I/O.

use async_trait::async_trait;
use teleprompter_core::{Prompt, PromptInput};

use crate::StorageError;

/// Versioned prompt operations.
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// All current prompts, ordered by id.
    async fn list_prompts(&self) -> Result<Vec<Prompt>, StorageError>;

    /// Current value of `id`; `NotFound` if absent.
    async fn get_prompt(&self, id: &str) -> Result<Prompt, StorageError>;

    /// History of `id`, newest first. Empty for unknown ids.
    async fn get_prompt_versions(&self, id: &str) -> Result<Vec<Prompt>, StorageError>;

    /// One history entry by exact version.
    async fn get_prompt_version(
        &self,
        id: &str,
        version: i64,
    ) -> Result<Option<Prompt>, StorageError>;

    /// Append history and replace the current value atomically.
    async fn write_prompt(&self, input: &PromptInput) -> Result<Prompt, StorageError>;

    /// Append a delete marker and drop the current value atomically.
    /// Returns the removed current value, if any.
    async fn delete_prompt(&self, id: &str) -> Result<Option<Prompt>, StorageError>;
}
