//! Async trait implementation for `SQLite` `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use teleprompter_core::{Prompt, PromptInput};

use crate::traits::PromptStore;
use crate::{Storage, StorageError};

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Task(format!("spawn_blocking join error: {e}")))?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`: `.clone()` a `&T`, pass as `&arg`
/// - `@str arg`: `.to_owned()` a `&str`, pass as `&arg`
/// - `@val arg`: move directly (Copy types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

#[async_trait]
impl PromptStore for Storage {
    async fn list_prompts(&self) -> Result<Vec<Prompt>, StorageError> {
        delegate!(self, list_prompts)
    }
    async fn get_prompt(&self, id: &str) -> Result<Prompt, StorageError> {
        delegate!(self, get_prompt, @str id)
    }
    async fn get_prompt_versions(&self, id: &str) -> Result<Vec<Prompt>, StorageError> {
        delegate!(self, get_prompt_versions, @str id)
    }
    async fn get_prompt_version(
        &self,
        id: &str,
        version: i64,
    ) -> Result<Option<Prompt>, StorageError> {
        delegate!(self, get_prompt_version, @str id, @val version)
    }
    async fn write_prompt(&self, input: &PromptInput) -> Result<Prompt, StorageError> {
        delegate!(self, write_prompt, @ref input)
    }
    async fn delete_prompt(&self, id: &str) -> Result<Option<Prompt>, StorageError> {
        delegate!(self, delete_prompt, @str id)
    }
}
