//! Storage layer for teleprompter
//!
//! SQLite-backed versioned store: a `prompts` table holding the current value
//! of every id and an append-only `prompt_versions` table holding its history.

mod error;
mod migrations;
mod sqlite_async;
mod storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use error::StorageError;
pub use storage::Storage;
pub use traits::PromptStore;
