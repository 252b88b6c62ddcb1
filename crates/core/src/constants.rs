//! Shared constants for teleprompter.

/// Body stored in the history relation when a prompt is deleted.
pub const DELETED_MARKER: &str = "DELETED";

/// Character that may never appear in a prompt id (ids double as path segments).
pub const ID_SEPARATOR: char = '/';

/// SQLite connection pool: default maximum connections.
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;

/// Default HTTP port for `teleprompter serve`.
pub const DEFAULT_HTTP_PORT: u16 = 8787;

/// Timeout for a single webhook delivery, in seconds.
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;

/// Upper bound on how long shutdown waits for in-flight propagation tasks.
pub const DEFAULT_SHUTDOWN_DRAIN_SECS: u64 = 30;
