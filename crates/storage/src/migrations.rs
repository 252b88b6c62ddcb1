//! Database migrations

use rusqlite::Connection;

pub const SCHEMA_VERSION: i32 = 2;

pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::info!(
        "Database schema version: {} (target: {})",
        current_version,
        SCHEMA_VERSION
    );

    if current_version < 1 {
        tracing::info!("Running migration v1: prompts and prompt_versions");
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS prompts (
                id TEXT PRIMARY KEY,
                text TEXT NOT NULL,
                version INTEGER NOT NULL,
                namespace TEXT
            );

            CREATE TABLE IF NOT EXISTS prompt_versions (
                id TEXT NOT NULL,
                version INTEGER NOT NULL,
                text TEXT NOT NULL,
                namespace TEXT,
                PRIMARY KEY (id, version)
            );
            "#,
        )?;
    }

    if current_version < 2 {
        tracing::info!("Running migration v2: append-only guards on prompt_versions");
        conn.execute_batch(
            r#"
            CREATE TRIGGER IF NOT EXISTS prompt_versions_no_update
            BEFORE UPDATE ON prompt_versions
            BEGIN
                SELECT RAISE(ABORT, 'prompt_versions is append-only');
            END;

            CREATE TRIGGER IF NOT EXISTS prompt_versions_no_delete
            BEFORE DELETE ON prompt_versions
            BEGIN
                SELECT RAISE(ABORT, 'prompt_versions is append-only');
            END;
            "#,
        )?;
    }

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tracing::info!("Database schema up to date (version {})", SCHEMA_VERSION);

    Ok(())
}
