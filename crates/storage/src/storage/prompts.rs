use chrono::Utc;
use rusqlite::{OptionalExtension, Transaction, TransactionBehavior, params};
use teleprompter_core::constants::DELETED_MARKER;
use teleprompter_core::{Prompt, PromptInput};

use super::{Storage, get_conn};
use crate::StorageError;

const PROMPT_COLUMNS: &str = "id, text, version, namespace";

/// Next version stamp for `id`: the current time in milliseconds, bumped past
/// any version already recorded so stamps stay unique and increasing per id.
///
/// Must run inside the write transaction that inserts the stamp.
fn next_version(tx: &Transaction<'_>, id: &str) -> Result<i64, StorageError> {
    let latest: Option<i64> = tx.query_row(
        "SELECT MAX(version) FROM prompt_versions WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    let now = Utc::now().timestamp_millis();
    Ok(latest.map_or(now, |v| now.max(v.saturating_add(1))))
}

fn insert_history(
    tx: &Transaction<'_>,
    id: &str,
    version: i64,
    text: &str,
    namespace: Option<&str>,
) -> Result<(), StorageError> {
    tx.execute(
        "INSERT INTO prompt_versions (id, version, text, namespace) VALUES (?1, ?2, ?3, ?4)",
        params![id, version, text, namespace],
    )?;
    Ok(())
}

impl Storage {
    /// List every current prompt, ordered by id.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_prompts(&self) -> Result<Vec<Prompt>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(&format!("SELECT {PROMPT_COLUMNS} FROM prompts ORDER BY id"))?;
        let prompts = stmt.query_map([], Self::row_to_prompt)?.collect::<Result<Vec<_>, _>>()?;
        Ok(prompts)
    }

    /// Get the current value of a prompt.
    ///
    /// # Errors
    /// Returns [`StorageError::NotFound`] if the id has no current value
    /// (never written, or deleted).
    pub fn get_prompt(&self, id: &str) -> Result<Prompt, StorageError> {
        let conn = get_conn(&self.pool)?;
        conn.query_row(
            &format!("SELECT {PROMPT_COLUMNS} FROM prompts WHERE id = ?1"),
            params![id],
            Self::row_to_prompt,
        )
        .optional()?
        .ok_or_else(|| StorageError::NotFound { entity: "prompt", id: id.to_owned() })
    }

    /// Full history of a prompt, newest first, including delete markers.
    ///
    /// An unknown id yields an empty list.
    ///
    /// # Errors
    /// Returns error if database query fails or any row cannot be decoded;
    /// history is never returned partially.
    pub fn get_prompt_versions(&self, id: &str) -> Result<Vec<Prompt>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PROMPT_COLUMNS} FROM prompt_versions WHERE id = ?1 ORDER BY version DESC"
        ))?;
        let versions =
            stmt.query_map(params![id], Self::row_to_prompt)?.collect::<Result<Vec<_>, _>>()?;
        Ok(versions)
    }

    /// Look up one history entry by exact version.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_prompt_version(&self, id: &str, version: i64) -> Result<Option<Prompt>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let entry = conn
            .query_row(
                &format!(
                    "SELECT {PROMPT_COLUMNS} FROM prompt_versions WHERE id = ?1 AND version = ?2"
                ),
                params![id, version],
                Self::row_to_prompt,
            )
            .optional()?;
        Ok(entry)
    }

    /// Write a new version: append to history and replace the current value
    /// in one transaction.
    ///
    /// # Errors
    /// Returns error if the transaction fails; nothing is written in that case.
    pub fn write_prompt(&self, input: &PromptInput) -> Result<Prompt, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let version = next_version(&tx, &input.id)?;
        insert_history(&tx, &input.id, version, &input.text, input.namespace.as_deref())?;
        tx.execute(
            "INSERT INTO prompts (id, text, version, namespace) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                 text = excluded.text,
                 version = excluded.version,
                 namespace = excluded.namespace",
            params![input.id, input.text, version, input.namespace],
        )?;
        tx.commit()?;

        tracing::debug!(id = %input.id, version, "Prompt written");
        Ok(Prompt::new(input.id.clone(), input.text.clone(), version, input.namespace.clone()))
    }

    /// Delete a prompt: append a `DELETED` marker and drop the current value in
    /// one transaction.
    ///
    /// Deleting an unknown id still records a marker. Returns the current value
    /// that was removed, if there was one.
    ///
    /// # Errors
    /// Returns error if the transaction fails; nothing is written in that case.
    pub fn delete_prompt(&self, id: &str) -> Result<Option<Prompt>, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let removed = tx
            .query_row(
                &format!("SELECT {PROMPT_COLUMNS} FROM prompts WHERE id = ?1"),
                params![id],
                Self::row_to_prompt,
            )
            .optional()?;
        let namespace = removed.as_ref().and_then(|p| p.namespace.as_deref());

        let version = next_version(&tx, id)?;
        insert_history(&tx, id, version, DELETED_MARKER, namespace)?;
        tx.execute("DELETE FROM prompts WHERE id = ?1", params![id])?;
        tx.commit()?;

        tracing::debug!(id, version, existed = removed.is_some(), "Prompt deleted");
        Ok(removed)
    }

    pub(crate) fn row_to_prompt(row: &rusqlite::Row<'_>) -> rusqlite::Result<Prompt> {
        Ok(Prompt::new(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    }
}
