//! Prompt domain types.

use serde::{Deserialize, Serialize};

use crate::constants::{DELETED_MARKER, ID_SEPARATOR};
use crate::{CoreError, Result};

/// A versioned prompt template.
///
/// Used both for the current value of an id and for rows of its history.
/// History rows written by a delete carry [`DELETED_MARKER`] as their text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Prompt {
    /// Caller-chosen identifier, never contains `/`.
    pub id: String,
    /// Template body.
    pub text: String,
    /// Write time in milliseconds since the Unix epoch, unique per id.
    pub version: i64,
    /// Subscriber channel notified when this prompt changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl Prompt {
    #[must_use]
    pub fn new(id: String, text: String, version: i64, namespace: Option<String>) -> Self {
        Self { id, text, version, namespace }
    }

    /// Whether this is a history sentinel recorded by a delete.
    ///
    /// The check is by text alone: a version written with the text `DELETED`
    /// is indistinguishable from a delete marker.
    #[must_use]
    pub fn is_deleted_marker(&self) -> bool {
        self.text == DELETED_MARKER
    }

    /// Input that writes this prompt's content again under a fresh version.
    #[must_use]
    pub fn to_input(&self) -> PromptInput {
        PromptInput::new(self.id.clone(), self.text.clone(), self.namespace.clone())
    }
}

/// Input for writing a new version of a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct PromptInput {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

impl PromptInput {
    #[must_use]
    pub fn new(id: String, text: String, namespace: Option<String>) -> Self {
        Self { id, text, namespace }
    }

    /// Check the input before it reaches storage.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidInput`] if the id or text is empty, or the id
    /// contains `/`.
    pub fn validate(&self) -> Result<()> {
        validate_prompt_id(&self.id)?;
        if self.text.is_empty() {
            return Err(CoreError::InvalidInput("text is required".to_owned()));
        }
        Ok(())
    }
}

/// Validate a prompt id on its own.
///
/// # Errors
/// Returns [`CoreError::InvalidInput`] for an empty id or one containing `/`.
pub fn validate_prompt_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(CoreError::InvalidInput("id is required".to_owned()));
    }
    if id.contains(ID_SEPARATOR) {
        return Err(CoreError::InvalidInput(format!("id must not contain '{ID_SEPARATOR}'")));
    }
    Ok(())
}
