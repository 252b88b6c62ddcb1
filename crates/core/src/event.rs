//! Change notifications delivered to namespace subscribers.

use serde::{Deserialize, Serialize};

use crate::Prompt;

/// Payload published after a committed write or delete.
///
/// Serialized with a `type` tag so subscribers can tell the kinds apart:
/// `{"type":"update","prompt":{..}}` or `{"type":"delete","id":".."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
#[non_exhaustive]
pub enum PromptEvent {
    /// A new current value (write or rollback).
    Update { prompt: Prompt },
    /// The id no longer has a current value.
    Delete { id: String },
}

impl PromptEvent {
    /// Id of the prompt this event is about.
    #[must_use]
    pub fn prompt_id(&self) -> &str {
        match *self {
            Self::Update { ref prompt } => &prompt.id,
            Self::Delete { ref id } => id,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match *self {
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_wire_shape() {
        let event = PromptEvent::Update {
            prompt: Prompt::new("greet".to_owned(), "hi".to_owned(), 5, Some("web".to_owned())),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "update");
        assert_eq!(json["prompt"]["id"], "greet");
        assert_eq!(json["prompt"]["version"], 5);
    }

    #[test]
    fn test_delete_wire_shape() {
        let event = PromptEvent::Delete { id: "greet".to_owned() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json, serde_json::json!({"type": "delete", "id": "greet"}));
        assert_eq!(event.prompt_id(), "greet");
        assert_eq!(event.kind(), "delete");
    }
}
