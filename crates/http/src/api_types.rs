use serde::Deserialize;
use teleprompter_core::PromptInput;

use crate::api_error::ApiError;

/// Body of `POST /prompts`. Fields are optional so a missing one is a 400,
/// not a deserialization failure with a different status.
#[derive(Debug, Deserialize)]
pub struct WritePromptRequest {
    pub id: Option<String>,
    pub text: Option<String>,
    pub namespace: Option<String>,
}

impl WritePromptRequest {
    pub fn into_input(self) -> Result<PromptInput, ApiError> {
        match (self.id, self.text) {
            (Some(id), Some(text)) => {
                let namespace = self.namespace.filter(|ns| !ns.is_empty());
                Ok(PromptInput::new(id, text, namespace))
            },
            _ => Err(ApiError::BadRequest("id and text are required".to_owned())),
        }
    }
}
