use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use teleprompter_core::Prompt;

use crate::AppState;
use crate::api_error::ApiError;
use crate::api_types::WritePromptRequest;

pub async fn list_prompts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Prompt>>, ApiError> {
    Ok(Json(state.prompt_service.list_prompts().await?))
}

pub async fn get_prompt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Prompt>, ApiError> {
    Ok(Json(state.prompt_service.get_prompt(&id).await?))
}

pub async fn get_prompt_versions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Prompt>>, ApiError> {
    Ok(Json(state.prompt_service.get_prompt_versions(&id).await?))
}

/// The body is parsed by hand so a missing `Content-Type` or malformed JSON is
/// a plain 400 like any other bad input.
pub async fn write_prompt(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, &'static str), ApiError> {
    let request: WritePromptRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("invalid request body: {e}")))?;
    let input = request.into_input()?;
    state.prompt_service.write_prompt(input).await?;
    Ok((StatusCode::CREATED, "Created"))
}

pub async fn rollback_prompt(
    State(state): State<Arc<AppState>>,
    Path((id, version)): Path<(String, String)>,
) -> Result<&'static str, ApiError> {
    let version: i64 = version
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("version must be an integer, got '{version}'")))?;
    state.prompt_service.rollback_prompt(&id, version).await?;
    Ok("Rolled back")
}

pub async fn delete_prompt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<&'static str, ApiError> {
    state.prompt_service.delete_prompt(&id).await?;
    Ok("Deleted")
}
