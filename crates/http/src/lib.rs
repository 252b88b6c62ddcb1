//! HTTP API server for teleprompter.
//!
//! | Method | Path                              | Operation   |
//! |--------|-----------------------------------|-------------|
//! | GET    | `/prompts`                        | list        |
//! | POST   | `/prompts`                        | write       |
//! | GET    | `/prompts/{id}`                   | get         |
//! | DELETE | `/prompts/{id}`                   | delete      |
//! | GET    | `/prompts/{id}/versions`          | versions    |
//! | POST   | `/prompts/{id}/versions/{version}`| rollback    |
//!
//! Any other request under `/prompts` is 405; anything else is 404.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod api_types;
mod handlers;

use axum::{
    Router,
    http::Uri,
    routing::{MethodRouter, get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use teleprompter_service::PromptService;

use crate::api_error::ApiError;

pub use api_types::WritePromptRequest;

/// Root of every routed path.
const PROMPTS_PREFIX: &str = "/prompts";

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Prompt operations and change propagation
    pub prompt_service: Arc<PromptService>,
}

impl AppState {
    #[must_use]
    pub fn new(prompt_service: Arc<PromptService>) -> Self {
        Self { prompt_service }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let collection = get(handlers::prompts::list_prompts).post(handlers::prompts::write_prompt);
    let item = get(handlers::prompts::get_prompt).delete(handlers::prompts::delete_prompt);
    let versions = get(handlers::prompts::get_prompt_versions);
    let version = post(handlers::prompts::rollback_prompt);

    Router::new()
        .merge(with_trailing_slash("/prompts", collection))
        .merge(with_trailing_slash("/prompts/{id}", item))
        .merge(with_trailing_slash("/prompts/{id}/versions", versions))
        .merge(with_trailing_slash("/prompts/{id}/versions/{version}", version))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Register `route` for `path` and `path/`.
fn with_trailing_slash(
    path: &str,
    route: MethodRouter<Arc<AppState>>,
) -> Router<Arc<AppState>> {
    Router::new().route(path, route.clone()).route(&format!("{path}/"), route)
}

fn is_prompts_path(path: &str) -> bool {
    path.strip_prefix(PROMPTS_PREFIX).is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn fallback(uri: Uri) -> ApiError {
    if is_prompts_path(uri.path()) {
        ApiError::MethodNotAllowed
    } else {
        ApiError::NotFound("Not found".to_owned())
    }
}
