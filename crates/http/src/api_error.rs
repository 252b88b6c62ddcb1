//! Typed API error for HTTP handlers.
//!
//! Converts domain errors into HTTP responses with a JSON body and the status
//! code of the routing table.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use teleprompter_service::ServiceError;
use teleprompter_storage::StorageError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` variant logs the real error server-side and returns
/// a static message to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: missing field, illegal id, unparsable body or version.
    BadRequest(String),
    /// 404 Not Found: unknown prompt, unknown version, or unrouted path.
    NotFound(String),
    /// 405 Method Not Allowed: any unrouted request under `/prompts`.
    MethodNotAllowed,
    /// 500 Internal Server Error: storage failure. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_owned())
            },
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::Storage(StorageError::NotFound { entity, id }) => {
                Self::NotFound(format!("{entity} '{id}' not found"))
            },
            other => Self::Internal(other.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_errors_map_to_status() {
        let bad: ApiError = ServiceError::InvalidInput("id is required".to_owned()).into();
        assert_eq!(bad.into_response().status(), StatusCode::BAD_REQUEST);

        let missing: ApiError = ServiceError::Storage(StorageError::NotFound {
            entity: "prompt",
            id: "greet".to_owned(),
        })
        .into();
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let broken: ApiError =
            ServiceError::Storage(StorageError::Migration("boom".to_owned())).into();
        assert_eq!(broken.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
