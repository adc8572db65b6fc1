use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tailer::TailError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Debug log not found")]
    NotFound,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Tail(#[from] TailError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Status plus client-facing message. Internal details are logged
    /// server-side and replaced with a generic message.
    fn parts(&self) -> (StatusCode, String) {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Tail(e) if e.is_not_found() => {
                (StatusCode::NOT_FOUND, ApiError::NotFound.to_string())
            }
            ApiError::Tail(TailError::BackupFailed { .. }) => {
                tracing::error!("Backup failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Unable to create backup file".to_string())
            }
            ApiError::Tail(e) => {
                tracing::error!("Engine error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred".to_string())
            }
            ApiError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
