use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::job_board::JobBoardError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Job board error: {0}")]
    JobBoard(String),
}

impl From<JobBoardError> for AppError {
    fn from(err: JobBoardError) -> Self {
        match err {
            JobBoardError::Unauthorized => AppError::Unauthorized,
            other => AppError::JobBoard(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::JobBoard(msg) => {
                tracing::error!("Job board error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "JOB_BOARD_ERROR",
                    "Could not load jobs or profile from the job board".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
