use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level failure taxonomy.
///
/// Handlers return these and let [`ApiError`] pick the wire shape. The
/// message carried here is the outward-facing one; internal detail belongs
/// in the logs at the point of failure.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request itself is unacceptable. Maps to 400.
    #[error("{0}")]
    Validation(String),
    /// The addressed resource does not exist. Maps to 404.
    #[error("{0}")]
    NotFound(String),
    /// Any stage of the generation pipeline failed. Maps to 500 with the
    /// `success: false` body callers of `/generate` expect.
    #[error("{0}")]
    GenerationFailed(String),
    /// A failure outside the pipeline. Maps to a generic 500.
    #[error("{0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn generation_failed(message: impl Into<String>) -> Self {
        Self::GenerationFailed(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

/// Wire shape for 400 and 404 responses: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Wire shape for pipeline failures: `{"success": false, "message": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct FailureResponse {
    pub success: bool,
    pub message: String,
}

/// Newtype that renders an [`AppError`] as an HTTP response.
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::Validation(error) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
            }
            AppError::NotFound(error) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { error })).into_response()
            }
            AppError::GenerationFailed(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse {
                    success: false,
                    message,
                }),
            )
                .into_response(),
            AppError::Unexpected(message) => {
                tracing::error!(error = %message, "unexpected failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
