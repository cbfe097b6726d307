use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Endpoint errors with appropriate HTTP status codes
///
/// Backend and transport failures never surface here; they are folded
/// into the fallback chain. Only caller input errors and genuine internal
/// faults reach the HTTP boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request parameters
    #[error("{0}")]
    InvalidRequest(String),

    /// Unexpected internal fault; detail is logged, never returned
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InvalidRequest(message) => message.clone(),
            Self::Internal(_) => "internal server error".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref fault) = self {
            tracing::error!(error = %fault, "unexpected internal fault");
        }

        let body = ErrorResponse {
            error: self.client_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
