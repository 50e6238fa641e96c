use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tts_core::{ErrorKind, SynthesisError};

/// API Error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// Upstream said no. Its reason is logged but not forwarded.
    #[error("API Error")]
    UpstreamRejected,

    #[error("{0}")]
    Synthesis(SynthesisError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// Error response structure
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl From<SynthesisError> for ApiError {
    fn from(e: SynthesisError) -> Self {
        match e.kind() {
            ErrorKind::UpstreamRejected => {
                tracing::warn!("{}", e);
                ApiError::UpstreamRejected
            }
            ErrorKind::TransportFault | ErrorKind::DecodingFault => ApiError::Synthesis(e),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UpstreamRejected => StatusCode::BAD_REQUEST,
            // unparseable inbound bodies share the catch-all 500
            ApiError::Synthesis(_) | ApiError::InvalidBody(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("TTS error: {}", self);
        }

        let body = Json(ErrorResponse {
            success: false,
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
