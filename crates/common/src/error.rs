use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Error taxonomy surfaced by the roast endpoint.
///
/// The `Display` text of each variant is exactly the `error` string returned
/// to the caller.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed JSON body or address. Raised before any outbound call.
    #[error("{0}")]
    InvalidInput(String),

    /// The chain RPC or the generation service could not serve the request.
    #[error("{0}")]
    UpstreamUnavailable(String),

    /// The generation service answered successfully but produced no text.
    #[error("Empty roast from Claude")]
    EmptyGeneration,

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn invalid_json() -> Self {
        AppError::InvalidInput("Invalid JSON body".to_string())
    }

    pub fn invalid_address() -> Self {
        AppError::InvalidInput("Invalid address format".to_string())
    }

    pub fn rpc_unreachable(reason: impl std::fmt::Display) -> Self {
        AppError::UpstreamUnavailable(format!("Cannot reach Arc RPC: {}", reason))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamUnavailable(_) | AppError::EmptyGeneration => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Internal(msg) if msg.is_empty() => "Unexpected error".to_string(),
            other => other.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Roast request failed");
        }

        let body = json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
