// Error types for stability-relay

use crate::imaging::ImageError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("{0}")]
    Validation(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("Provider returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Provider request timed out: {0}")]
    Timeout(String),

    #[error("Failed to reach provider: {0}")]
    Transport(String),

    #[error("STABILITY_API_KEY is not configured")]
    MissingCredential,

    #[error("Image processing failed: {0}")]
    Image(#[from] ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// HTTP status reported to the caller for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Validation(_) => StatusCode::BAD_REQUEST,
            ProxyError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Transport(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Image(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `error` field of the JSON body.
    ///
    /// Upstream failures carry the provider's body verbatim so the browser sees
    /// exactly what the provider said.
    pub fn client_message(&self) -> String {
        match self {
            ProxyError::Upstream { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// Convert ProxyError to HTTP responses for Axum
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({ "error": self.client_message() });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
