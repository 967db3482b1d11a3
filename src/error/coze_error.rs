//! Top-level error type for client operations.

use thiserror::Error;

use super::stream::ChatStreamError;
use crate::traits::HttpError;

/// Error returned by [`crate::client::ChatClient`] and configuration loading.
#[derive(Debug, Error)]
pub enum CozeError {
    /// The HTTP transport failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Non-2xx status from the server
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// 2xx response whose envelope carries a non-zero code
    #[error("API error {code}: {msg}")]
    Api {
        code: i64,
        msg: String,
        logid: Option<String>,
    },

    /// Response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 2xx response that is not a usable envelope
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("stream error: {0}")]
    Stream(#[from] ChatStreamError),

    /// Rejected locally before sending
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl CozeError {
    /// Short stable code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            CozeError::Http(_) => "E_HTTP",
            CozeError::ServerError { .. } => "E_SERVER",
            CozeError::Api { .. } => "E_API",
            CozeError::Json(_) => "E_JSON",
            CozeError::InvalidResponse(_) => "E_INVALID_RESPONSE",
            CozeError::Stream(e) => e.error_code(),
            CozeError::InvalidRequest(_) => "E_INVALID_REQUEST",
            CozeError::Config(_) => "E_CONFIG",
        }
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            CozeError::Http(e) => e.is_retryable(),
            CozeError::ServerError { status, .. } => *status == 429 || *status >= 500,
            CozeError::Stream(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Check if this error means the token is missing or rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, CozeError::ServerError { status: 401, .. })
            || matches!(self, CozeError::Api { code: 4100, .. })
    }
}
