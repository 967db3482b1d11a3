//! HTTP transport seam.
//!
//! [`crate::client::ChatClient`] talks to the API only through [`HttpClient`],
//! so tests can swap in [`crate::adapters::mock::MockHttpClient`].

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;
use thiserror::Error;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Response body delivered incrementally.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Header carrying the server-side request id.
pub const LOGID_HEADER: &str = "x-tt-logid";

/// Buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Server log id, looked up case-insensitively.
    pub fn logid(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(LOGID_HEADER))
            .map(|(_, value)| value.as_str())
    }
}

/// Transport-level failures.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Non-2xx status on a streaming request, where no body is buffered
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Request cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Other(String),
}

impl HttpError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            HttpError::ConnectionFailed(_) | HttpError::Timeout(_) | HttpError::Io(_) => true,
            HttpError::ServerError { status, .. } => *status == 429 || *status >= 500,
            HttpError::Cancelled | HttpError::InvalidUrl(_) | HttpError::Other(_) => false,
        }
    }
}

/// Minimal HTTP operations the chat client needs.
///
/// # Example
///
/// ```ignore
/// use coze_chat::traits::{HttpClient, Headers, HttpError};
///
/// async fn retrieve<C: HttpClient>(client: &C, url: &str) -> Result<bool, HttpError> {
///     let response = client.post(url, "", &Headers::new()).await?;
///     Ok(response.is_success())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST with a buffered response. Non-2xx statuses are returned as a
    /// [`Response`], not an error.
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// POST and hand back the body as it arrives.
    ///
    /// A non-2xx status is reported as [`HttpError::ServerError`] carrying
    /// the error body.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;
}
