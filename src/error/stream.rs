//! Errors raised while decoding a chat event stream.
//!
//! Every variant is terminal: once one is returned the stream yields nothing
//! further.

use thiserror::Error;

/// Violations of the two-line `event:` / `data:` frame contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FramingError {
    /// A field already collected for the current frame appeared again.
    #[error("duplicate '{field}:' line in frame: {line}")]
    DuplicateField { field: &'static str, line: String },

    /// A non-blank line starting with neither `event:` nor `data:`.
    #[error("unrecognized line in frame: {line}")]
    UnrecognizedLine { line: String },

    /// The line sequence ended after only one of the two frame lines.
    #[error("stream ended mid-frame, missing '{missing}:' line after: {line}")]
    IncompleteFrame { missing: &'static str, line: String },
}

impl FramingError {
    /// The raw line that triggered the violation.
    pub fn line(&self) -> &str {
        match self {
            FramingError::DuplicateField { line, .. }
            | FramingError::UnrecognizedLine { line }
            | FramingError::IncompleteFrame { line, .. } => line,
        }
    }
}

/// Terminal failure of a chat event stream.
#[derive(Debug, Error)]
pub enum ChatStreamError {
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// Event name outside the closed set of known kinds.
    #[error("unknown event: {event}")]
    UnknownEvent { event: String },

    /// The data line is not valid JSON or does not match the payload schema.
    #[error("invalid payload for event '{event}': {source}")]
    PayloadDecode {
        event: String,
        data: String,
        #[source]
        source: serde_json::Error,
    },

    /// The server sent an `error` control event.
    #[error("error event: {detail}")]
    Server {
        /// Raw data line as sent by the server
        detail: String,
        code: Option<i64>,
        msg: Option<String>,
    },

    /// The underlying byte stream failed.
    #[error("transport error: {0}")]
    Transport(String),
}

impl ChatStreamError {
    /// Short stable code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatStreamError::Framing(FramingError::DuplicateField { .. }) => "E_STREAM_DUP_FIELD",
            ChatStreamError::Framing(FramingError::UnrecognizedLine { .. }) => "E_STREAM_BAD_LINE",
            ChatStreamError::Framing(FramingError::IncompleteFrame { .. }) => "E_STREAM_INCOMPLETE",
            ChatStreamError::UnknownEvent { .. } => "E_STREAM_UNKNOWN_EVENT",
            ChatStreamError::PayloadDecode { .. } => "E_STREAM_PAYLOAD",
            ChatStreamError::Server { .. } => "E_STREAM_SERVER",
            ChatStreamError::Transport(_) => "E_STREAM_TRANSPORT",
        }
    }

    /// Only transport failures are worth reconnecting for; protocol
    /// violations would repeat.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ChatStreamError::Transport(_))
    }
}
