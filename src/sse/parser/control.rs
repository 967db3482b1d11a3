//! Control event parsers

use tracing::warn;

use crate::error::ChatStreamError;
use crate::sse::payloads::ErrorPayload;

/// Build the terminal error for an `error` event. The raw data is always
/// kept as the detail; `code` and `msg` are filled when the data is the
/// usual JSON object.
pub(super) fn parse_error_event(data: &str) -> ChatStreamError {
    let payload = ErrorPayload::parse(data);
    let (code, msg) = match payload {
        Some(p) => (p.code, p.msg),
        None => (None, None),
    };

    warn!(code = ?code, "server sent error event: {}", data);

    ChatStreamError::Server {
        detail: data.to_string(),
        code,
        msg,
    }
}
