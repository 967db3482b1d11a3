//! Message content event parsers

use crate::error::ChatStreamError;
use crate::models::Message;
use crate::sse::events::{ChatEvent, EventKind};

/// Parse the data line of a message-bearing event.
pub(super) fn parse_message_event(
    kind: EventKind,
    data: &str,
) -> Result<ChatEvent, ChatStreamError> {
    let message: Message =
        serde_json::from_str(data).map_err(|e| ChatStreamError::PayloadDecode {
            event: kind.as_str().to_string(),
            data: data.to_string(),
            source: e,
        })?;

    match kind {
        EventKind::MessageDelta => Ok(ChatEvent::MessageDelta(message)),
        EventKind::MessageCompleted => Ok(ChatEvent::MessageCompleted(message)),
        other => Err(ChatStreamError::UnknownEvent {
            event: other.as_str().to_string(),
        }),
    }
}
