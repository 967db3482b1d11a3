//! Chat lifecycle event parsers

use crate::error::ChatStreamError;
use crate::models::Chat;
use crate::sse::events::{ChatEvent, EventKind};

/// Parse the data line of a chat-bearing event.
pub(super) fn parse_chat_event(kind: EventKind, data: &str) -> Result<ChatEvent, ChatStreamError> {
    let chat: Chat = serde_json::from_str(data).map_err(|e| ChatStreamError::PayloadDecode {
        event: kind.as_str().to_string(),
        data: data.to_string(),
        source: e,
    })?;

    match kind {
        EventKind::ChatCreated => Ok(ChatEvent::ChatCreated(chat)),
        EventKind::ChatInProgress => Ok(ChatEvent::ChatInProgress(chat)),
        EventKind::ChatCompleted => Ok(ChatEvent::ChatCompleted(chat)),
        EventKind::ChatFailed => Ok(ChatEvent::ChatFailed(chat)),
        EventKind::ChatRequiresAction => Ok(ChatEvent::ChatRequiresAction(chat)),
        other => Err(ChatStreamError::UnknownEvent {
            event: other.as_str().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatStatus;

    const CHAT: &str = r#"{"id":"c1","conversation_id":"v1","bot_id":"b1","status":"in_progress","created_at":1718000000}"#;

    #[test]
    fn test_each_chat_kind_maps_to_its_variant() {
        let cases = [
            (EventKind::ChatCreated, "conversation.chat.created"),
            (EventKind::ChatInProgress, "conversation.chat.in_progress"),
            (EventKind::ChatCompleted, "conversation.chat.completed"),
            (EventKind::ChatFailed, "conversation.chat.failed"),
            (EventKind::ChatRequiresAction, "conversation.chat.requires_action"),
        ];

        for (kind, tag) in cases {
            let event = parse_chat_event(kind, CHAT).unwrap();
            assert_eq!(event.kind(), kind);
            assert_eq!(event.kind().as_str(), tag);
            let chat = event.chat().unwrap();
            assert_eq!(chat.status, ChatStatus::InProgress);
            assert_eq!(chat.created_at, Some(1718000000));
        }
    }

    #[test]
    fn test_missing_status_is_payload_error() {
        let err = parse_chat_event(
            EventKind::ChatCreated,
            r#"{"id":"c1","conversation_id":"v1","bot_id":"b1"}"#,
        )
        .unwrap_err();

        match err {
            ChatStreamError::PayloadDecode { event, data, source } => {
                assert_eq!(event, "conversation.chat.created");
                assert!(data.contains("c1"));
                assert!(source.to_string().contains("status"));
            }
            other => panic!("Expected PayloadDecode, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_object_is_payload_error() {
        let err = parse_chat_event(EventKind::ChatCreated, "{}").unwrap_err();
        assert!(matches!(err, ChatStreamError::PayloadDecode { .. }));
    }

    #[test]
    fn test_invalid_json_is_payload_error() {
        let err = parse_chat_event(EventKind::ChatFailed, "not json").unwrap_err();
        assert!(matches!(err, ChatStreamError::PayloadDecode { .. }));
    }
}
