//! Chat event kinds and the typed events produced by the decoder.

use serde::{Deserialize, Serialize};

use crate::models::{Chat, Message};

/// Closed set of event names the server may send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "conversation.chat.created")]
    ChatCreated,
    #[serde(rename = "conversation.chat.in_progress")]
    ChatInProgress,
    /// Incremental message content, usually for `type=answer`
    #[serde(rename = "conversation.message.delta")]
    MessageDelta,
    /// Complete message, the concatenation of all its deltas
    #[serde(rename = "conversation.message.completed")]
    MessageCompleted,
    #[serde(rename = "conversation.chat.completed")]
    ChatCompleted,
    #[serde(rename = "conversation.chat.failed")]
    ChatFailed,
    /// The chat is interrupted until tool results are submitted
    #[serde(rename = "conversation.chat.requires_action")]
    ChatRequiresAction,
    #[serde(rename = "error")]
    Error,
    /// The stream ended normally
    #[serde(rename = "done")]
    Done,
}

/// Which payload schema an event kind's data line must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    Message,
    Chat,
    /// `done` and `error`, which steer the sequence instead of carrying a payload
    Control,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::ChatCreated,
        EventKind::ChatInProgress,
        EventKind::MessageDelta,
        EventKind::MessageCompleted,
        EventKind::ChatCompleted,
        EventKind::ChatFailed,
        EventKind::ChatRequiresAction,
        EventKind::Error,
        EventKind::Done,
    ];

    /// The wire tag of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ChatCreated => "conversation.chat.created",
            EventKind::ChatInProgress => "conversation.chat.in_progress",
            EventKind::MessageDelta => "conversation.message.delta",
            EventKind::MessageCompleted => "conversation.message.completed",
            EventKind::ChatCompleted => "conversation.chat.completed",
            EventKind::ChatFailed => "conversation.chat.failed",
            EventKind::ChatRequiresAction => "conversation.chat.requires_action",
            EventKind::Error => "error",
            EventKind::Done => "done",
        }
    }

    /// Resolve a wire tag. Matching is exact and case-sensitive.
    pub fn from_wire(tag: &str) -> Option<Self> {
        match tag {
            "conversation.chat.created" => Some(EventKind::ChatCreated),
            "conversation.chat.in_progress" => Some(EventKind::ChatInProgress),
            "conversation.message.delta" => Some(EventKind::MessageDelta),
            "conversation.message.completed" => Some(EventKind::MessageCompleted),
            "conversation.chat.completed" => Some(EventKind::ChatCompleted),
            "conversation.chat.failed" => Some(EventKind::ChatFailed),
            "conversation.chat.requires_action" => Some(EventKind::ChatRequiresAction),
            "error" => Some(EventKind::Error),
            "done" => Some(EventKind::Done),
            _ => None,
        }
    }

    pub fn category(&self) -> EventCategory {
        match self {
            EventKind::MessageDelta | EventKind::MessageCompleted => EventCategory::Message,
            EventKind::ChatCreated
            | EventKind::ChatInProgress
            | EventKind::ChatCompleted
            | EventKind::ChatFailed
            | EventKind::ChatRequiresAction => EventCategory::Chat,
            EventKind::Error | EventKind::Done => EventCategory::Control,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded, payload-bearing event.
///
/// Control events never appear here: `done` ends the sequence and `error`
/// surfaces as [`crate::error::ChatStreamError::Server`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ChatEvent {
    #[serde(rename = "conversation.chat.created")]
    ChatCreated(Chat),
    #[serde(rename = "conversation.chat.in_progress")]
    ChatInProgress(Chat),
    #[serde(rename = "conversation.message.delta")]
    MessageDelta(Message),
    #[serde(rename = "conversation.message.completed")]
    MessageCompleted(Message),
    #[serde(rename = "conversation.chat.completed")]
    ChatCompleted(Chat),
    #[serde(rename = "conversation.chat.failed")]
    ChatFailed(Chat),
    #[serde(rename = "conversation.chat.requires_action")]
    ChatRequiresAction(Chat),
}

impl ChatEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ChatEvent::ChatCreated(_) => EventKind::ChatCreated,
            ChatEvent::ChatInProgress(_) => EventKind::ChatInProgress,
            ChatEvent::MessageDelta(_) => EventKind::MessageDelta,
            ChatEvent::MessageCompleted(_) => EventKind::MessageCompleted,
            ChatEvent::ChatCompleted(_) => EventKind::ChatCompleted,
            ChatEvent::ChatFailed(_) => EventKind::ChatFailed,
            ChatEvent::ChatRequiresAction(_) => EventKind::ChatRequiresAction,
        }
    }

    /// The chat payload, for chat-bearing kinds.
    pub fn chat(&self) -> Option<&Chat> {
        match self {
            ChatEvent::ChatCreated(chat)
            | ChatEvent::ChatInProgress(chat)
            | ChatEvent::ChatCompleted(chat)
            | ChatEvent::ChatFailed(chat)
            | ChatEvent::ChatRequiresAction(chat) => Some(chat),
            ChatEvent::MessageDelta(_) | ChatEvent::MessageCompleted(_) => None,
        }
    }

    /// The message payload, for message-bearing kinds.
    pub fn message(&self) -> Option<&Message> {
        match self {
            ChatEvent::MessageDelta(message) | ChatEvent::MessageCompleted(message) => {
                Some(message)
            }
            _ => None,
        }
    }
}

/// One raw line of the stream, classified by prefix.
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine<'a> {
    /// `event:<name>`, value verbatim
    Event(&'a str),
    /// `data:<payload>`, value verbatim
    Data(&'a str),
    /// Empty after removing a trailing `\r`
    Blank,
    /// Anything else
    Other(&'a str),
}

/// A complete frame: one event line and one data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub event: String,
    pub data: String,
}

impl Frame {
    pub fn new(event: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data: data.into(),
        }
    }
}
