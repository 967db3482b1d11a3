use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Custom key-value pairs attached to a message or chat.
pub type MetaData = HashMap<String, String>;

/// Maximum number of entries in a metadata map.
pub const META_DATA_MAX_ENTRIES: usize = 16;
/// Maximum key length (in characters) of a metadata entry.
pub const META_DATA_MAX_KEY_LEN: usize = 64;
/// Maximum value length (in characters) of a metadata entry.
pub const META_DATA_MAX_VALUE_LEN: usize = 512;

/// The entity that sent a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Kind of message within a chat turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// User input
    Question,
    /// Bot reply, may arrive incrementally
    Answer,
    /// Intermediate result of a function call made by the bot
    FunctionCall,
    /// Result returned after calling a tool
    ToolOutput,
    /// Result returned after calling a tool
    ToolResponse,
    /// Suggested follow-up question
    FollowUp,
    /// Multi-answer bookkeeping packet, content is JSON
    Verbose,
    /// The server sent an empty type
    #[serde(rename = "")]
    Unknown,
}

/// Format of `Message::content`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageContentType {
    Text,
    /// JSON-encoded list of [`MessageObjectString`] items
    ObjectString,
    /// Only appears in responses
    Card,
}

/// Content type of one item of a multimodal message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageObjectStringType {
    Text,
    File,
    Image,
}

/// One item of an `object_string` message.
///
/// `text` is required for text items; file and image items need at least one
/// of `file_id` or `file_url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageObjectString {
    #[serde(rename = "type")]
    pub kind: MessageObjectStringType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl MessageObjectString {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: MessageObjectStringType::Text,
            text: Some(text.into()),
            file_id: None,
            file_url: None,
        }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self {
            kind: MessageObjectStringType::Image,
            text: None,
            file_id: None,
            file_url: Some(url.into()),
        }
    }

    pub fn file_id(file_id: impl Into<String>) -> Self {
        Self {
            kind: MessageObjectStringType::File,
            text: None,
            file_id: Some(file_id.into()),
            file_url: None,
        }
    }
}

/// One turn of conversational content.
///
/// Decoded once from wire JSON and never mutated afterwards. Optional fields
/// are `None` when the server omitted them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageType>,
    pub content: String,
    pub content_type: MessageContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<MetaData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
    /// Unix timestamp in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Unix timestamp in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl Message {
    fn text(role: MessageRole, kind: MessageType, content: String, meta_data: Option<MetaData>) -> Self {
        Self {
            role,
            kind: Some(kind),
            content,
            content_type: MessageContentType::Text,
            meta_data,
            id: None,
            conversation_id: None,
            bot_id: None,
            chat_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// A plain-text question from the user.
    pub fn user_text(content: impl Into<String>) -> Self {
        Self::text(MessageRole::User, MessageType::Question, content.into(), None)
    }

    /// A plain-text answer from the assistant, used to seed a conversation.
    pub fn assistant_text(content: impl Into<String>) -> Self {
        Self::text(MessageRole::Assistant, MessageType::Answer, content.into(), None)
    }

    /// A multimodal user question made of text, file and image items.
    pub fn user_object_string(items: &[MessageObjectString]) -> Result<Self, serde_json::Error> {
        let content = serde_json::to_string(items)?;
        let mut message = Self::text(MessageRole::User, MessageType::Question, content, None);
        message.content_type = MessageContentType::ObjectString;
        Ok(message)
    }

    /// Attach metadata (builder pattern)
    pub fn with_meta_data(mut self, meta_data: MetaData) -> Self {
        self.meta_data = Some(meta_data);
        self
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(timestamp_to_utc)
    }

    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        self.updated_at.and_then(timestamp_to_utc)
    }
}

pub(crate) fn timestamp_to_utc(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}

/// Check a metadata map against the server-side limits.
///
/// Returns a description of the first violation found.
pub fn validate_meta_data(meta_data: &MetaData) -> Result<(), String> {
    if meta_data.len() > META_DATA_MAX_ENTRIES {
        return Err(format!(
            "meta_data has {} entries, at most {} allowed",
            meta_data.len(),
            META_DATA_MAX_ENTRIES
        ));
    }

    for (key, value) in meta_data {
        let key_len = key.chars().count();
        if key_len == 0 || key_len > META_DATA_MAX_KEY_LEN {
            return Err(format!(
                "meta_data key '{}' must be 1-{} characters",
                key, META_DATA_MAX_KEY_LEN
            ));
        }
        let value_len = value.chars().count();
        if value_len == 0 || value_len > META_DATA_MAX_VALUE_LEN {
            return Err(format!(
                "meta_data value for '{}' must be 1-{} characters",
                key, META_DATA_MAX_VALUE_LEN
            ));
        }
    }

    Ok(())
}
