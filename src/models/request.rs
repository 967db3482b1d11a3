use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::message::{validate_meta_data, Message, MetaData};

/// Body of `POST /v3/chat`.
///
/// `stream` is set by the client depending on whether `create` or `stream`
/// is called, so callers never set it directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateChatRequest {
    pub bot_id: String,
    pub user_id: String,
    /// Messages prepended to the conversation before the bot replies
    #[serde(default)]
    pub additional_messages: Vec<Message>,
    #[serde(default)]
    pub stream: bool,
    pub custom_variables: Option<HashMap<String, String>>,
    pub auto_save_history: bool,
    pub meta_data: Option<MetaData>,
    /// None starts a new conversation
    pub conversation_id: Option<String>,
}

impl CreateChatRequest {
    pub fn new(bot_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            bot_id: bot_id.into(),
            user_id: user_id.into(),
            additional_messages: Vec::new(),
            stream: false,
            custom_variables: None,
            auto_save_history: true,
            meta_data: None,
            conversation_id: None,
        }
    }

    /// Append one message (builder pattern)
    pub fn with_message(mut self, message: Message) -> Self {
        self.additional_messages.push(message);
        self
    }

    pub fn with_messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.additional_messages.extend(messages);
        self
    }

    pub fn with_custom_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_variables
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_auto_save_history(mut self, auto_save: bool) -> Self {
        self.auto_save_history = auto_save;
        self
    }

    pub fn with_meta_data(mut self, meta_data: MetaData) -> Self {
        self.meta_data = Some(meta_data);
        self
    }

    /// Continue an existing conversation. An empty id is treated as none.
    pub fn with_conversation_id(mut self, conversation_id: impl Into<String>) -> Self {
        let conversation_id = conversation_id.into();
        self.conversation_id = if conversation_id.is_empty() {
            None
        } else {
            Some(conversation_id)
        };
        self
    }

    /// Check client-side constraints before the request is sent.
    pub fn validate(&self) -> Result<(), String> {
        if self.bot_id.is_empty() {
            return Err("bot_id must not be empty".to_string());
        }
        if self.user_id.is_empty() {
            return Err("user_id must not be empty".to_string());
        }
        if let Some(meta) = &self.meta_data {
            validate_meta_data(meta)?;
        }
        for message in &self.additional_messages {
            if let Some(meta) = &message.meta_data {
                validate_meta_data(meta)?;
            }
        }
        Ok(())
    }
}
