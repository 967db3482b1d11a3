use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::{timestamp_to_utc, MetaData};

/// Running status of a chat session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatStatus {
    Created,
    /// The bot is processing
    InProgress,
    Completed,
    Failed,
    /// Interrupted, the caller must submit tool results to continue
    RequiresAction,
    /// Stopped through the cancel endpoint
    Canceled,
}

impl ChatStatus {
    /// True once the chat has ended for good.
    ///
    /// `RequiresAction` is not terminal: the chat resumes once tool output
    /// is submitted.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ChatStatus::Completed | ChatStatus::Failed | ChatStatus::Canceled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatStatus::Created => "created",
            ChatStatus::InProgress => "in_progress",
            ChatStatus::Completed => "completed",
            ChatStatus::Failed => "failed",
            ChatStatus::RequiresAction => "requires_action",
            ChatStatus::Canceled => "canceled",
        }
    }
}

impl std::fmt::Display for ChatStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error details reported on a failed chat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatError {
    /// 0 means success
    pub code: i64,
    pub msg: String,
}

/// One conversation-processing session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chat {
    pub id: String,
    pub conversation_id: String,
    pub bot_id: String,
    pub status: ChatStatus,
    /// Unix timestamp in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<MetaData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<ChatError>,
}

impl Chat {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(timestamp_to_utc)
    }

    pub fn completed_at_utc(&self) -> Option<DateTime<Utc>> {
        self.completed_at.and_then(timestamp_to_utc)
    }

    pub fn failed_at_utc(&self) -> Option<DateTime<Utc>> {
        self.failed_at.and_then(timestamp_to_utc)
    }
}
