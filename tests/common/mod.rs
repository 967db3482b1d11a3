//! Common fixtures for integration tests.
//!
//! # Example
//!
//! ```ignore
//! mod common;
//! use common::{chat_json, frame_lines};
//!
//! let lines = frame_lines("conversation.chat.created", &chat_json("c1", "created"));
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use serde_json::json;

use coze_chat::config::CozeConfig;

pub const TEST_TOKEN: &str = "pat_test_token";
pub const TEST_BOT: &str = "7350000000000000001";
pub const TEST_USER: &str = "user-42";

/// JSON text of a chat payload.
pub fn chat_json(id: &str, status: &str) -> String {
    json!({
        "id": id,
        "conversation_id": "v1",
        "bot_id": "b1",
        "status": status,
        "created_at": 1718000000
    })
    .to_string()
}

/// JSON text of an assistant answer message.
pub fn answer_json(content: &str) -> String {
    json!({
        "role": "assistant",
        "type": "answer",
        "content": content,
        "content_type": "text",
        "chat_id": "c1",
        "conversation_id": "v1"
    })
    .to_string()
}

/// The two lines of one frame, event first.
pub fn frame_lines(event: &str, data: &str) -> Vec<String> {
    vec![format!("event:{}", event), format!("data:{}", data)]
}

/// A full response body: frames separated by blank lines, ending in `done`.
pub fn sse_body(frames: &[(&str, String)]) -> String {
    let mut body = String::new();
    for (event, data) in frames {
        body.push_str(&format!("event:{}\ndata:{}\n\n", event, data));
    }
    body.push_str("event:done\ndata:\n\n");
    body
}

/// A typical streamed answer: created, in progress, deltas, completed message,
/// completed chat.
pub fn answer_body(deltas: &[&str]) -> String {
    let mut frames = vec![
        ("conversation.chat.created", chat_json("c1", "created")),
        ("conversation.chat.in_progress", chat_json("c1", "in_progress")),
    ];
    for delta in deltas {
        frames.push(("conversation.message.delta", answer_json(delta)));
    }
    frames.push(("conversation.message.completed", answer_json(&deltas.concat())));
    frames.push(("conversation.chat.completed", chat_json("c1", "completed")));
    sse_body(&frames)
}

/// Config pointing at a mock server.
pub fn test_config(base_url: &str) -> CozeConfig {
    CozeConfig::new(TEST_TOKEN).with_base_url(base_url)
}
