//! Data shapes exchanged with the chat API.
//!
//! `Message` and `Chat` are both stream payloads and responses of the
//! buffered endpoints; `CreateChatRequest` is the body of `POST /v3/chat`.

mod chat;
mod message;
mod request;
mod response;

pub use chat::{Chat, ChatError, ChatStatus};
pub use message::{
    validate_meta_data, Message, MessageContentType, MessageObjectString,
    MessageObjectStringType, MessageRole, MessageType, MetaData, META_DATA_MAX_ENTRIES,
    META_DATA_MAX_KEY_LEN, META_DATA_MAX_VALUE_LEN,
};
pub use request::CreateChatRequest;
pub use response::ApiResponse;
