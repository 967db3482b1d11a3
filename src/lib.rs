//! Client for the Coze v3 chat API.
//!
//! The core is [`sse`], which decodes the streamed `event:`/`data:` frames
//! of a chat into typed [`sse::ChatEvent`]s. [`client::ChatClient`] wraps the
//! chat endpoints on top of the [`traits::HttpClient`] seam.
//!
//! ```ignore
//! use coze_chat::{client::ChatClient, models::{CreateChatRequest, Message}};
//! use futures::StreamExt;
//!
//! let client = ChatClient::from_env()?;
//! let request = CreateChatRequest::new("bot", "user").with_message(Message::user_text("hi"));
//! let mut events = client.stream(request).await?;
//! while let Some(event) = events.next().await {
//!     println!("{:?}", event?.kind());
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod sse;
pub mod traits;
