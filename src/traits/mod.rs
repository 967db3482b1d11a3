//! Trait seams for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP operations (GET, POST, streaming POST)

pub mod http;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response, LOGID_HEADER};
