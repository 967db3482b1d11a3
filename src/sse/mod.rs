//! Chat event stream decoding
//!
//! The chat endpoint streams frames of exactly two lines:
//! - `event:<kind>` - one of the known event kinds
//! - `data:<json>` - payload for that kind
//!
//! The two lines may come in either order and blank lines between them are
//! skipped. `done` ends the sequence, `error` fails it.
//!
//! # Module structure
//! - `events` - Event kinds, categories and the typed `ChatEvent`
//! - `payloads` - Internal payload structs (error event body)
//! - `parser` - Line classification, frame assembly and frame decoding
//! - `decoder` - State machine and the blocking iterator
//! - `lines` - Byte stream to line stream
//! - `stream` - Async event stream

mod decoder;
mod events;
mod lines;
mod parser;
mod payloads;
mod stream;

// Re-export public types
pub use decoder::{decode_lines, ChatEventDecoder, ChatEventIter, DecodeStep};
pub use events::{ChatEvent, EventCategory, EventKind, Frame, SseLine};
pub use lines::{byte_lines, LineStream, MAX_LINE_BYTES};
pub use parser::{decode_frame, parse_sse_line, FrameOutcome, FrameReader};
pub use stream::{decode_byte_stream, event_stream, ChatEventStream};
