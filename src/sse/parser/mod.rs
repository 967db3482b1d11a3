//! Frame assembly and per-kind payload decoding.
//!
//! [`FrameReader`] groups raw lines into [`Frame`]s; [`decode_frame`] turns a
//! frame into a typed [`ChatEvent`] or a control outcome.

mod chat;
mod control;
mod message;

use tracing::debug;

use crate::error::{ChatStreamError, FramingError};
use crate::sse::events::{ChatEvent, EventCategory, EventKind, Frame, SseLine};

use chat::parse_chat_event;
use control::parse_error_event;
use message::parse_message_event;

const EVENT_PREFIX: &str = "event:";
const DATA_PREFIX: &str = "data:";

/// Classify a single line. A trailing `\r` is ignored; the field value after
/// the colon is kept verbatim.
pub fn parse_sse_line(line: &str) -> SseLine<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if line.is_empty() {
        return SseLine::Blank;
    }

    if let Some(rest) = line.strip_prefix(EVENT_PREFIX) {
        return SseLine::Event(rest);
    }

    if let Some(rest) = line.strip_prefix(DATA_PREFIX) {
        return SseLine::Data(rest);
    }

    SseLine::Other(line)
}

/// What a complete frame means for the sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// A payload-bearing event to hand to the caller
    Event(ChatEvent),
    /// The server sent `done`; the sequence ends cleanly
    Done,
}

/// Decode a complete frame.
///
/// `done` wins regardless of its data. `error` becomes
/// [`ChatStreamError::Server`]. Payload kinds are decoded against their
/// schema; anything else is [`ChatStreamError::UnknownEvent`].
pub fn decode_frame(frame: &Frame) -> Result<FrameOutcome, ChatStreamError> {
    let kind = EventKind::from_wire(&frame.event).ok_or_else(|| ChatStreamError::UnknownEvent {
        event: frame.event.clone(),
    })?;

    debug!(event = kind.as_str(), data_len = frame.data.len(), "decoding frame");

    match kind.category() {
        EventCategory::Control => match kind {
            EventKind::Done => Ok(FrameOutcome::Done),
            _ => Err(parse_error_event(&frame.data)),
        },
        EventCategory::Message => parse_message_event(kind, &frame.data).map(FrameOutcome::Event),
        EventCategory::Chat => parse_chat_event(kind, &frame.data).map(FrameOutcome::Event),
    }
}

/// Collects exactly one `event:` and one `data:` line per frame.
///
/// Blank lines are skipped wherever they appear and do not count toward the
/// frame. The order of the two lines does not matter.
#[derive(Debug, Default)]
pub struct FrameReader {
    event: Option<String>,
    data: Option<String>,
}

impl FrameReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line.
    ///
    /// Returns:
    /// - `Ok(Some(frame))` - both lines collected
    /// - `Ok(None)` - line consumed, frame incomplete
    /// - `Err(error)` - duplicate field or unrecognized line
    pub fn feed_line(&mut self, line: &str) -> Result<Option<Frame>, FramingError> {
        match parse_sse_line(line) {
            SseLine::Blank => return Ok(None),
            SseLine::Event(value) => {
                if self.event.is_some() {
                    return Err(FramingError::DuplicateField {
                        field: "event",
                        line: line.to_string(),
                    });
                }
                self.event = Some(value.to_string());
            }
            SseLine::Data(value) => {
                if self.data.is_some() {
                    return Err(FramingError::DuplicateField {
                        field: "data",
                        line: line.to_string(),
                    });
                }
                self.data = Some(value.to_string());
            }
            SseLine::Other(other) => {
                return Err(FramingError::UnrecognizedLine {
                    line: other.to_string(),
                });
            }
        }

        match (self.event.take(), self.data.take()) {
            (Some(event), Some(data)) => Ok(Some(Frame { event, data })),
            (event, data) => {
                self.event = event;
                self.data = data;
                Ok(None)
            }
        }
    }

    /// Signal end of input. Fails if a frame was left half-collected.
    pub fn finish(&mut self) -> Result<(), FramingError> {
        let result = match (&self.event, &self.data) {
            (Some(event), None) => Err(FramingError::IncompleteFrame {
                missing: "data",
                line: format!("{}{}", EVENT_PREFIX, event),
            }),
            (None, Some(data)) => Err(FramingError::IncompleteFrame {
                missing: "event",
                line: format!("{}{}", DATA_PREFIX, data),
            }),
            _ => Ok(()),
        };
        self.reset();
        result
    }

    /// Drop any partially collected frame.
    pub fn reset(&mut self) {
        self.event = None;
        self.data = None;
    }
}
