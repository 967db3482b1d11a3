//! Pull-based decoder turning raw lines into [`ChatEvent`]s.
//!
//! ```text
//!            ┌──────── Emit ───────┐
//!            v                     │
//!       AwaitFrame ──── done ────> Terminated
//!            │
//!            └──── any error ────> Failed
//! ```
//!
//! `Terminated` and `Failed` are absorbing: further lines are not read.

use std::iter::FusedIterator;

use tracing::{debug, warn};

use crate::error::ChatStreamError;
use crate::sse::events::ChatEvent;
use crate::sse::parser::{decode_frame, FrameOutcome, FrameReader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    AwaitFrame,
    Terminated,
    Failed,
}

/// Result of feeding one line.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeStep {
    /// The line was consumed; the frame is not complete yet
    NeedMore,
    /// A frame completed and decoded to an event
    Emit(ChatEvent),
    /// The sequence is over; nothing more will be produced
    Terminated,
}

/// Line-at-a-time decoder. Holds only the partially assembled frame.
#[derive(Debug)]
pub struct ChatEventDecoder {
    reader: FrameReader,
    state: DecoderState,
    frames: usize,
}

impl Default for ChatEventDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatEventDecoder {
    pub fn new() -> Self {
        Self {
            reader: FrameReader::new(),
            state: DecoderState::AwaitFrame,
            frames: 0,
        }
    }

    /// Feed one raw line (without its trailing `\n`).
    ///
    /// Errors are terminal: the decoder moves to the failed state and every
    /// later call returns `Ok(DecodeStep::Terminated)`.
    pub fn feed_line(&mut self, line: &str) -> Result<DecodeStep, ChatStreamError> {
        if self.state != DecoderState::AwaitFrame {
            return Ok(DecodeStep::Terminated);
        }

        let frame = match self.reader.feed_line(line) {
            Ok(Some(frame)) => frame,
            Ok(None) => return Ok(DecodeStep::NeedMore),
            Err(e) => return Err(self.fail(e.into())),
        };

        self.frames += 1;
        match decode_frame(&frame) {
            Ok(FrameOutcome::Event(event)) => Ok(DecodeStep::Emit(event)),
            Ok(FrameOutcome::Done) => {
                debug!(frames = self.frames, "chat stream done");
                self.state = DecoderState::Terminated;
                Ok(DecodeStep::Terminated)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Signal end of input.
    ///
    /// A half-collected frame is [`crate::error::FramingError::IncompleteFrame`].
    /// Input that stops on a frame boundary without `done` ends cleanly.
    pub fn finish(&mut self) -> Result<(), ChatStreamError> {
        if self.state != DecoderState::AwaitFrame {
            return Ok(());
        }

        if let Err(e) = self.reader.finish() {
            return Err(self.fail(e.into()));
        }

        warn!(frames = self.frames, "chat stream ended without done event");
        self.state = DecoderState::Terminated;
        Ok(())
    }

    /// True once the sequence has terminated or failed.
    pub fn is_finished(&self) -> bool {
        self.state != DecoderState::AwaitFrame
    }

    /// True if the sequence ended in an error.
    pub fn is_failed(&self) -> bool {
        self.state == DecoderState::Failed
    }

    /// Number of complete frames read so far, control frames included.
    pub fn frames_read(&self) -> usize {
        self.frames
    }

    /// Move to the failed state with an error raised outside the decoder,
    /// such as a transport failure.
    pub(crate) fn fail(&mut self, error: ChatStreamError) -> ChatStreamError {
        debug!(code = error.error_code(), "chat stream failed: {}", error);
        self.reader.reset();
        self.state = DecoderState::Failed;
        error
    }
}

/// Lazy iterator of events over a line source.
///
/// Yields at most one error, after which it is exhausted. Lines after `done`
/// are never pulled from the source.
pub struct ChatEventIter<I> {
    lines: I,
    decoder: ChatEventDecoder,
}

impl<I> ChatEventIter<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            decoder: ChatEventDecoder::new(),
        }
    }

    pub fn decoder(&self) -> &ChatEventDecoder {
        &self.decoder
    }
}

impl<I> Iterator for ChatEventIter<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<ChatEvent, ChatStreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.decoder.is_finished() {
            let Some(line) = self.lines.next() else {
                return self.decoder.finish().err().map(Err);
            };

            match self.decoder.feed_line(line.as_ref()) {
                Ok(DecodeStep::Emit(event)) => return Some(Ok(event)),
                Ok(DecodeStep::NeedMore) => continue,
                Ok(DecodeStep::Terminated) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}

impl<I> FusedIterator for ChatEventIter<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
}

/// Decode an in-memory or blocking line source.
pub fn decode_lines<I>(lines: I) -> ChatEventIter<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    ChatEventIter::new(lines.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FramingError;
    use crate::sse::events::EventKind;

    const CREATED: &str = r#"{"id":"c1","conversation_id":"v1","bot_id":"b1","status":"created"}"#;

    #[test]
    fn test_feed_line_steps() {
        let mut decoder = ChatEventDecoder::new();
        assert_eq!(
            decoder.feed_line("event:conversation.chat.created").unwrap(),
            DecodeStep::NeedMore
        );
        let step = decoder.feed_line(&format!("data:{}", CREATED)).unwrap();
        assert!(matches!(step, DecodeStep::Emit(ChatEvent::ChatCreated(_))));
        assert_eq!(decoder.feed_line("").unwrap(), DecodeStep::NeedMore);
        assert_eq!(decoder.feed_line("event:done").unwrap(), DecodeStep::NeedMore);
        assert_eq!(decoder.feed_line("data:").unwrap(), DecodeStep::Terminated);
        assert!(decoder.is_finished());
        assert!(!decoder.is_failed());
        assert_eq!(decoder.frames_read(), 2);
    }

    #[test]
    fn test_terminated_is_absorbing() {
        let mut decoder = ChatEventDecoder::new();
        decoder.feed_line("event:done").unwrap();
        decoder.feed_line("data:").unwrap();

        assert_eq!(decoder.feed_line("garbage").unwrap(), DecodeStep::Terminated);
        assert_eq!(decoder.feed_line("event:done").unwrap(), DecodeStep::Terminated);
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn test_failed_is_absorbing() {
        let mut decoder = ChatEventDecoder::new();
        let err = decoder.feed_line("garbage").unwrap_err();
        assert!(matches!(
            err,
            ChatStreamError::Framing(FramingError::UnrecognizedLine { .. })
        ));
        assert!(decoder.is_failed());

        assert_eq!(
            decoder.feed_line("event:conversation.chat.created").unwrap(),
            DecodeStep::Terminated
        );
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn test_finish_mid_frame() {
        let mut decoder = ChatEventDecoder::new();
        decoder.feed_line("event:conversation.chat.created").unwrap();
        let err = decoder.finish().unwrap_err();
        assert!(matches!(
            err,
            ChatStreamError::Framing(FramingError::IncompleteFrame { missing: "data", .. })
        ));
        assert!(decoder.is_failed());
    }

    #[test]
    fn test_finish_on_boundary_without_done() {
        let mut decoder = ChatEventDecoder::new();
        assert!(decoder.finish().is_ok());
        assert!(decoder.is_finished());
        assert!(!decoder.is_failed());
    }

    #[test]
    fn test_iter_stops_pulling_after_done() {
        let mut pulled = 0;
        let lines = ["event:done", "data:", "event:never", "data:read"]
            .into_iter()
            .inspect(|_| pulled += 1);

        let events: Vec<_> = decode_lines(lines).collect();
        assert!(events.is_empty());
        assert_eq!(pulled, 2);
    }

    #[test]
    fn test_iter_yields_single_error_then_none() {
        let lines = vec![
            "event:conversation.chat.created".to_string(),
            format!("data:{}", CREATED),
            "event:mystery".to_string(),
            "data:{}".to_string(),
            "event:done".to_string(),
            "data:".to_string(),
        ];

        let mut iter = decode_lines(lines);
        assert_eq!(iter.next().unwrap().unwrap().kind(), EventKind::ChatCreated);
        assert!(matches!(
            iter.next(),
            Some(Err(ChatStreamError::UnknownEvent { .. }))
        ));
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
        assert!(iter.decoder().is_failed());
    }

    #[test]
    fn test_iter_empty_input() {
        let lines: Vec<&str> = Vec::new();
        assert_eq!(decode_lines(lines).count(), 0);
    }

    #[test]
    fn test_iter_incomplete_frame_at_end() {
        let results: Vec<_> = decode_lines(["", "data:{}"]).collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0],
            Err(ChatStreamError::Framing(FramingError::IncompleteFrame { missing: "event", .. }))
        ));
    }
}
