//! Async event stream over a transport.

use std::fmt::Display;
use std::pin::Pin;

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};

use crate::error::ChatStreamError;
use crate::sse::decoder::{ChatEventDecoder, DecodeStep};
use crate::sse::events::ChatEvent;
use crate::sse::lines::{byte_lines, LineStream};

/// Boxed stream of decoded chat events.
///
/// Ends with `None` after `done` or after the first error.
pub type ChatEventStream = Pin<Box<dyn Stream<Item = Result<ChatEvent, ChatStreamError>> + Send>>;

/// Decode an async line stream.
///
/// Each poll pulls lines only until the next frame completes; after the
/// sequence terminates or fails the line stream is no longer polled.
pub fn event_stream(lines: LineStream) -> ChatEventStream {
    let events = stream::unfold(
        (lines, ChatEventDecoder::new()),
        |(mut lines, mut decoder)| async move {
            while !decoder.is_finished() {
                let line = match lines.next().await {
                    Some(Ok(line)) => line,
                    Some(Err(e)) => {
                        let e = decoder.fail(e);
                        return Some((Err(e), (lines, decoder)));
                    }
                    None => {
                        return match decoder.finish() {
                            Ok(()) => None,
                            Err(e) => Some((Err(e), (lines, decoder))),
                        };
                    }
                };

                match decoder.feed_line(&line) {
                    Ok(DecodeStep::Emit(event)) => return Some((Ok(event), (lines, decoder))),
                    Ok(DecodeStep::NeedMore) => continue,
                    Ok(DecodeStep::Terminated) => return None,
                    Err(e) => return Some((Err(e), (lines, decoder))),
                }
            }
            None
        },
    );

    Box::pin(events)
}

/// Decode a raw byte stream, such as an HTTP response body.
pub fn decode_byte_stream<S, E>(bytes: S) -> ChatEventStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + Unpin + 'static,
    E: Display,
{
    event_stream(byte_lines(bytes))
}
