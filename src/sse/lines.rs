//! Splits a transport byte stream into text lines.

use std::fmt::Display;
use std::pin::Pin;

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};

use crate::error::ChatStreamError;

/// Boxed stream of lines without their terminators.
pub type LineStream = Pin<Box<dyn Stream<Item = Result<String, ChatStreamError>> + Send>>;

/// Longest line accepted before the stream is failed.
pub const MAX_LINE_BYTES: usize = 16 * 1024 * 1024;

struct LineState<S> {
    bytes: S,
    buffer: Vec<u8>,
    /// Bytes before this offset are known to hold no `\n`
    scan_from: usize,
    max_line: usize,
    eof: bool,
    failed: bool,
}

/// Turn chunks of bytes into lines.
///
/// Lines end at `\n`; a preceding `\r` is dropped. Bytes are buffered until a
/// full line is available, so multi-byte characters split across chunks are
/// reassembled. A final unterminated line is flushed at end of input.
/// Transport failures, invalid UTF-8 and lines longer than
/// [`MAX_LINE_BYTES`] yield one [`ChatStreamError::Transport`] and end the
/// stream.
pub fn byte_lines<S, E>(bytes: S) -> LineStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + Unpin + 'static,
    E: Display,
{
    split_lines(bytes, MAX_LINE_BYTES)
}

fn split_lines<S, E>(bytes: S, max_line: usize) -> LineStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + Unpin + 'static,
    E: Display,
{
    let state = LineState {
        bytes,
        buffer: Vec::new(),
        scan_from: 0,
        max_line,
        eof: false,
        failed: false,
    };

    let lines = stream::unfold(state, |mut state| async move {
        if state.failed {
            return None;
        }

        loop {
            let unscanned = &state.buffer[state.scan_from..];
            if let Some(offset) = unscanned.iter().position(|b| *b == b'\n') {
                let newline_pos = state.scan_from + offset;
                let mut line: Vec<u8> = state.buffer.drain(..=newline_pos).collect();
                state.scan_from = 0;
                line.pop();
                let item = into_line(line);
                state.failed = item.is_err();
                return Some((item, state));
            }
            state.scan_from = state.buffer.len();

            if state.buffer.len() > state.max_line {
                state.failed = true;
                let err = ChatStreamError::Transport(format!(
                    "line exceeds {} bytes",
                    state.max_line
                ));
                return Some((Err(err), state));
            }

            if state.eof {
                if state.buffer.is_empty() {
                    return None;
                }
                let line = std::mem::take(&mut state.buffer);
                let item = into_line(line);
                state.failed = item.is_err();
                return Some((item, state));
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => state.buffer.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    state.failed = true;
                    return Some((Err(ChatStreamError::Transport(e.to_string())), state));
                }
                None => state.eof = true,
            }
        }
    });

    Box::pin(lines)
}

fn into_line(mut line: Vec<u8>) -> Result<String, ChatStreamError> {
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    String::from_utf8(line)
        .map_err(|e| ChatStreamError::Transport(format!("invalid UTF-8 in stream: {}", e)))
}
