// ABOUTME: Line-buffering SSE (Server-Sent Events) parser for LLM streaming responses
// ABOUTME: Handles partial lines and split UTF-8 sequences across TCP boundaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # SSE Stream Parser
//!
//! Solves three correctness issues of naive chunk-by-chunk parsing:
//!
//! 1. **Multiple events per TCP chunk**: every event in a batched chunk is emitted.
//! 2. **Partial JSON across TCP boundaries**: incomplete lines wait in the buffer.
//! 3. **Split UTF-8 sequences**: bytes are buffered and only complete lines are
//!    decoded, so accented characters cut in half by the network survive intact.
//!
//! The provider supplies a `parse_data` closure that converts one JSON payload
//! into a [`StreamChunk`]; the framing is handled here.

use std::collections::VecDeque;
use std::mem;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::stream::unfold;
use futures_util::{future, Stream, StreamExt};

use super::{ChatStream, StreamChunk};
use crate::errors::AppError;

/// A parsed SSE event from the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// A `data:` payload with the JSON string (prefix stripped)
    Data(String),
    /// The `[DONE]` termination signal
    Done,
}

/// Line-buffering SSE parser
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    /// Bytes not yet terminated by a newline
    buffer: Vec<u8>,
}

impl SseLineBuffer {
    /// Create a new empty line buffer
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Feed raw bytes from a TCP chunk, returning any complete SSE events
    ///
    /// Any trailing partial line remains buffered for the next call.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(newline_pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
            if let Some(event) = Self::parse_line(&String::from_utf8_lossy(&line)) {
                events.push(event);
            }
        }
        events
    }

    /// Flush the remaining buffered content when the byte stream ends
    pub fn flush(&mut self) -> Vec<SseEvent> {
        let remaining = mem::take(&mut self.buffer);
        Self::parse_line(&String::from_utf8_lossy(&remaining))
            .into_iter()
            .collect()
    }

    /// Interpret one line; non-data fields (`event:`, `id:`, comments) are ignored
    fn parse_line(line: &str) -> Option<SseEvent> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed == "data: [DONE]" {
            return Some(SseEvent::Done);
        }
        trimmed
            .strip_prefix("data:")
            .map(str::trim)
            .filter(|data| !data.is_empty())
            .map(|data| SseEvent::Data(data.to_owned()))
    }
}

/// Internal state for the SSE stream unfold
struct SseStreamState {
    parser: SseLineBuffer,
    pending: VecDeque<Result<StreamChunk, AppError>>,
    stream_ended: bool,
}

impl SseStreamState {
    fn enqueue<F>(&mut self, events: Vec<SseEvent>, parse_data: &F)
    where
        F: Fn(&str) -> Option<Result<StreamChunk, AppError>>,
    {
        for event in events {
            match event {
                SseEvent::Data(json_str) => {
                    if let Some(result) = parse_data(&json_str) {
                        self.pending.push_back(result);
                    }
                }
                SseEvent::Done => self.pending.push_back(Ok(StreamChunk {
                    delta: String::new(),
                    is_final: true,
                    finish_reason: Some("stop".to_owned()),
                })),
            }
        }
    }
}

/// Create a properly-buffered fragment stream from a raw byte stream
///
/// `parse_data` returns `None` to skip events that carry no output
/// (metadata-only chunks, undecodable payloads). Empty non-final deltas are
/// filtered out.
pub fn create_sse_stream<S, F>(
    byte_stream: S,
    parse_data: F,
    provider_name: &'static str,
) -> ChatStream
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    F: Fn(&str) -> Option<Result<StreamChunk, AppError>> + Send + 'static,
{
    let state = SseStreamState {
        parser: SseLineBuffer::new(),
        pending: VecDeque::new(),
        stream_ended: false,
    };

    let stream = unfold(
        (
            Box::pin(byte_stream)
                as Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>,
            state,
            parse_data,
        ),
        move |(mut byte_stream, mut state, parse_data)| async move {
            loop {
                if let Some(item) = state.pending.pop_front() {
                    return Some((item, (byte_stream, state, parse_data)));
                }
                if state.stream_ended {
                    return None;
                }

                match byte_stream.next().await {
                    Some(Ok(bytes)) => {
                        let events = state.parser.feed(&bytes);
                        state.enqueue(events, &parse_data);
                    }
                    Some(Err(e)) => {
                        state.stream_ended = true;
                        return Some((
                            Err(AppError::external_service(
                                provider_name,
                                format!("Stream read error: {e}"),
                            )
                            .with_source(e)),
                            (byte_stream, state, parse_data),
                        ));
                    }
                    None => {
                        state.stream_ended = true;
                        let events = state.parser.flush();
                        state.enqueue(events, &parse_data);
                    }
                }
            }
        },
    );

    let filtered = stream.filter(|result| {
        future::ready(
            result
                .as_ref()
                .map_or(true, |chunk| !chunk.delta.is_empty() || chunk.is_final),
        )
    });

    Box::pin(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_buffers_partial_lines() {
        let mut parser = SseLineBuffer::new();
        assert!(parser.feed(b"data: {\"a\":").is_empty());
        let events = parser.feed(b"1}\n\n");
        assert_eq!(events, vec![SseEvent::Data("{\"a\":1}".to_owned())]);
    }

    #[test]
    fn test_feed_keeps_utf8_split_across_chunks() {
        let text = "data: {\"t\":\"Días\"}\n".as_bytes();
        // Split inside the two-byte encoding of 'í'
        let split = text.iter().position(|&b| b == 0xC3).map_or(0, |p| p + 1);
        let mut parser = SseLineBuffer::new();
        assert!(parser.feed(&text[..split]).is_empty());
        let events = parser.feed(&text[split..]);
        assert_eq!(events, vec![SseEvent::Data("{\"t\":\"Días\"}".to_owned())]);
    }

    #[test]
    fn test_ignores_non_data_fields_and_detects_done() {
        let mut parser = SseLineBuffer::new();
        let events = parser.feed(b": keepalive\nevent: message\nid: 7\ndata: [DONE]\n");
        assert_eq!(events, vec![SseEvent::Done]);
    }

    #[test]
    fn test_flush_emits_unterminated_line() {
        let mut parser = SseLineBuffer::new();
        assert!(parser.feed(b"data: {\"x\":true}").is_empty());
        assert_eq!(
            parser.flush(),
            vec![SseEvent::Data("{\"x\":true}".to_owned())]
        );
        assert!(parser.flush().is_empty());
    }
}
