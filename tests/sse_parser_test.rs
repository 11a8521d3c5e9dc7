// ABOUTME: Integration tests for the SSE framing used by the Gemini stream
// ABOUTME: Validates batched events, split payloads, split UTF-8, and end-of-stream flushing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use bytes::Bytes;
use futures_util::{stream, StreamExt};
use routine_coach::errors::{AppError, ErrorCode};
use routine_coach::llm::sse_parser::{create_sse_stream, SseEvent, SseLineBuffer};
use routine_coach::llm::StreamChunk;

/// Minimal payload decoder: `{"text": "...", "stop": bool}` or `{"fail": "..."}`
fn parse_payload(data: &str) -> Option<Result<StreamChunk, AppError>> {
    let value: serde_json::Value = serde_json::from_str(data).ok()?;
    if let Some(message) = value.get("fail").and_then(serde_json::Value::as_str) {
        return Some(Err(AppError::external_service("Test", message)));
    }
    let stop = value
        .get("stop")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);
    Some(Ok(StreamChunk {
        delta: value.get("text")?.as_str()?.to_owned(),
        is_final: stop,
        finish_reason: stop.then(|| "STOP".to_owned()),
    }))
}

async fn run_stream(chunks: &[&[u8]]) -> Vec<Result<StreamChunk, AppError>> {
    let owned: Vec<Bytes> = chunks.iter().map(|b| Bytes::copy_from_slice(b)).collect();
    let byte_stream = stream::iter(owned.into_iter().map(Ok::<Bytes, reqwest::Error>));
    create_sse_stream(byte_stream, parse_payload, "Test")
        .collect()
        .await
}

fn deltas(results: &[Result<StreamChunk, AppError>]) -> Vec<&str> {
    results
        .iter()
        .map(|r| r.as_ref().unwrap().delta.as_str())
        .collect()
}

#[tokio::test]
async fn test_batched_events_are_all_emitted() {
    let results = run_stream(&[
        b"data: {\"text\":\"Day 1\"}\r\n\r\ndata: {\"text\":\": Push\"}\r\n\r\n",
        b"data: {\"text\":\"\",\"stop\":true}\r\n\r\n",
    ])
    .await;

    assert_eq!(results.len(), 3);
    assert_eq!(deltas(&results[..2]), vec!["Day 1", ": Push"]);
    assert!(results[2].as_ref().unwrap().is_final);
}

#[tokio::test]
async fn test_payload_split_across_chunks() {
    let results = run_stream(&[
        b"data: {\"te",
        b"xt\":\"Squat 5x5\"}\n",
        b"\ndata: {\"text\":\" then rest\"}\n\n",
    ])
    .await;

    assert_eq!(deltas(&results), vec!["Squat 5x5", " then rest"]);
}

#[tokio::test]
async fn test_multibyte_character_split_across_chunks() {
    // "Días" with the two bytes of 'í' (0xC3 0xAD) in different chunks
    let results = run_stream(&[b"data: {\"text\":\"D\xC3", b"\xADas\"}\n\n"]).await;

    assert_eq!(deltas(&results), vec!["Días"]);
}

#[tokio::test]
async fn test_trailing_line_without_newline_is_flushed() {
    let results = run_stream(&[b"data: {\"text\":\"last words\"}"]).await;
    assert_eq!(deltas(&results), vec!["last words"]);
}

#[tokio::test]
async fn test_metadata_and_garbage_are_skipped() {
    let results = run_stream(&[
        b": keep-alive\n\n",
        b"data: {\"usage\":{\"total\":10}}\n\n",
        b"data: not json\n\n",
        b"data: {\"text\":\"kept\"}\n\n",
    ])
    .await;

    assert_eq!(deltas(&results), vec!["kept"]);
}

#[tokio::test]
async fn test_error_payload_surfaces_in_order() {
    let results = run_stream(&[
        b"data: {\"text\":\"partial\"}\n\n",
        b"data: {\"fail\":\"quota\"}\n\n",
    ])
    .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().delta, "partial");
    let error = results[1].as_ref().unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert!(error.message.contains("quota"));
}

#[tokio::test]
async fn test_done_marker_yields_final_chunk() {
    let results = run_stream(&[b"data: {\"text\":\"hi\"}\n\ndata: [DONE]\n\n"]).await;

    assert_eq!(results.len(), 2);
    assert!(results[1].as_ref().unwrap().is_final);
}

#[test]
fn test_line_buffer_ignores_non_data_fields() {
    let mut parser = SseLineBuffer::new();
    let events = parser.feed(b"event: message\nid: 7\ndata: {\"text\":\"hi\"}\n\n");
    assert_eq!(events, vec![SseEvent::Data("{\"text\":\"hi\"}".to_owned())]);
    assert!(parser.flush().is_empty());
}
