// ABOUTME: Integration tests for per-browser session storage
// ABOUTME: Covers isolation between sessions, overwrite semantics, eviction, and cookie handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use axum::http::{header, HeaderMap, HeaderValue};
use routine_coach::models::GeneratedRoutine;
use routine_coach::session::{SessionHandle, SessionStore};
use uuid::Uuid;

fn text(value: &str) -> GeneratedRoutine {
    GeneratedRoutine::Text(value.to_owned())
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let store = SessionStore::new(10);
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    store.record_routine(alice, text("alice routine")).await;

    assert_eq!(store.last_routine(alice).await, Some(text("alice routine")));
    assert_eq!(store.last_routine(bob).await, None);
}

#[tokio::test]
async fn test_last_write_wins() {
    let store = SessionStore::new(10);
    let id = Uuid::new_v4();

    store.record_routine(id, text("first")).await;
    store.record_routine(id, text("second")).await;

    assert_eq!(store.last_routine(id).await, Some(text("second")));
    assert_eq!(store.session_count().await, 1);
}

#[tokio::test]
async fn test_least_recently_used_session_is_evicted() {
    let store = SessionStore::new(2);
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    store.record_routine(a, text("a")).await;
    store.record_routine(b, text("b")).await;
    // Touch `a` so `b` becomes the eviction candidate
    assert!(store.last_routine(a).await.is_some());
    store.record_routine(c, text("c")).await;

    assert_eq!(store.session_count().await, 2);
    assert_eq!(store.last_routine(b).await, None);
    assert_eq!(store.last_routine(a).await, Some(text("a")));
    assert_eq!(store.last_routine(c).await, Some(text("c")));
}

#[tokio::test]
async fn test_zero_capacity_uses_default() {
    let store = SessionStore::new(0);
    assert_eq!(store.session_count().await, 0);

    for _ in 0..5 {
        store.record_routine(Uuid::new_v4(), text("x")).await;
    }
    assert_eq!(store.session_count().await, 5);
}

#[test]
fn test_missing_cookie_starts_new_session() {
    let handle = SessionHandle::from_headers(&HeaderMap::new());

    assert!(handle.is_new);
    let cookie = handle.set_cookie().unwrap();
    let cookie = cookie.to_str().unwrap();
    assert!(cookie.starts_with(&format!("routine_session={}", handle.id)));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
}

#[test]
fn test_existing_cookie_is_reused() {
    let id = Uuid::new_v4();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_str(&format!("theme=dark; routine_session={id}")).unwrap(),
    );

    let handle = SessionHandle::from_headers(&headers);
    assert_eq!(handle.id, id);
    assert!(!handle.is_new);
    assert!(handle.set_cookie().is_none());
}

#[test]
fn test_malformed_cookie_starts_new_session() {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_static("routine_session=not-a-uuid"),
    );

    let handle = SessionHandle::from_headers(&headers);
    assert!(handle.is_new);
}
