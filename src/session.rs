// ABOUTME: Per-browser session state holding the last generated routine
// ABOUTME: Bounded LRU store keyed by a cookie-borne UUID, isolated between sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Sessions
//!
//! Each browser gets one [`SessionState`] with a single last-routine slot
//! (last write wins, no history). The store is process-local and bounded:
//! when full, the least recently used session is evicted. Nothing survives
//! a restart.

use std::num::NonZeroUsize;
use std::sync::Arc;

use axum::http::{header, HeaderMap, HeaderValue};
use lru::LruCache;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::constants::server::{DEFAULT_SESSION_CAPACITY, SESSION_COOKIE};
use crate::models::GeneratedRoutine;

/// Data retained across one user's repeated actions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    last_routine: Option<GeneratedRoutine>,
}

impl SessionState {
    /// Replace the stored routine
    pub fn record_routine(&mut self, routine: GeneratedRoutine) {
        self.last_routine = Some(routine);
    }

    /// The most recently generated routine, if any
    #[must_use]
    pub const fn last_routine(&self) -> Option<&GeneratedRoutine> {
        self.last_routine.as_ref()
    }
}

/// Bounded in-memory session store
///
/// Cloning shares the underlying map. The lock is only held for map access,
/// never across a generation call.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<LruCache<Uuid, SessionState>>>,
}

impl SessionStore {
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_SESSION_CAPACITY) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a store holding at most `capacity` sessions (0 means the default)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            sessions: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Clone of a session's last routine
    pub async fn last_routine(&self, id: Uuid) -> Option<GeneratedRoutine> {
        self.sessions
            .write()
            .await
            .get(&id)
            .and_then(|state| state.last_routine().cloned())
    }

    /// Store a routine in a session, creating the session if needed
    pub async fn record_routine(&self, id: Uuid, routine: GeneratedRoutine) {
        let mut sessions = self.sessions.write().await;
        sessions
            .get_or_insert_mut(id, SessionState::default)
            .record_routine(routine);
        let live = sessions.len();
        drop(sessions);
        debug!(session = %id, live, "Routine stored in session");
    }

    /// Number of live sessions, reported by `/ready`
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_CAPACITY)
    }
}

/// Session identity resolved from a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionHandle {
    /// Session key
    pub id: Uuid,
    /// True when the request carried no valid session cookie
    pub is_new: bool,
}

impl SessionHandle {
    /// Read the session cookie, minting a new id when absent or malformed
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(extract_session_id)
            .map_or_else(
                || Self {
                    id: Uuid::new_v4(),
                    is_new: true,
                },
                |id| Self { id, is_new: false },
            )
    }

    /// `Set-Cookie` value to send back, only for new sessions
    #[must_use]
    pub fn set_cookie(&self) -> Option<HeaderValue> {
        if !self.is_new {
            return None;
        }
        HeaderValue::from_str(&format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.id
        ))
        .ok()
    }
}

/// Extract the session id from one `Cookie` header value
fn extract_session_id(cookie_header: &str) -> Option<Uuid> {
    cookie_header
        .split(';')
        .filter_map(|cookie| cookie.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_session_id_among_other_cookies() {
        let id = Uuid::new_v4();
        let header = format!("theme=dark; {SESSION_COOKIE}={id}; lang=en");
        assert_eq!(extract_session_id(&header), Some(id));
        assert_eq!(extract_session_id("routine_session=not-a-uuid"), None);
    }

    #[test]
    fn test_new_handle_sets_http_only_cookie() {
        let handle = SessionHandle::from_headers(&HeaderMap::new());
        assert!(handle.is_new);
        let cookie = handle
            .set_cookie()
            .and_then(|v| v.to_str().ok().map(str::to_owned))
            .unwrap_or_default();
        assert!(cookie.starts_with(&format!("{SESSION_COOKIE}={}", handle.id)));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
    }
}
