// ABOUTME: Shared test utilities for routine coach integration tests
// ABOUTME: Provides a scripted text-generation provider and server resource builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `routine_coach`

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use futures_util::stream;
use routine_coach::{
    config::GenerationSettings,
    errors::{AppError, ErrorCode},
    llm::{ChatRequest, ChatStream, LlmProvider, StreamChunk},
    resources::ServerResources,
    session::SessionStore,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

/// One scripted stream item
#[derive(Debug, Clone)]
pub enum Step {
    /// Emit a text fragment
    Fragment(&'static str),
    /// Fail the stream with this code and message
    Fail(ErrorCode, &'static str),
}

/// Provider that replays a fixed script and remembers the last request
pub struct ScriptedProvider {
    script: Vec<Step>,
    reject_with: Option<(ErrorCode, &'static str)>,
    last_request: Mutex<Option<ChatRequest>>,
}

impl ScriptedProvider {
    /// Stream these fragments, in order
    pub fn fragments(fragments: &[&'static str]) -> Self {
        Self::script(fragments.iter().copied().map(Step::Fragment).collect())
    }

    /// Stream an arbitrary mix of fragments and failures
    pub fn script(script: Vec<Step>) -> Self {
        Self {
            script,
            reject_with: None,
            last_request: Mutex::new(None),
        }
    }

    /// Refuse the request before any stream is opened
    pub fn rejecting(code: ErrorCode, message: &'static str) -> Self {
        Self {
            script: Vec::new(),
            reject_with: Some((code, message)),
            last_request: Mutex::new(None),
        }
    }

    /// The request passed to the most recent `complete_stream` call
    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete_stream(&self, request: &ChatRequest) -> Result<ChatStream, AppError> {
        *self.last_request.lock().unwrap() = Some(request.clone());

        if let Some((code, message)) = self.reject_with {
            return Err(AppError::new(code, message));
        }

        let items: Vec<Result<StreamChunk, AppError>> = self
            .script
            .iter()
            .map(|step| match step {
                Step::Fragment(text) => Ok(StreamChunk {
                    delta: (*text).to_owned(),
                    is_final: false,
                    finish_reason: None,
                }),
                Step::Fail(code, message) => Err(AppError::new(*code, *message)),
            })
            .collect();

        Ok(Box::pin(stream::iter(items)))
    }
}

/// Resources backed by the given provider
pub fn resources_with(provider: Arc<dyn LlmProvider>) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(
        Some(provider),
        GenerationSettings::default(),
        SessionStore::new(16),
    ))
}

/// Resources with generation disabled
pub fn offline_resources() -> Arc<ServerResources> {
    Arc::new(ServerResources::new(
        None,
        GenerationSettings::default(),
        SessionStore::new(16),
    ))
}
