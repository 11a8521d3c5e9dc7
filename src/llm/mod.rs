// ABOUTME: LLM provider abstraction layer for pluggable text-generation backends
// ABOUTME: Defines chat messages, sampling-aware requests, fragment streams, and the provider trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Interface
//!
//! This module defines the contract a text-generation backend implements to
//! serve routine requests. Gemini is the production implementation; tests
//! plug in scripted providers through the same trait.
//!
//! ## Key Concepts
//!
//! - **`LlmProvider`**: async trait for streaming completion
//! - **`ChatMessage`**: role-based message structure
//! - **`ChatRequest`**: messages plus sampling configuration
//! - **`ChatStream`**: lazy, finite, non-restartable stream of text fragments
//!
//! ## Example
//!
//! ```rust,no_run
//! use routine_coach::llm::{ChatMessage, ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::new(vec![
//!         ChatMessage::system("You are a personal trainer."),
//!         ChatMessage::user("Suggest a warm-up."),
//!     ]);
//!     let fragments = provider.complete_stream(&request).await;
//! }
//! ```

mod gemini;
pub mod prompts;
pub mod sse_parser;

pub use gemini::GeminiProvider;

use std::pin::Pin;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_stream::Stream;

use crate::config::GenerationSettings;
use crate::errors::AppError;

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
}

/// A single message in a chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Configuration for a completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Temperature for response randomness (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Nucleus sampling cutoff (0.0 - 1.0)
    pub top_p: Option<f32>,
    /// Top-k sampling cutoff
    pub top_k: Option<u32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Requested output MIME type (e.g. `text/plain`)
    pub response_mime_type: Option<String>,
}

impl ChatRequest {
    /// Create a new request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            top_p: None,
            top_k: None,
            max_tokens: None,
            response_mime_type: None,
        }
    }

    /// Apply every sampling parameter from `settings`
    #[must_use]
    pub fn with_generation_settings(mut self, settings: &GenerationSettings) -> Self {
        self.temperature = Some(settings.temperature);
        self.top_p = Some(settings.top_p);
        self.top_k = Some(settings.top_k);
        self.max_tokens = Some(settings.max_output_tokens);
        self.response_mime_type = Some(settings.response_mime_type.clone());
        self
    }
}

/// A fragment of a streaming response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Content delta for this fragment
    pub delta: String,
    /// Whether this is the final fragment
    pub is_final: bool,
    /// Finish reason if final
    pub finish_reason: Option<String>,
}

/// Stream type for completion responses
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, AppError>> + Send>>;

// ============================================================================
// Provider Trait
// ============================================================================

/// Text-generation provider
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "gemini")
    fn name(&self) -> &'static str;

    /// Model every request is sent to
    fn default_model(&self) -> &str;

    /// Perform a streaming completion
    ///
    /// Returns a stream of fragments that can be consumed incrementally.
    async fn complete_stream(&self, request: &ChatRequest) -> Result<ChatStream, AppError>;
}
