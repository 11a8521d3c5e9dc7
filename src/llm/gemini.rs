// ABOUTME: Google Gemini LLM provider implementation with streaming support
// ABOUTME: Sends persona, prompt, and sampling configuration to the Generative Language API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of the `LlmProvider` trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio. The key travels in the `x-goog-api-key` header, never in
//! the URL, so it does not leak into access logs.
//!
//! ## Example
//!
//! ```rust,no_run
//! use routine_coach::llm::{ChatMessage, ChatRequest, GeminiProvider, LlmProvider};
//! use routine_coach::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let provider = GeminiProvider::from_env()?;
//!     let request = ChatRequest::new(vec![ChatMessage::user("Suggest a warm-up")]);
//!     let _fragments = provider.complete_stream(&request).await?;
//!     Ok(())
//! }
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use super::sse_parser::create_sse_stream;
use super::{ChatMessage, ChatRequest, ChatStream, LlmProvider, MessageRole, StreamChunk};
use crate::config::GeminiConfig;
use crate::constants::generation::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::errors::{AppError, AppResult, ErrorCode};

/// Provider name used in error messages
const PROVIDER_NAME: &str = "Gemini";

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Content structure for Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

/// Part of content; only text parts are produced in plain-text mode
#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// Generation configuration
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidate_count: Option<u32>,
}

/// Gemini API response structure (also the shape of each streamed event)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

/// Reported when the prompt itself is rejected
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// API error response from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

impl GeminiResponse {
    fn first_candidate(&self) -> Option<&Candidate> {
        self.candidates.as_ref().and_then(|c| c.first())
    }

    /// Concatenate every text part of the first candidate
    fn text(&self) -> String {
        self.first_candidate()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn finish_reason(&self) -> Option<String> {
        self.first_candidate().and_then(|c| c.finish_reason.clone())
    }

    fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    default_model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            default_model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }

    /// Create a provider from the `GEMINI_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if `GEMINI_API_KEY` is not set.
    pub fn from_env() -> AppResult<Self> {
        Self::from_config(&GeminiConfig::from_env()?)
    }

    /// Create a provider from loaded configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if the configuration carries no API key, or an
    /// internal error if the HTTP client cannot be built.
    pub fn from_config(config: &GeminiConfig) -> AppResult<Self> {
        let api_key = config.require_api_key()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            AppError::internal(format!("Failed to build HTTP client: {e}")).with_source(e)
        })?;

        Ok(Self {
            api_key: api_key.to_owned(),
            client,
            default_model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Point the provider at a different API root (proxies, local stand-ins)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Build the API URL for a model and method
    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    fn text_content(role: Option<String>, text: &str) -> GeminiContent {
        GeminiContent {
            role,
            parts: vec![ContentPart {
                text: Some(text.to_owned()),
            }],
        }
    }

    /// Split chat messages into conversation contents and the system instruction
    fn convert_messages(messages: &[ChatMessage]) -> (Vec<GeminiContent>, Option<GeminiContent>) {
        let mut contents = Vec::new();
        let mut system_instruction = None;

        for message in messages {
            if message.role == MessageRole::System {
                system_instruction = Some(Self::text_content(None, &message.content));
            } else {
                contents.push(Self::text_content(Some("user".to_owned()), &message.content));
            }
        }

        (contents, system_instruction)
    }

    /// Build a Gemini API request from a `ChatRequest`
    fn build_gemini_request(request: &ChatRequest) -> GeminiRequest {
        let (contents, system_instruction) = Self::convert_messages(&request.messages);

        let generation_config = GenerationConfig {
            temperature: request.temperature,
            top_p: request.top_p,
            top_k: request.top_k,
            max_output_tokens: request.max_tokens,
            response_mime_type: request.response_mime_type.clone(),
            candidate_count: Some(1),
        };

        GeminiRequest {
            contents,
            system_instruction,
            generation_config: Some(generation_config),
        }
    }

    /// Parse one streamed SSE payload into a fragment
    ///
    /// Undecodable payloads are skipped with a warning; API errors and
    /// blocked prompts end the stream with an error.
    fn parse_stream_event(data: &str) -> Option<AppResult<StreamChunk>> {
        let event = match serde_json::from_str::<GeminiResponse>(data) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "Failed to parse streaming chunk");
                return None;
            }
        };

        if let Some(api_error) = &event.error {
            return Some(Err(AppError::external_service(
                PROVIDER_NAME,
                api_error.message.clone(),
            )));
        }
        if let Some(reason) = event.block_reason() {
            return Some(Err(AppError::external_service(
                PROVIDER_NAME,
                format!("Prompt was blocked ({reason})"),
            )));
        }

        let finish_reason = event.finish_reason();
        Some(Ok(StreamChunk {
            delta: event.text(),
            is_final: finish_reason.is_some(),
            finish_reason,
        }))
    }

    /// Map API error status to appropriate error type
    ///
    /// For rate limit (429) and quota errors, returns a user-friendly error
    /// that exposes the retry delay reported by Gemini.
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            401 | 403 => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("Gemini rejected the API key ({status}): {message}"),
            ),
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                Self::extract_quota_message(&message),
            ),
            _ => AppError::external_service(
                PROVIDER_NAME,
                format!("API error ({status}): {message}"),
            ),
        }
    }

    /// Extract a user-friendly quota/rate limit message from Gemini error
    fn extract_quota_message(message: &str) -> String {
        // Example: "... Please retry in 6.406453963s."
        const RETRY_PREFIX: &str = "Please retry in ";
        let seconds = message
            .find(RETRY_PREFIX)
            .map(|pos| &message[pos + RETRY_PREFIX.len()..])
            .and_then(|rest| rest.find('s').map(|end| &rest[..end]))
            .and_then(|value| value.parse::<f64>().ok());

        seconds.map_or_else(
            || "AI service quota exceeded. Please wait a moment and try again.".to_owned(),
            |secs| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let seconds_int = secs.ceil() as u64;
                format!("AI service quota exceeded. Please try again in {seconds_int} seconds.")
            },
        )
    }

    fn transport_error(e: reqwest::Error) -> AppError {
        AppError::external_service(PROVIDER_NAME, format!("HTTP request failed: {e}")).with_source(e)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %self.default_model))]
    async fn complete_stream(&self, request: &ChatRequest) -> Result<ChatStream, AppError> {
        let url = self.build_url(&self.default_model, "streamGenerateContent");
        let gemini_request = Self::build_gemini_request(request);

        debug!("Starting streaming request to Gemini API");

        let response = self
            .client
            .post(&url)
            .query(&[("alt", "sse")])
            .header(API_KEY_HEADER, &self.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_owned());
            error!(status = %status, "Gemini streaming request rejected");
            return Err(Self::map_api_error(status.as_u16(), &error_text));
        }

        Ok(create_sse_stream(
            response.bytes_stream(),
            Self::parse_stream_event,
            PROVIDER_NAME,
        ))
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("default_model", &self.default_model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
