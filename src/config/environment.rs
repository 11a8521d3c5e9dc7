// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Loads the Gemini credential, sampling parameters, and server options from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration.
//!
//! There is no configuration file: every setting comes from an environment
//! variable with a hardcoded default, except the Gemini API key which has no
//! default and is never embedded in the binary.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::constants::{env_vars, generation, server};
use crate::errors::{AppError, AppResult};

/// Sampling configuration sent with every generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling cutoff
    pub top_p: f32,
    /// Top-k sampling cutoff
    pub top_k: u32,
    /// Maximum number of generated tokens
    pub max_output_tokens: u32,
    /// Requested response MIME type
    pub response_mime_type: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: generation::DEFAULT_TEMPERATURE,
            top_p: generation::DEFAULT_TOP_P,
            top_k: generation::DEFAULT_TOP_K,
            max_output_tokens: generation::DEFAULT_MAX_OUTPUT_TOKENS,
            response_mime_type: generation::RESPONSE_MIME_TYPE.to_owned(),
        }
    }
}

impl GenerationSettings {
    /// Load sampling settings from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable is set but cannot be parsed
    /// or falls outside the range the API accepts.
    pub fn from_env() -> AppResult<Self> {
        let settings = Self {
            temperature: env_parse(
                env_vars::GEMINI_TEMPERATURE,
                generation::DEFAULT_TEMPERATURE,
            )?,
            top_p: env_parse(env_vars::GEMINI_TOP_P, generation::DEFAULT_TOP_P)?,
            top_k: env_parse(env_vars::GEMINI_TOP_K, generation::DEFAULT_TOP_K)?,
            max_output_tokens: env_parse(
                env_vars::GEMINI_MAX_OUTPUT_TOKENS,
                generation::DEFAULT_MAX_OUTPUT_TOKENS,
            )?,
            response_mime_type: generation::RESPONSE_MIME_TYPE.to_owned(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check the ranges accepted by the generation API
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending parameter.
    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::config(format!(
                "{} must be between 0.0 and 2.0",
                env_vars::GEMINI_TEMPERATURE
            )));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(AppError::config(format!(
                "{} must be between 0.0 and 1.0",
                env_vars::GEMINI_TOP_P
            )));
        }
        if self.top_k == 0 || self.max_output_tokens == 0 {
            return Err(AppError::config(format!(
                "{} and {} must be positive",
                env_vars::GEMINI_TOP_K,
                env_vars::GEMINI_MAX_OUTPUT_TOKENS
            )));
        }
        Ok(())
    }
}

/// Gemini connection settings
#[derive(Clone)]
pub struct GeminiConfig {
    /// API credential, `None` when the variable is unset or blank
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// API base URL (overridable for proxies and tests)
    pub base_url: String,
    /// Optional whole-request timeout
    pub timeout: Option<Duration>,
}

impl GeminiConfig {
    /// Load Gemini settings from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the timeout is not a whole number of seconds.
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var(env_vars::GEMINI_API_KEY)
            .ok()
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty());

        let timeout = match env::var(env_vars::GEMINI_TIMEOUT_SECS) {
            Ok(raw) => Some(Duration::from_secs(raw.trim().parse().map_err(|_| {
                AppError::config(format!(
                    "{} must be a whole number of seconds, got '{raw}'",
                    env_vars::GEMINI_TIMEOUT_SECS
                ))
            })?)),
            Err(_) => None,
        };

        Ok(Self {
            api_key,
            model: env::var(env_vars::GEMINI_MODEL)
                .unwrap_or_else(|_| generation::DEFAULT_MODEL.to_owned()),
            base_url: env::var(env_vars::GEMINI_BASE_URL)
                .unwrap_or_else(|_| generation::DEFAULT_BASE_URL.to_owned()),
            timeout,
        })
    }

    /// Return the API key or fail with an actionable message
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no key is configured.
    pub fn require_api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::config_missing(format!(
                "{} is not set. Export your Gemini API key or start the server with --offline",
                env_vars::GEMINI_API_KEY
            ))
        })
    }
}

impl Debug for GeminiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiConfig")
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Maximum number of live sessions kept in memory
    pub session_capacity: usize,
    /// Gemini connection settings
    pub gemini: GeminiConfig,
    /// Sampling settings
    pub generation: GenerationSettings,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// The API key is loaded but not required here; the binary decides
    /// whether a missing key is fatal.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any variable is set to an unparsable value.
    pub fn from_env() -> AppResult<Self> {
        let session_capacity =
            env_parse(env_vars::SESSION_CAPACITY, server::DEFAULT_SESSION_CAPACITY)?;
        if session_capacity == 0 {
            warn!(
                "{} is 0, falling back to {}",
                env_vars::SESSION_CAPACITY,
                server::DEFAULT_SESSION_CAPACITY
            );
        }

        Ok(Self {
            http_port: env_parse(env_vars::HTTP_PORT, server::DEFAULT_HTTP_PORT)?,
            session_capacity,
            gemini: GeminiConfig::from_env()?,
            generation: GenerationSettings::from_env()?,
        })
    }

    /// Human-readable configuration summary with secrets redacted
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Routine Coach Configuration:\n\
             - HTTP Port: {}\n\
             - Session Capacity: {}\n\
             - Gemini Model: {}\n\
             - Gemini Base URL: {}\n\
             - Gemini API Key: {}\n\
             - Sampling: temperature={} top_p={} top_k={} max_output_tokens={}",
            self.http_port,
            self.session_capacity,
            self.gemini.model,
            self.gemini.base_url,
            if self.gemini.api_key.is_some() {
                "Configured"
            } else {
                "Missing"
            },
            self.generation.temperature,
            self.generation.top_p,
            self.generation.top_k,
            self.generation.max_output_tokens,
        )
    }
}

/// Parse an optional environment variable, falling back to `default` when unset
fn env_parse<T>(name: &str, default: T) -> AppResult<T>
where
    T: FromStr,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{name} has an invalid value: '{raw}'"))),
        Err(_) => Ok(default),
    }
}
