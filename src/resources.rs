// ABOUTME: Centralized resource container shared by every route handler
// ABOUTME: Holds the generation provider, sampling settings, and the session store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and shared behind an `Arc`. The provider is absent
//! when the server runs offline; handlers that need it get a `ConfigMissing`
//! error instead.

use std::sync::Arc;

use crate::config::{GenerationSettings, ServerConfig};
use crate::constants::env_vars;
use crate::errors::{AppError, AppResult};
use crate::llm::LlmProvider;
use crate::session::SessionStore;

/// Shared server state
#[derive(Clone)]
pub struct ServerResources {
    /// Text-generation backend, `None` in offline mode
    pub provider: Option<Arc<dyn LlmProvider>>,
    /// Sampling settings applied to every request
    pub generation: GenerationSettings,
    /// Per-browser last-routine slots
    pub sessions: SessionStore,
}

impl ServerResources {
    /// Create resources from parts
    #[must_use]
    pub const fn new(
        provider: Option<Arc<dyn LlmProvider>>,
        generation: GenerationSettings,
        sessions: SessionStore,
    ) -> Self {
        Self {
            provider,
            generation,
            sessions,
        }
    }

    /// Create resources from loaded configuration
    #[must_use]
    pub fn from_config(config: &ServerConfig, provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self::new(
            provider,
            config.generation.clone(),
            SessionStore::new(config.session_capacity),
        )
    }

    /// The generation provider, or a configuration error when offline
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no provider is configured.
    pub fn provider(&self) -> AppResult<&dyn LlmProvider> {
        self.provider.as_deref().ok_or_else(|| {
            AppError::config_missing(format!(
                "The routine generator is not configured. Set {} and restart the server.",
                env_vars::GEMINI_API_KEY
            ))
        })
    }

    /// Whether routines can be generated
    #[must_use]
    pub const fn is_generation_enabled(&self) -> bool {
        self.provider.is_some()
    }
}
