// ABOUTME: Configuration management module for centralized server settings and parameters
// ABOUTME: Re-exports environment-driven server, Gemini, and sampling configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for Routine Coach

/// Environment and server configuration
pub mod environment;

pub use environment::{GeminiConfig, GenerationSettings, ServerConfig};
