// ABOUTME: Main library entry point for the Routine Coach workout recommender
// ABOUTME: Provides prompt composition, Gemini streaming, PDF rendering, and the HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy.
#![deny(unsafe_code)]

//! # Routine Coach
//!
//! A small web form collects a user's physical attributes and training
//! preferences, sends them to Google Gemini as a prompt with a personal-trainer
//! persona, shows the streamed answer, and renders it to a downloadable PDF.
//!
//! ## Architecture
//!
//! - **Composer**: profile to prompt, prompt to one concatenated routine
//! - **LLM**: provider trait, Gemini client, SSE stream parsing
//! - **Models**: user profile, generated and normalized routines
//! - **PDF**: story assembly, page layout, deterministic serialization
//! - **Session**: bounded per-browser last-routine slots
//! - **Routes**: HTML form, JSON API, health checks
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use routine_coach::config::ServerConfig;
//! use routine_coach::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Routine Coach configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Prompt composition and stream collection
pub mod composer;
/// Environment configuration
pub mod config;
/// Named constants
pub mod constants;
/// Unified error handling
pub mod errors;
/// Text-generation providers
pub mod llm;
/// Structured logging setup
pub mod logging;
/// Data models
pub mod models;
/// PDF rendering
pub mod pdf;
/// Shared handler state
pub mod resources;
/// HTTP routes
pub mod routes;
/// HTTP server assembly
pub mod server;
/// Per-browser session state
pub mod session;
