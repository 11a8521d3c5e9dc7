// ABOUTME: System-wide constants for Routine Coach
// ABOUTME: Environment variable names, defaults, document labels, and session settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded defaults and the names of the environment variables that
//! override them.

/// Service identity used in logs and health responses
pub mod service_names {
    /// Name reported by logging and the health endpoint
    pub const ROUTINE_COACH: &str = "routine-coach";
}

/// Environment variable names
pub mod env_vars {
    /// Gemini API credential (required unless running offline)
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Gemini model override
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    /// Gemini API base URL override
    pub const GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
    /// Sampling temperature
    pub const GEMINI_TEMPERATURE: &str = "GEMINI_TEMPERATURE";
    /// Nucleus sampling cutoff
    pub const GEMINI_TOP_P: &str = "GEMINI_TOP_P";
    /// Top-k sampling cutoff
    pub const GEMINI_TOP_K: &str = "GEMINI_TOP_K";
    /// Maximum generated tokens
    pub const GEMINI_MAX_OUTPUT_TOKENS: &str = "GEMINI_MAX_OUTPUT_TOKENS";
    /// Optional whole-request timeout in seconds
    pub const GEMINI_TIMEOUT_SECS: &str = "GEMINI_TIMEOUT_SECS";
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Maximum number of live sessions
    pub const SESSION_CAPACITY: &str = "SESSION_CAPACITY";
}

/// Generation defaults
pub mod generation {
    /// Default model
    pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
    /// Base URL for the Gemini API
    pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Sampling temperature
    pub const DEFAULT_TEMPERATURE: f32 = 1.0;
    /// Nucleus sampling cutoff
    pub const DEFAULT_TOP_P: f32 = 0.95;
    /// Top-k sampling cutoff
    pub const DEFAULT_TOP_K: u32 = 40;
    /// Maximum generated tokens
    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;
    /// Plain-text output mode
    pub const RESPONSE_MIME_TYPE: &str = "text/plain";
}

/// HTTP server defaults
pub mod server {
    /// Default listen port
    pub const DEFAULT_HTTP_PORT: u16 = 8501;
    /// Default maximum number of live sessions
    pub const DEFAULT_SESSION_CAPACITY: usize = 1000;
    /// Session cookie name
    pub const SESSION_COOKIE: &str = "routine_session";
    /// Download file name for the rendered routine
    pub const PDF_FILE_NAME: &str = "routine.pdf";
    /// MIME type of the rendered routine
    pub const PDF_MIME_TYPE: &str = "application/pdf";
}

/// Labels printed into the rendered document
pub mod document {
    /// Title used when the routine carries none
    pub const DEFAULT_TITLE: &str = "Workout Routine";
    /// Heading above the day/exercise table
    pub const DAYS_HEADING: &str = "Training Days and Exercises";
    /// Heading above the detailed exercise paragraphs
    pub const EXERCISES_HEADING: &str = "Detailed Exercises";
    /// Heading above the nutrition plan
    pub const NUTRITION_HEADING: &str = "Nutrition Plan";
    /// Table header cells
    pub const TABLE_HEADER: [&str; 2] = ["Day", "Exercise"];
}
