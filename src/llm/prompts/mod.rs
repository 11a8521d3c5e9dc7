// ABOUTME: System prompts for LLM interactions loaded at compile time
// ABOUTME: Provides the personal-trainer persona sent as the Gemini system instruction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.

/// Personal trainer persona
///
/// Contains instructions for the assistant including:
/// - The profile attributes every routine is based on
/// - BMI-derived guidance and a diet-based meal plan
/// - Push/pull/legs by default, six-week full-body adaptation for first-timers
pub const TRAINER_SYSTEM_PROMPT: &str = include_str!("trainer_system.md");

/// Get the system prompt sent with every routine request
#[must_use]
pub const fn get_trainer_system_prompt() -> &'static str {
    TRAINER_SYSTEM_PROMPT
}
