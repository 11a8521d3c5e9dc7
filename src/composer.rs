// ABOUTME: Prompt composer turning a user profile into one streamed routine
// ABOUTME: Builds the prompt, sends it with the trainer persona, and concatenates fragments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompt Composer
//!
//! One call to [`compose_and_generate`] is one round trip to the generation
//! service. The result is tagged: routine text in `Ok`, a typed [`AppError`]
//! otherwise. Partial text from a stream that fails midway is discarded.

use futures_util::StreamExt;
use tracing::{debug, info, instrument};

use crate::config::GenerationSettings;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::llm::prompts::get_trainer_system_prompt;
use crate::llm::{ChatMessage, ChatRequest, ChatStream, LlmProvider};
use crate::models::UserProfile;

/// Build the user prompt, embedding every profile field verbatim
#[must_use]
pub fn compose_prompt(profile: &UserProfile) -> String {
    format!(
        "Recommend a push pull legs gym routine for me.\n\
         Age: {}\n\
         Height (cm): {}\n\
         Sex: {}\n\
         Training days per week: {}\n\
         Diet type: {}\n\
         Goal: {}\n\
         Gym: {}\n\
         Experience: {}\n\
         Medical condition: {}",
        profile.age,
        profile.height_cm,
        profile.sex,
        profile.training_days,
        profile.diet,
        profile.goal,
        profile.gym_access,
        profile.experience,
        profile.medical_condition,
    )
}

/// Build the generation request: persona, prompt, and sampling settings
#[must_use]
pub fn build_chat_request(profile: &UserProfile, settings: &GenerationSettings) -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system(get_trainer_system_prompt()),
        ChatMessage::user(compose_prompt(profile)),
    ])
    .with_generation_settings(settings)
}

/// Concatenate every fragment in arrival order
///
/// # Errors
///
/// Returns the first stream error, discarding text received so far, or
/// `ExternalServiceError` if the stream carried no visible text.
pub async fn collect_stream(mut stream: ChatStream) -> AppResult<String> {
    let mut text = String::new();
    let mut fragments = 0_usize;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if !chunk.delta.is_empty() {
            fragments += 1;
            text.push_str(&chunk.delta);
        }
        if chunk.is_final {
            debug!(finish_reason = ?chunk.finish_reason, "Final fragment received");
        }
    }

    if text.trim().is_empty() {
        return Err(AppError::new(
            ErrorCode::ExternalServiceError,
            "The model returned an empty routine. Please try again.",
        ));
    }

    debug!(fragments, chars = text.len(), "Stream collected");
    Ok(text)
}

/// Validate the profile, stream a routine from `provider`, and return its text
///
/// # Errors
///
/// Returns a validation error for out-of-range profiles, or any provider,
/// transport, or stream error as a typed [`AppError`].
#[instrument(skip_all, fields(provider = provider.name(), model = provider.default_model()))]
pub async fn compose_and_generate(
    profile: &UserProfile,
    provider: &dyn LlmProvider,
    settings: &GenerationSettings,
) -> AppResult<String> {
    profile.validate()?;

    let request = build_chat_request(profile, settings);
    info!(
        age = profile.age,
        training_days = profile.training_days,
        goal = profile.goal.as_str(),
        "Requesting routine"
    );

    let stream = provider.complete_stream(&request).await?;
    let routine = collect_stream(stream).await?;

    info!(chars = routine.len(), "Routine generated");
    Ok(routine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MessageRole;

    #[test]
    fn test_prompt_keeps_empty_medical_condition_line() {
        let prompt = compose_prompt(&UserProfile::default());
        assert!(prompt.ends_with("Medical condition: "));
        assert!(prompt.contains("Gym: false"));
    }

    #[test]
    fn test_request_carries_persona_and_settings() {
        let settings = GenerationSettings::default();
        let request = build_chat_request(&UserProfile::default(), &settings);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(request.messages[1].role, MessageRole::User);
        assert_eq!(request.top_k, Some(settings.top_k));
        assert_eq!(request.response_mime_type.as_deref(), Some("text/plain"));
    }
}
