// ABOUTME: Integration tests for prompt composition and routine stream collection
// ABOUTME: Covers field embedding, fragment ordering, mid-stream failures, and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{ScriptedProvider, Step};
use routine_coach::composer::{build_chat_request, compose_and_generate, compose_prompt};
use routine_coach::config::GenerationSettings;
use routine_coach::errors::ErrorCode;
use routine_coach::llm::MessageRole;
use routine_coach::models::{Diet, Experience, Goal, Sex, UserProfile};

fn boundary_profile() -> UserProfile {
    UserProfile {
        age: 10,
        height_cm: 300,
        sex: Sex::Female,
        training_days: 7,
        diet: Diet::Vegan,
        goal: Goal::LoseWeight,
        gym_access: true,
        experience: Experience::Advanced,
        medical_condition: "Asthma, mild knee pain".to_owned(),
    }
}

#[test]
fn test_prompt_embeds_every_field() {
    let prompt = compose_prompt(&boundary_profile());

    assert!(prompt.starts_with("Recommend a push pull legs gym routine for me."));
    for expected in [
        "Age: 10",
        "Height (cm): 300",
        "Sex: Female",
        "Training days per week: 7",
        "Diet type: Vegan",
        "Goal: Lose weight",
        "Gym: true",
        "Experience: Advanced",
        "Medical condition: Asthma, mild knee pain",
    ] {
        assert!(prompt.contains(expected), "missing '{expected}' in {prompt}");
    }
}

fn lower_boundary_profile() -> UserProfile {
    UserProfile {
        age: 100,
        height_cm: 100,
        sex: Sex::Male,
        training_days: 1,
        diet: Diet::Omnivore,
        goal: Goal::BuildMuscle,
        gym_access: false,
        experience: Experience::Beginner,
        medical_condition: "None".to_owned(),
    }
}

#[test]
fn test_prompt_lines_for_opposite_extremes() {
    let profile = lower_boundary_profile();
    assert!(profile.validate().is_ok());

    let prompt = compose_prompt(&profile);
    let lines: Vec<&str> = prompt.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Recommend a push pull legs gym routine for me.",
            "Age: 100",
            "Height (cm): 100",
            "Sex: Male",
            "Training days per week: 1",
            "Diet type: Omnivore",
            "Goal: Build muscle",
            "Gym: false",
            "Experience: Beginner",
            "Medical condition: None",
        ]
    );
}

#[test]
fn test_prompt_uses_every_option_label() {
    let mut profile = lower_boundary_profile();
    profile.diet = Diet::Vegetarian;
    profile.goal = Goal::DefineMuscles;
    profile.experience = Experience::Intermediate;

    let prompt = compose_prompt(&profile);
    assert!(prompt.contains("\nDiet type: Vegetarian\n"));
    assert!(prompt.contains("\nGoal: Define muscles\n"));
    assert!(prompt.contains("\nExperience: Intermediate\n"));
}

#[test]
fn test_prompt_field_order_is_stable() {
    let prompt = compose_prompt(&boundary_profile());
    let labels = [
        "Age:",
        "Height (cm):",
        "Sex:",
        "Training days per week:",
        "Diet type:",
        "Goal:",
        "Gym:",
        "Experience:",
        "Medical condition:",
    ];
    let positions: Vec<usize> = labels
        .iter()
        .map(|label| prompt.find(label).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_request_carries_persona_and_settings() {
    let settings = GenerationSettings::default();
    let request = build_chat_request(&boundary_profile(), &settings);

    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, MessageRole::System);
    assert!(request.messages[0].content.contains("push-pull-legs"));
    assert_eq!(request.messages[1].role, MessageRole::User);
    assert_eq!(request.top_k, Some(settings.top_k));
    assert_eq!(request.max_tokens, Some(settings.max_output_tokens));
}

#[tokio::test]
async fn test_fragments_are_concatenated_in_order() {
    let provider = ScriptedProvider::fragments(&["Day 1: ", "Push", "\nDay 2: Pull"]);

    let routine = compose_and_generate(
        &boundary_profile(),
        &provider,
        &GenerationSettings::default(),
    )
    .await
    .unwrap();

    assert_eq!(routine, "Day 1: Push\nDay 2: Pull");

    let request = provider.last_request().unwrap();
    assert!(request.messages[1].content.contains("Medical condition: Asthma"));
}

#[tokio::test]
async fn test_mid_stream_error_discards_partial_text() {
    let provider = ScriptedProvider::script(vec![
        Step::Fragment("Day 1: Push"),
        Step::Fail(ErrorCode::ExternalServiceError, "connection reset"),
        Step::Fragment("never seen"),
    ]);

    let error = compose_and_generate(
        &UserProfile::default(),
        &provider,
        &GenerationSettings::default(),
    )
    .await
    .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert_eq!(error.message, "connection reset");
}

#[tokio::test]
async fn test_empty_stream_is_an_error() {
    let provider = ScriptedProvider::fragments(&[]);

    let error = compose_and_generate(
        &UserProfile::default(),
        &provider,
        &GenerationSettings::default(),
    )
    .await
    .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert!(error.message.contains("empty routine"));
}

#[tokio::test]
async fn test_whitespace_only_stream_is_an_error() {
    let provider = ScriptedProvider::fragments(&["  ", "\n"]);

    let result = compose_and_generate(
        &UserProfile::default(),
        &provider,
        &GenerationSettings::default(),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_out_of_range_profile_never_reaches_provider() {
    let provider = ScriptedProvider::fragments(&["unused"]);
    let profile = UserProfile {
        training_days: 8,
        ..UserProfile::default()
    };

    let error = compose_and_generate(&profile, &provider, &GenerationSettings::default())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ValueOutOfRange);
    assert!(error.message.contains("training_days"));
    assert!(provider.last_request().is_none());
}

#[tokio::test]
async fn test_provider_rejection_is_propagated() {
    let provider =
        ScriptedProvider::rejecting(ErrorCode::ExternalAuthFailed, "Gemini rejected the API key");

    let error = compose_and_generate(
        &UserProfile::default(),
        &provider,
        &GenerationSettings::default(),
    )
    .await
    .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalAuthFailed);
}
