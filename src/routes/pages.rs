// ABOUTME: HTML rendering for the routine form and its result notices
// ABOUTME: Escapes every user- and model-supplied string before it reaches the page
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::{Diet, Experience, GeneratedRoutine, Goal, Sex, UserProfile};

/// Message shown above the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Action succeeded
    Success(String),
    /// Action could not proceed
    Warning(String),
    /// Action failed
    Error(String),
}

impl Notice {
    const fn class(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Warning(_) => "warning",
            Self::Error(_) => "error",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Warning(m) | Self::Error(m) => m,
        }
    }
}

/// Everything the home page shows
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    /// Values pre-filled in the form
    pub profile: &'a UserProfile,
    /// Optional notice
    pub notice: Option<&'a Notice>,
    /// The session's last routine
    pub routine: Option<&'a GeneratedRoutine>,
    /// Whether the Generate action can reach the model
    pub generation_enabled: bool,
}

fn number_field(name: &str, label: &str, value: u32, min: u32, max: u32) -> String {
    format!(
        r#"<label for="{name}">{label}</label>
        <input type="number" id="{name}" name="{name}" min="{min}" max="{max}" value="{value}" required>"#
    )
}

fn select_field<T: Copy + PartialEq>(
    name: &str,
    label: &str,
    options: &[T],
    selected: T,
    value_of: fn(&T) -> &'static str,
    label_of: fn(&T) -> &'static str,
) -> String {
    let mut html = format!(r#"<label for="{name}">{label}</label><select id="{name}" name="{name}">"#);
    for option in options {
        let marker = if *option == selected { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<option value="{}"{marker}>{}</option>"#,
            value_of(option),
            label_of(option)
        );
    }
    html.push_str("</select>");
    html
}

fn routine_block(routine: Option<&GeneratedRoutine>) -> String {
    match routine {
        Some(GeneratedRoutine::Text(text)) => format!(
            "<h2>Generated routine</h2><pre class=\"routine\">{}</pre>",
            encode_text(text)
        ),
        Some(GeneratedRoutine::Record(record)) => format!(
            "<h2>Generated routine</h2><pre class=\"routine\">{}</pre>",
            encode_text(&serde_json::to_string_pretty(record).unwrap_or_default())
        ),
        None => "<p class=\"muted\">No routine saved in this session yet.</p>".to_owned(),
    }
}

/// Render the form page
#[must_use]
pub fn home_page(view: &PageView<'_>) -> String {
    let profile = view.profile;

    let notice = view.notice.map_or_else(String::new, |notice| {
        format!(
            r#"<div class="notice {}">{}</div>"#,
            notice.class(),
            encode_text(notice.message())
        )
    });

    let offline = if view.generation_enabled {
        String::new()
    } else {
        r#"<div class="notice warning">Routine generation is disabled: no Gemini API key is configured.</div>"#
            .to_owned()
    };

    let fields = [
        number_field(
            "age",
            "Age",
            profile.age,
            *UserProfile::AGE_RANGE.start(),
            *UserProfile::AGE_RANGE.end(),
        ),
        number_field(
            "height_cm",
            "Height in cm",
            profile.height_cm,
            *UserProfile::HEIGHT_RANGE.start(),
            *UserProfile::HEIGHT_RANGE.end(),
        ),
        select_field("sex", "Sex", Sex::ALL, profile.sex, Sex::as_str, Sex::label),
        number_field(
            "training_days",
            "Training days per week",
            profile.training_days,
            *UserProfile::TRAINING_DAYS_RANGE.start(),
            *UserProfile::TRAINING_DAYS_RANGE.end(),
        ),
        select_field("diet", "Diet type", Diet::ALL, profile.diet, Diet::as_str, Diet::label),
        select_field("goal", "Goal", Goal::ALL, profile.goal, Goal::as_str, Goal::label),
        format!(
            r#"<label class="inline"><input type="checkbox" name="gym_access" value="on"{}> Do you have access to a gym?</label>"#,
            if profile.gym_access { " checked" } else { "" }
        ),
        select_field(
            "experience",
            "Experience",
            Experience::ALL,
            profile.experience,
            Experience::as_str,
            Experience::label,
        ),
        format!(
            r#"<label for="medical_condition">Do you have any medical condition?</label>
        <input type="text" id="medical_condition" name="medical_condition" value="{}">"#,
            encode_double_quoted_attribute(&profile.medical_condition)
        ),
    ]
    .join("\n        ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Gym Routine Recommender</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px auto; max-width: 720px; color: #222; }}
        form {{ display: flex; flex-direction: column; gap: 8px; }}
        label.inline {{ display: flex; align-items: center; gap: 6px; }}
        input, select {{ padding: 6px; }}
        button {{ padding: 10px; margin-top: 8px; cursor: pointer; }}
        .notice {{ padding: 12px; border-radius: 4px; margin-bottom: 16px; }}
        .success {{ background-color: #e6ffed; }}
        .warning {{ background-color: #fff8e1; }}
        .error {{ background-color: #ffe6e6; color: #a00; }}
        .muted {{ color: #777; }}
        pre.routine {{ white-space: pre-wrap; background: #f7f7f7; padding: 16px; border-radius: 4px; }}
    </style>
</head>
<body>
    <h1>Gym Routine Recommender</h1>
    {offline}
    {notice}
    <form method="post" action="/routine/generate">
        {fields}
        <button type="submit">Generate Routine</button>
    </form>
    <form method="post" action="/routine/print">
        <button type="submit">Print Routine</button>
    </form>
    {routine}
</body>
</html>"#,
        routine = routine_block(view.routine),
    )
}
