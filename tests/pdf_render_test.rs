// ABOUTME: Integration tests for routine PDF rendering
// ABOUTME: Checks story contents per routine shape, pagination, and deterministic output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use routine_coach::models::{
    normalize, ExerciseDetail, GeneratedRoutine, NormalizedRoutine, RoutineRecord, TrainingDay,
};
use routine_coach::pdf::story::{paragraphs, tables};
use routine_coach::pdf::{build_story, render, render_blocking, Flowable, ParagraphStyle};

fn record(record: RoutineRecord) -> NormalizedRoutine {
    normalize(GeneratedRoutine::Record(record))
}

#[test]
fn test_text_routine_story_has_title_and_nutrition_only() {
    let story = build_story(&normalize(GeneratedRoutine::Text("Hello".to_owned())));

    assert_eq!(paragraphs(&story, ParagraphStyle::Title), vec!["Workout Routine"]);
    assert_eq!(paragraphs(&story, ParagraphStyle::Heading), vec!["Nutrition Plan"]);
    assert_eq!(paragraphs(&story, ParagraphStyle::Body), vec!["Hello"]);
    assert!(tables(&story).is_empty());
}

#[test]
fn test_table_rows_skip_empty_days() {
    let routine = record(RoutineRecord {
        title: Some("PPL".to_owned()),
        days: vec![
            TrainingDay::new("Monday", vec!["Bench Press".to_owned(), "Dips".to_owned()]),
            TrainingDay::new("Tuesday", Vec::new()),
        ],
        ..RoutineRecord::default()
    });

    let story = build_story(&routine);
    let tables = tables(&story);
    assert_eq!(tables.len(), 1);

    let table = tables[0];
    assert_eq!(table.header, ["Day".to_owned(), "Exercise".to_owned()]);
    assert_eq!(
        table.rows,
        vec![
            ["Monday".to_owned(), "Bench Press".to_owned()],
            ["Monday".to_owned(), "Dips".to_owned()],
        ]
    );
    assert_eq!(
        paragraphs(&story, ParagraphStyle::Heading),
        vec!["Training Days and Exercises"]
    );
}

#[test]
fn test_exercise_paragraphs() {
    let routine = record(RoutineRecord {
        exercises: vec![ExerciseDetail::new("Curl", 3_i64, 12_i64)],
        ..RoutineRecord::default()
    });

    let story = build_story(&routine);
    assert_eq!(
        paragraphs(&story, ParagraphStyle::Heading),
        vec!["Detailed Exercises"]
    );
    assert_eq!(
        paragraphs(&story, ParagraphStyle::Body),
        vec!["Curl: 3 series de 12 repeticiones"]
    );
}

#[test]
fn test_empty_record_renders_title_only() {
    let story = build_story(&record(RoutineRecord::default()));

    assert_eq!(story.len(), 2);
    assert!(matches!(
        &story[0],
        Flowable::Paragraph { text, style: ParagraphStyle::Title } if text == "Workout Routine"
    ));
    assert!(matches!(story[1], Flowable::Spacer(_)));

    let document = render(&record(RoutineRecord::default()));
    assert_eq!(document.page_count, 1);
}

#[test]
fn test_sections_appear_in_fixed_order() {
    let routine = record(RoutineRecord {
        title: Some("Full".to_owned()),
        days: vec![TrainingDay::new("Monday", vec!["Squat".to_owned()])],
        exercises: vec![ExerciseDetail::new("Squat", 5_i64, 5_i64)],
        nutrition_plan: Some("Eat protein".to_owned()),
    });

    let story = build_story(&routine);
    assert_eq!(
        paragraphs(&story, ParagraphStyle::Heading),
        vec!["Training Days and Exercises", "Detailed Exercises", "Nutrition Plan"]
    );
}

#[test]
fn test_output_is_a_pdf_and_deterministic() {
    let routine = normalize(GeneratedRoutine::Text(
        "Breakfast: oats\nLunch: rice and chicken".to_owned(),
    ));

    let first = render(&routine);
    let second = render(&routine);

    assert!(first.bytes.starts_with(b"%PDF-"));
    assert_eq!(first.bytes, second.bytes);
    assert_eq!(first.page_count, 1);
}

#[test]
fn test_long_text_spans_several_pages() {
    let text = (1..=200)
        .map(|n| format!("Line {n}: eat vegetables, drink water, sleep eight hours"))
        .collect::<Vec<_>>()
        .join("\n");

    let document = render(&normalize(GeneratedRoutine::Text(text)));
    assert!(document.page_count > 1);
}

#[test]
fn test_non_latin_text_still_renders() {
    let document = render(&normalize(GeneratedRoutine::Text(
        "Día 1: sentadillas 💪 y 腿".to_owned(),
    )));
    assert!(document.bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_render_blocking_matches_render() {
    let routine = normalize(GeneratedRoutine::Text("Hello".to_owned()));
    let expected = render(&routine);

    let document = render_blocking(routine).await.unwrap();
    assert_eq!(document, expected);
}
