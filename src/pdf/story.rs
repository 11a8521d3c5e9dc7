// ABOUTME: Document story assembly from a normalized routine
// ABOUTME: Emits title, day table, exercise paragraphs, and nutrition section in fixed order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! A story is the ordered list of blocks the layout engine flows onto pages.
//! Sections whose data is empty contribute nothing, not even a heading.

use super::fonts::FontFace;
use crate::constants::document::{
    DAYS_HEADING, EXERCISES_HEADING, NUTRITION_HEADING, TABLE_HEADER,
};
use crate::models::NormalizedRoutine;

/// Table column widths in points
pub const TABLE_COLUMN_WIDTHS: [f32; 2] = [150.0, 300.0];

/// Horizontal alignment of a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Flush left
    Left,
    /// Centered in the frame
    Center,
}

/// Paragraph styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    /// Document title
    Title,
    /// Section heading
    Heading,
    /// Body text
    Body,
}

impl ParagraphStyle {
    /// Font face
    #[must_use]
    pub const fn face(self) -> FontFace {
        match self {
            Self::Title | Self::Heading => FontFace::Bold,
            Self::Body => FontFace::Regular,
        }
    }

    /// Font size in points
    #[must_use]
    pub const fn font_size(self) -> f32 {
        match self {
            Self::Title => 18.0,
            Self::Heading => 14.0,
            Self::Body => 10.0,
        }
    }

    /// Baseline-to-baseline distance in points
    #[must_use]
    pub const fn leading(self) -> f32 {
        match self {
            Self::Title => 22.0,
            Self::Heading => 18.0,
            Self::Body => 12.0,
        }
    }

    /// Vertical space above the paragraph, dropped at the top of a page
    #[must_use]
    pub const fn space_before(self) -> f32 {
        match self {
            Self::Heading => 12.0,
            Self::Title | Self::Body => 0.0,
        }
    }

    /// Vertical space below the paragraph
    #[must_use]
    pub const fn space_after(self) -> f32 {
        match self {
            Self::Title | Self::Heading => 6.0,
            Self::Body => 0.0,
        }
    }

    /// Horizontal alignment
    #[must_use]
    pub const fn alignment(self) -> Alignment {
        match self {
            Self::Title => Alignment::Center,
            Self::Heading | Self::Body => Alignment::Left,
        }
    }
}

/// Two-column table with a header row
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    /// Header cells
    pub header: [String; 2],
    /// Body rows, at least one
    pub rows: Vec<[String; 2]>,
    /// Column widths in points
    pub column_widths: [f32; 2],
}

/// One block of the story
#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    /// Wrapped text
    Paragraph {
        /// Text, may be empty
        text: String,
        /// Style
        style: ParagraphStyle,
    },
    /// Fixed vertical gap in points
    Spacer(f32),
    /// Day/exercise table
    Table(TableBlock),
}

impl Flowable {
    fn paragraph(text: impl Into<String>, style: ParagraphStyle) -> Self {
        Self::Paragraph {
            text: text.into(),
            style,
        }
    }
}

/// Build the story for a routine
///
/// Order is fixed: title, day table, exercise paragraphs, nutrition section.
#[must_use]
pub fn build_story(routine: &NormalizedRoutine) -> Vec<Flowable> {
    let mut story = vec![
        Flowable::paragraph(&routine.title, ParagraphStyle::Title),
        Flowable::Spacer(12.0),
    ];

    let rows: Vec<[String; 2]> = routine
        .table_rows()
        .map(|(day, exercise)| [day.to_owned(), exercise.to_owned()])
        .collect();
    if !rows.is_empty() {
        story.push(Flowable::paragraph(DAYS_HEADING, ParagraphStyle::Heading));
        story.push(Flowable::Spacer(6.0));
        story.push(Flowable::Table(TableBlock {
            header: TABLE_HEADER.map(str::to_owned),
            rows,
            column_widths: TABLE_COLUMN_WIDTHS,
        }));
        story.push(Flowable::Spacer(12.0));
    }

    if !routine.exercises.is_empty() {
        story.push(Flowable::paragraph(EXERCISES_HEADING, ParagraphStyle::Heading));
        story.push(Flowable::Spacer(6.0));
        for exercise in &routine.exercises {
            story.push(Flowable::paragraph(
                exercise.summary_line(),
                ParagraphStyle::Body,
            ));
            story.push(Flowable::Spacer(6.0));
        }
    }

    if !routine.nutrition_plan.is_empty() {
        story.push(Flowable::Spacer(12.0));
        story.push(Flowable::paragraph(NUTRITION_HEADING, ParagraphStyle::Heading));
        story.push(Flowable::Spacer(6.0));
        for line in routine.nutrition_lines() {
            story.push(Flowable::paragraph(line, ParagraphStyle::Body));
            story.push(Flowable::Spacer(6.0));
        }
    }

    story
}

/// Text of every paragraph with the given style, in story order
#[must_use]
pub fn paragraphs(story: &[Flowable], wanted: ParagraphStyle) -> Vec<&str> {
    story
        .iter()
        .filter_map(|block| match block {
            Flowable::Paragraph { text, style } if *style == wanted => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Every table in the story
#[must_use]
pub fn tables(story: &[Flowable]) -> Vec<&TableBlock> {
    story
        .iter()
        .filter_map(|block| match block {
            Flowable::Table(table) => Some(table),
            _ => None,
        })
        .collect()
}
