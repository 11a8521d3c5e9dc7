// ABOUTME: Document renderer turning a normalized routine into PDF bytes
// ABOUTME: Builds the story, lays it out on pages, and serializes deterministically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Document Renderer
//!
//! ```rust
//! use routine_coach::models::{normalize, GeneratedRoutine};
//! use routine_coach::pdf::render;
//!
//! let routine = normalize(GeneratedRoutine::Text("Eat well".to_owned()));
//! let document = render(&routine);
//! assert!(document.bytes.starts_with(b"%PDF-"));
//! ```

/// Font metrics and text encoding
pub mod fonts;
/// Page layout
pub mod layout;
/// Story assembly
pub mod story;
mod writer;

use tokio::task;
use tracing::{debug, error};

use crate::errors::{AppError, AppResult};
use crate::models::NormalizedRoutine;

pub use story::{build_story, Flowable, ParagraphStyle, TableBlock};

/// Rendered PDF file held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Complete PDF file
    pub bytes: Vec<u8>,
    /// Number of pages
    pub page_count: usize,
}

/// Render a routine to PDF
#[must_use]
pub fn render(routine: &NormalizedRoutine) -> RenderedDocument {
    let story = build_story(routine);
    let pages = layout::paginate(&story);
    let bytes = writer::write_pdf(&routine.title, &pages);

    debug!(
        blocks = story.len(),
        pages = pages.len(),
        bytes = bytes.len(),
        "Routine rendered"
    );

    RenderedDocument {
        page_count: pages.len(),
        bytes,
    }
}

/// Render on the blocking pool, reporting a layout fault as an error
///
/// # Errors
///
/// Returns `InternalError` if rendering panicked or the task was cancelled.
pub async fn render_blocking(routine: NormalizedRoutine) -> AppResult<RenderedDocument> {
    task::spawn_blocking(move || render(&routine))
        .await
        .map_err(|e| {
            error!(error = %e, "PDF rendering failed");
            AppError::internal("An error occurred while generating the PDF").with_source(e)
        })
}
