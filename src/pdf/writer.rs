// ABOUTME: PDF serialization of laid-out pages using pdf-writer
// ABOUTME: Writes catalog, page tree, standard fonts, and one content stream per page
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Object ids are assigned in a fixed order and the document info carries no
//! dates, so identical pages always serialize to identical bytes.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};

use super::fonts::FontFace;
use super::layout::{DrawOp, PageContent, Rgb, PAGE_HEIGHT, PAGE_WIDTH};
use crate::constants::service_names;

const CATALOG_ID: Ref = Ref::new(1);
const PAGE_TREE_ID: Ref = Ref::new(2);
const INFO_ID: Ref = Ref::new(3);
const REGULAR_FONT_ID: Ref = Ref::new(4);
const BOLD_FONT_ID: Ref = Ref::new(5);
/// First id handed to pages; each page takes two (page, content stream)
const FIRST_PAGE_ID: i32 = 6;

const fn font_ref(face: FontFace) -> Ref {
    match face {
        FontFace::Regular => REGULAR_FONT_ID,
        FontFace::Bold => BOLD_FONT_ID,
    }
}

/// Serialize pages into a complete PDF file
#[must_use]
pub fn write_pdf(title: &str, pages: &[PageContent]) -> Vec<u8> {
    let page_ids: Vec<(Ref, Ref)> = (0..pages.len())
        .map(|index| {
            let base = i32::try_from(index)
                .ok()
                .and_then(|i| i.checked_mul(2))
                .and_then(|i| i.checked_add(FIRST_PAGE_ID))
                .unwrap_or(i32::MAX - 1);
            (Ref::new(base), Ref::new(base + 1))
        })
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(CATALOG_ID).pages(PAGE_TREE_ID);
    pdf.pages(PAGE_TREE_ID)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(i32::try_from(page_ids.len()).unwrap_or(i32::MAX));

    pdf.document_info(INFO_ID)
        .title(TextStr(title))
        .producer(TextStr(service_names::ROUTINE_COACH));

    for face in FontFace::ALL {
        pdf.type1_font(font_ref(face))
            .base_font(Name(face.base_font()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    for (page, (page_id, content_id)) in pages.iter().zip(&page_ids) {
        {
            let mut page_writer = pdf.page(*page_id);
            page_writer
                .media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
                .parent(PAGE_TREE_ID)
                .contents(*content_id);
            let mut resources = page_writer.resources();
            let mut fonts = resources.fonts();
            for face in FontFace::ALL {
                fonts.pair(Name(face.resource_name()), font_ref(face));
            }
        }
        pdf.stream(*content_id, &content_stream(page));
    }

    pdf.finish()
}

fn content_stream(page: &PageContent) -> Vec<u8> {
    let mut content = Content::new();

    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                face,
                size,
                color,
                text,
            } => {
                let Rgb(r, g, b) = *color;
                content.set_fill_rgb(r, g, b);
                content
                    .begin_text()
                    .set_font(Name(face.resource_name()), *size)
                    .next_line(*x, *y)
                    .show(Str(text))
                    .end_text();
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let Rgb(r, g, b) = *color;
                content
                    .set_fill_rgb(r, g, b)
                    .rect(*x, *y, *width, *height)
                    .fill_nonzero();
            }
            DrawOp::StrokeRect {
                x,
                y,
                width,
                height,
                line_width,
                color,
            } => {
                let Rgb(r, g, b) = *color;
                content
                    .set_stroke_rgb(r, g, b)
                    .set_line_width(*line_width)
                    .rect(*x, *y, *width, *height)
                    .stroke();
            }
        }
    }

    content.finish()
}
