// ABOUTME: Page layout engine flowing story blocks onto US Letter pages
// ABOUTME: Wraps text against font metrics, breaks pages, and draws the styled table grid
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Coordinates are PDF points with the origin at the bottom-left corner.
//! The frame is the page minus one-inch margins; a cursor walks down it.

use std::mem;

use super::fonts::{encode_win_ansi, FontFace};
use super::story::{Alignment, Flowable, ParagraphStyle, TableBlock};

/// US Letter width in points
pub const PAGE_WIDTH: f32 = 612.0;
/// US Letter height in points
pub const PAGE_HEIGHT: f32 = 792.0;
/// Margin on every side
pub const MARGIN: f32 = 72.0;

const FRAME_LEFT: f32 = MARGIN;
const FRAME_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const FRAME_TOP: f32 = PAGE_HEIGHT - MARGIN;
const FRAME_BOTTOM: f32 = MARGIN;

const CELL_FONT_SIZE: f32 = 10.0;
const CELL_LEADING: f32 = 12.0;
const CELL_PADDING_X: f32 = 6.0;
const CELL_PADDING_TOP: f32 = 3.0;
const CELL_PADDING_BOTTOM: f32 = 3.0;
const HEADER_PADDING_BOTTOM: f32 = 10.0;
const GRID_LINE_WIDTH: f32 = 1.0;

/// RGB color with components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    /// Body text and grid
    pub const BLACK: Self = Self(0.0, 0.0, 0.0);
    /// Table header background
    pub const GREY: Self = Self(0.502, 0.502, 0.502);
    /// Table header text
    pub const WHITESMOKE: Self = Self(0.961, 0.961, 0.961);
    /// Table body background
    pub const BEIGE: Self = Self(0.961, 0.961, 0.863);
}

/// A drawing primitive on one page
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// One line of encoded text with its baseline origin
    Text {
        /// Left edge
        x: f32,
        /// Baseline
        y: f32,
        /// Face
        face: FontFace,
        /// Size in points
        size: f32,
        /// Fill color
        color: Rgb,
        /// `WinAnsiEncoding` bytes
        text: Vec<u8>,
    },
    /// Filled rectangle
    FillRect {
        /// Lower-left x
        x: f32,
        /// Lower-left y
        y: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
        /// Fill color
        color: Rgb,
    },
    /// Stroked rectangle outline
    StrokeRect {
        /// Lower-left x
        x: f32,
        /// Lower-left y
        y: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
        /// Line width
        line_width: f32,
        /// Stroke color
        color: Rgb,
    },
}

/// Drawing operations for one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    /// Operations in paint order
    pub ops: Vec<DrawOp>,
}

impl PageContent {
    /// Encoded text of every text operation, in paint order
    pub fn text_lines(&self) -> impl Iterator<Item = &[u8]> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_slice()),
            _ => None,
        })
    }
}

/// Greedy word wrap of encoded text to `max_width`
///
/// Runs of spaces collapse; a word wider than the line is split between
/// characters. Empty input yields one empty line.
#[must_use]
pub fn wrap_line(encoded: &[u8], face: FontFace, size: f32, max_width: f32) -> Vec<Vec<u8>> {
    let space = face.text_width(b" ", size);
    let mut lines = Vec::new();
    let mut current: Vec<u8> = Vec::new();
    let mut current_width = 0.0_f32;

    for word in encoded.split(|&b| b == b' ').filter(|w| !w.is_empty()) {
        let word_width = face.text_width(word, size);
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + space + word_width
        };

        if needed <= max_width {
            if !current.is_empty() {
                current.push(b' ');
            }
            current.extend_from_slice(word);
            current_width = needed;
            continue;
        }

        if !current.is_empty() {
            lines.push(mem::take(&mut current));
        }

        if word_width <= max_width {
            current.extend_from_slice(word);
            current_width = word_width;
        } else {
            current_width = 0.0;
            for &byte in word {
                let glyph = face.text_width(&[byte], size);
                if current_width + glyph > max_width && !current.is_empty() {
                    lines.push(mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(byte);
                current_width += glyph;
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Flow a story onto pages
///
/// Always returns at least one page.
#[must_use]
pub fn paginate(story: &[Flowable]) -> Vec<PageContent> {
    let mut layout = Layout::new();
    for block in story {
        match block {
            Flowable::Paragraph { text, style } => layout.paragraph(text, *style),
            Flowable::Spacer(height) => layout.spacer(*height),
            Flowable::Table(table) => layout.table(table),
        }
    }
    layout.finish()
}

struct Layout {
    pages: Vec<PageContent>,
    current: PageContent,
    cursor: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: PageContent::default(),
            cursor: FRAME_TOP,
        }
    }

    fn at_page_top(&self) -> bool {
        (self.cursor - FRAME_TOP).abs() < f32::EPSILON
    }

    fn new_page(&mut self) {
        self.pages.push(mem::take(&mut self.current));
        self.cursor = FRAME_TOP;
    }

    /// Start a new page unless `height` fits or the page is still empty
    fn ensure_room(&mut self, height: f32) {
        if self.cursor - height < FRAME_BOTTOM && !self.at_page_top() {
            self.new_page();
        }
    }

    fn spacer(&mut self, height: f32) {
        if self.cursor - height < FRAME_BOTTOM {
            self.new_page();
        } else {
            self.cursor -= height;
        }
    }

    fn paragraph(&mut self, text: &str, style: ParagraphStyle) {
        if !self.at_page_top() {
            self.spacer(style.space_before());
        }

        let face = style.face();
        let size = style.font_size();
        let leading = style.leading();

        for line in wrap_line(&encode_win_ansi(text), face, size, FRAME_WIDTH) {
            self.ensure_room(leading);
            if line.is_empty() {
                self.cursor -= leading;
                continue;
            }
            let x = match style.alignment() {
                Alignment::Left => FRAME_LEFT,
                Alignment::Center => {
                    FRAME_LEFT + (FRAME_WIDTH - face.text_width(&line, size)).max(0.0) / 2.0
                }
            };
            self.current.ops.push(DrawOp::Text {
                x,
                y: self.cursor - size,
                face,
                size,
                color: Rgb::BLACK,
                text: line,
            });
            self.cursor -= leading;
        }

        if style.space_after() > 0.0 {
            self.spacer(style.space_after());
        }
    }

    fn table(&mut self, table: &TableBlock) {
        let total_width: f32 = table.column_widths.iter().sum();
        let left = FRAME_LEFT + (FRAME_WIDTH - total_width).max(0.0) / 2.0;
        let header = TableRow::new(&table.header, table.column_widths, true);
        let rows: Vec<TableRow> = table
            .rows
            .iter()
            .map(|cells| TableRow::new(cells, table.column_widths, false))
            .collect();

        // Keep the header with the first row, or its first line when the row is split
        let first_row_height = rows
            .first()
            .map_or(0.0, |row| row.height.min(TableRow::single_line_height(false)));
        self.ensure_room(header.height + first_row_height);
        self.draw_row(&header, left);

        let fresh_room = FRAME_TOP - FRAME_BOTTOM - header.height;
        for mut row in rows {
            let mut moved = false;
            loop {
                if self.cursor - row.height >= FRAME_BOTTOM {
                    self.draw_row(&row, left);
                    break;
                }
                if row.height <= fresh_room && !moved {
                    self.new_page();
                    self.draw_row(&header, left);
                    moved = true;
                    continue;
                }

                // Taller than a page: fill this page, carry the rest over
                let fits = row.lines_fitting(self.cursor - FRAME_BOTTOM);
                let fits = if moved { fits.max(1) } else { fits };
                if fits > 0 {
                    let rest = row.split_off(fits);
                    self.draw_row(&row, left);
                    row = rest;
                }
                self.new_page();
                self.draw_row(&header, left);
                moved = true;
            }
        }
    }

    fn draw_row(&mut self, row: &TableRow, left: f32) {
        let top = self.cursor;
        let bottom = top - row.height;
        let (background, text_color, face) = if row.is_header {
            (Rgb::GREY, Rgb::WHITESMOKE, FontFace::Bold)
        } else {
            (Rgb::BEIGE, Rgb::BLACK, FontFace::Regular)
        };

        let mut x = left;
        for (lines, width) in row.cells.iter().zip(row.widths) {
            self.current.ops.push(DrawOp::FillRect {
                x,
                y: bottom,
                width,
                height: row.height,
                color: background,
            });

            let mut baseline = top - CELL_PADDING_TOP - CELL_FONT_SIZE;
            for line in lines {
                let line_width = face.text_width(line, CELL_FONT_SIZE);
                self.current.ops.push(DrawOp::Text {
                    x: x + (width - line_width).max(0.0) / 2.0,
                    y: baseline,
                    face,
                    size: CELL_FONT_SIZE,
                    color: text_color,
                    text: line.clone(),
                });
                baseline -= CELL_LEADING;
            }

            self.current.ops.push(DrawOp::StrokeRect {
                x,
                y: bottom,
                width,
                height: row.height,
                line_width: GRID_LINE_WIDTH,
                color: Rgb::BLACK,
            });
            x += width;
        }

        self.cursor = bottom;
    }

    fn finish(mut self) -> Vec<PageContent> {
        if !self.current.ops.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// A table row with its cells already wrapped
struct TableRow {
    cells: Vec<Vec<Vec<u8>>>,
    widths: [f32; 2],
    height: f32,
    is_header: bool,
}

impl TableRow {
    fn new(cells: &[String; 2], widths: [f32; 2], is_header: bool) -> Self {
        let face = if is_header {
            FontFace::Bold
        } else {
            FontFace::Regular
        };
        let wrapped: Vec<Vec<Vec<u8>>> = cells
            .iter()
            .zip(widths)
            .map(|(text, width)| {
                wrap_line(
                    &encode_win_ansi(text),
                    face,
                    CELL_FONT_SIZE,
                    (width - 2.0 * CELL_PADDING_X).max(CELL_FONT_SIZE),
                )
            })
            .collect();
        Self::from_wrapped(wrapped, widths, is_header)
    }

    fn from_wrapped(cells: Vec<Vec<Vec<u8>>>, widths: [f32; 2], is_header: bool) -> Self {
        let max_lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        #[allow(clippy::cast_precision_loss)]
        let text_height = max_lines as f32 * CELL_LEADING;
        Self {
            cells,
            widths,
            height: Self::vertical_padding(is_header) + text_height,
            is_header,
        }
    }

    const fn vertical_padding(is_header: bool) -> f32 {
        if is_header {
            CELL_PADDING_TOP + HEADER_PADDING_BOTTOM
        } else {
            CELL_PADDING_TOP + CELL_PADDING_BOTTOM
        }
    }

    fn single_line_height(is_header: bool) -> f32 {
        Self::vertical_padding(is_header) + CELL_LEADING
    }

    /// Lines of this row that fit in `available` points
    fn lines_fitting(&self, available: f32) -> usize {
        let lines = ((available - Self::vertical_padding(self.is_header)) / CELL_LEADING).floor();
        if lines <= 0.0 {
            0
        } else {
            lines as usize
        }
    }

    /// Keep the first `lines` lines of every cell and return the remainder
    fn split_off(&mut self, lines: usize) -> Self {
        let rest: Vec<Vec<Vec<u8>>> = self
            .cells
            .iter_mut()
            .map(|cell| cell.split_off(lines.min(cell.len())))
            .collect();
        let head = mem::take(&mut self.cells);
        *self = Self::from_wrapped(head, self.widths, self.is_header);
        Self::from_wrapped(rest, self.widths, self.is_header)
    }
}
