// ABOUTME: Standard Helvetica font faces, glyph metrics, and WinAnsi text encoding
// ABOUTME: Measures encoded text so the layout engine can wrap lines without embedding fonts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Helvetica is one of the 14 standard PDF fonts, so nothing is embedded.
//! Text is encoded to `WinAnsiEncoding` up front; widths are looked up on
//! the encoded bytes so measuring and drawing agree.

/// Replacement for characters `WinAnsiEncoding` cannot represent
const REPLACEMENT: u8 = b'?';

/// Width used for encoded bytes outside the tables (1/1000 em)
const DEFAULT_WIDTH: u16 = 556;

/// Helvetica advance widths for bytes 0x20..=0x7E
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Helvetica-Bold advance widths for bytes 0x20..=0x7E
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70
];

/// Font faces used by the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    /// Helvetica
    Regular,
    /// Helvetica-Bold
    Bold,
}

impl FontFace {
    /// Every face, in resource order
    pub const ALL: [Self; 2] = [Self::Regular, Self::Bold];

    /// Resource name used in page content streams
    #[must_use]
    pub const fn resource_name(self) -> &'static [u8] {
        match self {
            Self::Regular => b"F1",
            Self::Bold => b"F2",
        }
    }

    /// Standard 14 base font name
    #[must_use]
    pub const fn base_font(self) -> &'static [u8] {
        match self {
            Self::Regular => b"Helvetica",
            Self::Bold => b"Helvetica-Bold",
        }
    }

    /// Advance width of one encoded byte in 1/1000 em
    #[must_use]
    pub fn glyph_width(self, byte: u8) -> u16 {
        let table = match self {
            Self::Regular => &HELVETICA_WIDTHS,
            Self::Bold => &HELVETICA_BOLD_WIDTHS,
        };
        match byte {
            0x20..=0x7E => table[usize::from(byte - 0x20)],
            0x95 => 350,
            0x85 | 0x89 | 0x97 => 1000,
            0x91 | 0x92 | 0x82 => 222,
            0x93 | 0x94 | 0x84 => 333,
            _ => DEFAULT_WIDTH,
        }
    }

    /// Width of encoded text at `size` points
    #[must_use]
    pub fn text_width(self, encoded: &[u8], size: f32) -> f32 {
        let units: u32 = encoded
            .iter()
            .map(|&byte| u32::from(self.glyph_width(byte)))
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let units = units as f32;
        units * size / 1000.0
    }
}

/// Encode text to `WinAnsiEncoding`
///
/// Tabs and line breaks become spaces, other control characters are dropped, and anything
/// the encoding cannot represent becomes `?`.
#[must_use]
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .filter_map(|c| match c {
            '\t' | '\n' | '\r' => Some(b' '),
            c if c.is_control() => None,
            c => Some(win_ansi_byte(c).unwrap_or(REPLACEMENT)),
        })
        .collect()
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let code = u32::from(c);
    match code {
        0x20..=0x7E | 0xA0..=0xFF => u8::try_from(code).ok(),
        _ => Some(match c {
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => return None,
        }),
    }
}
