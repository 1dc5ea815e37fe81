use crate::domain::ports::TextMeasure;

/// Helvetica ascender, as a fraction of the font size.
pub const HELVETICA_ASCENT: f64 = 0.718;
/// (ascender - descender + line gap) / 1000 for Helvetica.
pub const HELVETICA_LINE_HEIGHT: f64 = 1.156;

const DEFAULT_GLYPH_WIDTH: u16 = 556;

// AFM advance widths for WinAnsi codes 32..=126
const HELVETICA_ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' .. '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' .. '9'
    278, 278, 584, 584, 584, 556, 1015, // ':' .. '@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' .. 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' .. 'Z'
    278, 278, 278, 469, 556, 333, // '[' .. '`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' .. 'm'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' .. 'z'
    334, 260, 334, 584, // '{' .. '~'
];

// AFM advance widths for WinAnsi codes 128..=255. Unassigned codes (0x81,
// 0x8D, 0x8F, 0x90, 0x9D) carry the default width.
const HELVETICA_HIGH_WIDTHS: [u16; 128] = [
    556, 556, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 556, 611, 556, // 0x80
    556, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 556, 500, 667, // 0x90
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xF0
];

/// WinAnsi slots 0x80..=0x9F hold typographic characters instead of the
/// C1 controls Latin-1 puts there.
fn win_ansi_special(c: char) -> Option<u8> {
    let code = match c {
        '\u{20AC}' => 0x80, // euro
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85, // ellipsis
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91, // quotes
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96, // en dash
        '\u{2014}' => 0x97, // em dash
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(code)
}

/// Maps text onto single-byte WinAnsi codes. Latin-1 characters keep their
/// code point and the WinAnsi extras get their 0x80..=0x9F slot. Control
/// characters become spaces, anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ if c.is_control() => b' ',
            _ => win_ansi_special(c).unwrap_or(b'?'),
        })
        .collect()
}

fn glyph_width(code: u8) -> u16 {
    match code {
        0x20..=0x7E => HELVETICA_ASCII_WIDTHS[(code - 0x20) as usize],
        0x80..=0xFF => HELVETICA_HIGH_WIDTHS[(code - 0x80) as usize],
        _ => DEFAULT_GLYPH_WIDTH,
    }
}

/// Standard base-14 Helvetica measured at a fixed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelveticaMetrics {
    pub font_size: f64,
}

impl HelveticaMetrics {
    pub fn new(font_size: f64) -> Self {
        Self { font_size }
    }

    pub fn ascent(&self) -> f64 {
        HELVETICA_ASCENT * self.font_size
    }

    pub fn line_height(&self) -> f64 {
        HELVETICA_LINE_HEIGHT * self.font_size
    }
}

impl TextMeasure for HelveticaMetrics {
    fn width_of(&self, text: &str) -> f64 {
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|code| u32::from(glyph_width(code)))
            .sum();
        f64::from(units) * self.font_size / 1000.0
    }
}
