//! WinAnsi (Windows-1252) text encoding for the built-in PDF fonts.
//!
//! The built-in faces are declared with `/Encoding /WinAnsiEncoding`, so every
//! string drawn with them must be single-byte Windows-1252. Characters with no
//! code in that page are replaced by `?` before layout, so the measured line
//! and the drawn line are always the same glyphs.

/// Glyph drawn in place of a character the code page cannot express.
pub const REPLACEMENT: char = '?';

/// The 0x80..=0x9F block, where Windows-1252 departs from Latin-1.
const HIGH_BLOCK: [(char, u8); 27] = [
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// The Windows-1252 byte for `c`, if it has one.
pub fn to_byte(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(c as u32 as u8),
        _ => HIGH_BLOCK
            .iter()
            .find(|(ch, _)| *ch == c)
            .map(|(_, byte)| *byte),
    }
}

/// Replaces every character outside Windows-1252 with [`REPLACEMENT`].
/// Control characters become spaces.
pub fn normalize(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_control() {
                ' '
            } else if to_byte(c).is_some() {
                c
            } else {
                REPLACEMENT
            }
        })
        .collect()
}

/// Encodes `s` as Windows-1252 bytes. Unmappable characters encode as `?`.
pub fn encode(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| to_byte(c).unwrap_or(REPLACEMENT as u8))
        .collect()
}
