//! Latin-9 encoding utilities for Nordic thermal printers
//!
//! The Villan printers run with an ISO-8859-15 (Latin-9) code page so
//! Swedish item names print correctly. This module provides utilities for:
//! - Calculating Latin-9 string widths
//! - Truncating strings to a Latin-9 width
//! - Encoding UTF-8 text to Latin-9 bytes
//!
//! Text is encoded at insertion time by the command builder; raw
//! command and raster bytes never pass through the encoder.

/// ESC t 40 - select the ISO-8859-15 code page
pub(crate) const SELECT_LATIN9: [u8; 3] = [0x1B, 0x74, 40];

/// Get the Latin-9 byte width of a string
///
/// Every character occupies exactly one byte after encoding; characters
/// outside the code page are replaced with `?` and still count as one.
pub fn latin9_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to fit within a Latin-9 byte width
pub fn truncate_latin9(s: &str, max_width: usize) -> String {
    if latin9_width(s) <= max_width {
        return s.to_string();
    }
    s.chars().take(max_width).collect()
}

/// Encode UTF-8 text to Latin-9 bytes
///
/// ASCII maps to itself; characters outside the code page become `?`.
pub fn encode_latin9(s: &str) -> Vec<u8> {
    s.chars().map(encode_char).collect()
}

/// Encode a single character to its Latin-9 byte, `?` if unmappable
fn encode_char(c: char) -> u8 {
    let mut utf8 = [0u8; 4];
    let s = c.encode_utf8(&mut utf8);
    let (encoded, _, had_errors) = encoding_rs::ISO_8859_15.encode(s);

    if had_errors || encoded.len() != 1 {
        b'?'
    } else {
        encoded[0]
    }
}
