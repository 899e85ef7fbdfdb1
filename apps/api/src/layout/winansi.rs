//! WinAnsiEncoding for text drawn with the standard-14 fonts.
//!
//! Latin-1 maps onto itself; the 0x80..=0x9F block holds the typographic extras
//! (quotes, dashes, euro). Anything else is written as `?`.
//!
//! Font metrics measure the encoded bytes, so the width used for fitting is always the
//! width of the glyph that ends up on the page.

const REPLACEMENT: u8 = b'?';

/// Encodes `text` as WinAnsi bytes.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

fn encode_char(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
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
        _ => REPLACEMENT,
    }
}
