//! WinAnsi text encoding and Helvetica metrics for the standard PDF fonts.

/// Encode `text` for a standard Type1 font with `WinAnsiEncoding`.
///
/// Latin-1 maps straight through; unmappable characters become `?`.
pub(super) fn encode(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

fn encode_char(ch: char) -> u8 {
    match ch {
        '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => ch as u8,
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{2122}' => 0x99,
        '\u{0152}' => 0x8c,
        '\u{0153}' => 0x9c,
        '\u{0160}' => 0x8a,
        '\u{0161}' => 0x9a,
        '\u{017d}' => 0x8e,
        '\u{017e}' => 0x9e,
        '\u{0178}' => 0x9f,
        _ => b'?',
    }
}

/// Helvetica advance widths (1/1000 em) for 0x20..=0x7e.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Helvetica-Bold advance widths (1/1000 em) for 0x20..=0x7e.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70
];

/// Helvetica advance widths for the Latin-1 upper half, 0xa0..=0xff.
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xa0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xb0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xc0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xd0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xe0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xf0
];

/// Helvetica-Bold advance widths for 0xa0..=0xff.
const HELVETICA_BOLD_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xa0
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xb0
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xc0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xd0
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // 0xe0
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // 0xf0
];

/// Widths of the 0x80..=0x9f code points that `encode` produces.
fn special_width(byte: u8, bold: bool) -> u16 {
    match (byte, bold) {
        (0x80 | 0x96, _) => 556,
        (0x85 | 0x97 | 0x99 | 0x8c, _) => 1000,
        (0x9c, _) => 944,
        (0x95, _) => 350,
        (0x8a | 0x9f, _) => 667,
        (0x8e, _) => 611,
        (0x9e, _) => 500,
        (0x82 | 0x91 | 0x92, false) => 222,
        (0x82 | 0x91 | 0x92, true) => 278,
        (0x84 | 0x93 | 0x94, false) => 333,
        (0x84 | 0x93 | 0x94, true) => 500,
        (0x9a, false) => 500,
        (0x9a, true) => 556,
        _ => 556,
    }
}

/// Rendered width in points of encoded bytes.
///
/// Covers every byte `encode` can emit; control bytes fall back to the digit
/// width.
pub(super) fn text_width(encoded: &[u8], bold: bool, size: f32) -> f32 {
    let (ascii, latin1) = if bold {
        (&HELVETICA_BOLD, &HELVETICA_BOLD_LATIN1)
    } else {
        (&HELVETICA, &HELVETICA_LATIN1)
    };
    let units: u32 = encoded
        .iter()
        .map(|&byte| {
            u32::from(match byte {
                0x20..=0x7e => ascii[usize::from(byte - 0x20)],
                0xa0..=0xff => latin1[usize::from(byte - 0xa0)],
                _ => special_width(byte, bold),
            })
        })
        .sum();
    units as f32 * size / 1000.0
}
