//! 8x8 bitmap font for printable ASCII (32..=126)
//!
//! Glyphs are stored mirrored on both axes: row 0 is the bottom row of the
//! glyph and bit `1 << x` is column `x` counted from the right. The text
//! routines reflect each bit back with `(FONT_WIDTH * scale - x)` and
//! `(FONT_HEIGHT * scale - y)` so glyphs come out upright.

use super::math::Vec2;

pub const FONT_WIDTH: usize = 8;
pub const FONT_HEIGHT: usize = 8;

/// First and last codes with a glyph
pub const FIRST_GLYPH: u8 = 32;
pub const LAST_GLYPH: u8 = 126;

/// Horizontal advance of a tab at scale 1
pub const TAB_WIDTH: f32 = 4.0 * (FONT_WIDTH as f32 + 1.0);

/// Vertical advance of a newline at scale 1
pub const LINE_HEIGHT: f32 = FONT_HEIGHT as f32 + 1.0;

static GLYPHS: [[u8; FONT_HEIGHT]; (LAST_GLYPH - FIRST_GLYPH + 1) as usize] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // space
    [0x00, 0x18, 0x00, 0x18, 0x18, 0x18, 0x18, 0x18], // !
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x24, 0x6C, 0x6C], // "
    [0x00, 0x6C, 0x6C, 0xFE, 0x6C, 0xFE, 0x6C, 0x6C], // #
    [0x00, 0x18, 0xFC, 0x06, 0x7C, 0xC0, 0x7E, 0x18], // $
    [0x00, 0xC6, 0x66, 0x30, 0x18, 0xCC, 0xC6, 0x00], // %
    [0x00, 0x76, 0xCC, 0xDC, 0x76, 0x38, 0x6C, 0x38], // &
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x30, 0x18, 0x18], // '
    [0x00, 0x0C, 0x18, 0x30, 0x30, 0x30, 0x18, 0x0C], // (
    [0x00, 0x30, 0x18, 0x0C, 0x0C, 0x0C, 0x18, 0x30], // )
    [0x00, 0x00, 0x66, 0x3C, 0xFF, 0x3C, 0x66, 0x00], // *
    [0x00, 0x00, 0x18, 0x18, 0x7E, 0x18, 0x18, 0x00], // +
    [0x30, 0x18, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00], // ,
    [0x00, 0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00], // -
    [0x00, 0x18, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00], // .
    [0x00, 0x80, 0xC0, 0x60, 0x30, 0x18, 0x0C, 0x06], // /
    [0x00, 0x7C, 0xC6, 0xE6, 0xF6, 0xDE, 0xCE, 0x7C], // 0
    [0x00, 0x7E, 0x18, 0x18, 0x18, 0x18, 0x38, 0x18], // 1
    [0x00, 0xFE, 0xC0, 0xC0, 0x7C, 0x06, 0xC6, 0x7C], // 2
    [0x00, 0xFC, 0x06, 0x06, 0x3C, 0x06, 0x06, 0xFC], // 3
    [0x00, 0x0C, 0x0C, 0xFE, 0xCC, 0xCC, 0xCC, 0x0C], // 4
    [0x00, 0x7C, 0xC6, 0x06, 0x06, 0xFC, 0xC0, 0xFE], // 5
    [0x00, 0x7C, 0xC6, 0xC6, 0xFC, 0xC0, 0xC0, 0x7C], // 6
    [0x00, 0x18, 0x18, 0x18, 0x0C, 0x06, 0x06, 0xFE], // 7
    [0x00, 0x7C, 0xC6, 0xC6, 0x7C, 0xC6, 0xC6, 0x7C], // 8
    [0x00, 0x7C, 0x06, 0x06, 0x7E, 0xC6, 0xC6, 0x7C], // 9
    [0x00, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x00], // :
    [0x30, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x00], // ;
    [0x00, 0x0C, 0x18, 0x30, 0x60, 0x30, 0x18, 0x0C], // <
    [0x00, 0x00, 0x00, 0x7E, 0x00, 0x7E, 0x00, 0x00], // =
    [0x00, 0x30, 0x18, 0x0C, 0x06, 0x0C, 0x18, 0x30], // >
    [0x00, 0x18, 0x00, 0x18, 0x18, 0x0C, 0x66, 0x3C], // ?
    [0x00, 0x7E, 0xC0, 0xDE, 0xDE, 0xDE, 0xC6, 0x7C], // @
    [0x00, 0xC6, 0xC6, 0xFE, 0xC6, 0xC6, 0x6C, 0x38], // A
    [0x00, 0xFC, 0xC6, 0xC6, 0xFC, 0xC6, 0xC6, 0xFC], // B
    [0x00, 0x7C, 0xC6, 0xC0, 0xC0, 0xC0, 0xC6, 0x7C], // C
    [0x00, 0xF8, 0xCC, 0xC6, 0xC6, 0xC6, 0xCC, 0xF8], // D
    [0x00, 0xFE, 0xC0, 0xC0, 0xF8, 0xC0, 0xC0, 0xFE], // E
    [0x00, 0xC0, 0xC0, 0xC0, 0xF8, 0xC0, 0xC0, 0xFE], // F
    [0x00, 0x7C, 0xC6, 0xC6, 0xCE, 0xC0, 0xC6, 0x7C], // G
    [0x00, 0xC6, 0xC6, 0xC6, 0xFE, 0xC6, 0xC6, 0xC6], // H
    [0x00, 0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x7E], // I
    [0x00, 0x7C, 0xC6, 0xC6, 0x06, 0x06, 0x06, 0x06], // J
    [0x00, 0xC6, 0xCC, 0xD8, 0xF0, 0xD8, 0xCC, 0xC6], // K
    [0x00, 0xFE, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0], // L
    [0x00, 0xC6, 0xC6, 0xC6, 0xD6, 0xFE, 0xEE, 0xC6], // M
    [0x00, 0xC6, 0xC6, 0xCE, 0xDE, 0xF6, 0xE6, 0xC6], // N
    [0x00, 0x7C, 0xC6, 0xC6, 0xC6, 0xC6, 0xC6, 0x7C], // O
    [0x00, 0xC0, 0xC0, 0xC0, 0xFC, 0xC6, 0xC6, 0xFC], // P
    [0x06, 0x7C, 0xDE, 0xD6, 0xC6, 0xC6, 0xC6, 0x7C], // Q
    [0x00, 0xC6, 0xCC, 0xD8, 0xFC, 0xC6, 0xC6, 0xFC], // R
    [0x00, 0x7C, 0xC6, 0x06, 0x7C, 0xC0, 0xC6, 0x7C], // S
    [0x00, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x7E], // T
    [0x00, 0x7C, 0xC6, 0xC6, 0xC6, 0xC6, 0xC6, 0xC6], // U
    [0x00, 0x10, 0x38, 0x6C, 0xC6, 0xC6, 0xC6, 0xC6], // V
    [0x00, 0xC6, 0xEE, 0xFE, 0xD6, 0xC6, 0xC6, 0xC6], // W
    [0x00, 0xC6, 0xC6, 0x6C, 0x38, 0x6C, 0xC6, 0xC6], // X
    [0x00, 0x18, 0x18, 0x18, 0x3C, 0x66, 0x66, 0x66], // Y
    [0x00, 0xFE, 0x60, 0x30, 0x18, 0x0C, 0x06, 0xFE], // Z
    [0x00, 0x3C, 0x30, 0x30, 0x30, 0x30, 0x30, 0x3C], // [
    [0x00, 0x02, 0x06, 0x0C, 0x18, 0x30, 0x60, 0xC0], // \
    [0x00, 0x3C, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x3C], // ]
    [0x00, 0x00, 0x00, 0x00, 0xC6, 0x6C, 0x38, 0x10], // ^
    [0xFE, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // _
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x18, 0x18], // `
    [0x00, 0x7E, 0xC6, 0x7E, 0x06, 0x7C, 0x00, 0x00], // a
    [0x00, 0xFC, 0xC6, 0xC6, 0xC6, 0xFC, 0xC0, 0xC0], // b
    [0x00, 0x7C, 0xC6, 0xC0, 0xC6, 0x7C, 0x00, 0x00], // c
    [0x00, 0x7E, 0xC6, 0xC6, 0xC6, 0x7E, 0x06, 0x06], // d
    [0x00, 0x7C, 0xC0, 0xFE, 0xC6, 0x7C, 0x00, 0x00], // e
    [0x00, 0x30, 0x30, 0x30, 0x7C, 0x30, 0x30, 0x1C], // f
    [0x7C, 0x06, 0x7E, 0xC6, 0xC6, 0x7E, 0x00, 0x00], // g
    [0x00, 0xC6, 0xC6, 0xC6, 0xC6, 0xFC, 0xC0, 0xC0], // h
    [0x00, 0x3C, 0x18, 0x18, 0x18, 0x38, 0x00, 0x18], // i
    [0x70, 0x18, 0x18, 0x18, 0x18, 0x38, 0x00, 0x18], // j
    [0x00, 0xC6, 0xCC, 0xF8, 0xCC, 0xC6, 0xC0, 0xC0], // k
    [0x00, 0x3C, 0x18, 0x18, 0x18, 0x18, 0x18, 0x38], // l
    [0x00, 0xC6, 0xC6, 0xD6, 0xFE, 0xEC, 0x00, 0x00], // m
    [0x00, 0xC6, 0xC6, 0xC6, 0xC6, 0xFC, 0x00, 0x00], // n
    [0x00, 0x7C, 0xC6, 0xC6, 0xC6, 0x7C, 0x00, 0x00], // o
    [0xC0, 0xC0, 0xFC, 0xC6, 0xC6, 0xFC, 0x00, 0x00], // p
    [0x06, 0x06, 0x7E, 0xC6, 0xC6, 0x7E, 0x00, 0x00], // q
    [0x00, 0xC0, 0xC0, 0xC0, 0xE6, 0xDC, 0x00, 0x00], // r
    [0x00, 0xFC, 0x06, 0x7C, 0xC0, 0x7E, 0x00, 0x00], // s
    [0x00, 0x1C, 0x30, 0x30, 0x30, 0x7C, 0x30, 0x30], // t
    [0x00, 0x7E, 0xC6, 0xC6, 0xC6, 0xC6, 0x00, 0x00], // u
    [0x00, 0x38, 0x6C, 0xC6, 0xC6, 0xC6, 0x00, 0x00], // v
    [0x00, 0x6C, 0xFE, 0xD6, 0xC6, 0xC6, 0x00, 0x00], // w
    [0x00, 0xC6, 0x6C, 0x38, 0x6C, 0xC6, 0x00, 0x00], // x
    [0x7C, 0x06, 0x7E, 0xC6, 0xC6, 0xC6, 0x00, 0x00], // y
    [0x00, 0xFE, 0x60, 0x38, 0x0C, 0xFE, 0x00, 0x00], // z
    [0x00, 0x0E, 0x18, 0x18, 0x70, 0x18, 0x18, 0x0E], // {
    [0x00, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18], // |
    [0x00, 0x70, 0x18, 0x18, 0x0E, 0x18, 0x18, 0x70], // }
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x9C, 0x72], // ~
];

/// Row bitmasks for `c`, or `None` outside printable ASCII
pub fn glyph(c: char) -> Option<&'static [u8; FONT_HEIGHT]> {
    let code = u32::from(c);
    if (FIRST_GLYPH as u32..=LAST_GLYPH as u32).contains(&code) {
        GLYPHS.get((code - FIRST_GLYPH as u32) as usize)
    } else {
        None
    }
}

/// Whether glyph cell (column, row) is set, in stored (mirrored) orientation
#[inline]
pub fn glyph_bit(rows: &[u8; FONT_HEIGHT], column: usize, row: usize) -> bool {
    column < FONT_WIDTH && row < FONT_HEIGHT && rows[row] & (1 << column) != 0
}

/// Horizontal advance of `c` at `scale`
pub fn char_size(c: char, scale: f32) -> f32 {
    if c == '\t' {
        TAB_WIDTH * scale
    } else {
        (FONT_WIDTH as f32 + 1.0) * scale
    }
}

/// Extent of `text` at `scale`: widest line by total height.
///
/// Height is one glyph plus one line advance per newline.
pub fn string_size(text: &str, scale: f32) -> Vec2 {
    let mut width: f32 = 0.0;
    let mut height = FONT_HEIGHT as f32;
    let mut line = 0.0;
    for c in text.chars() {
        if c == '\n' {
            width = width.max(line);
            height += LINE_HEIGHT;
            line = 0.0;
        } else {
            line += char_size(c, scale);
        }
    }
    Vec2::new(width.max(line), height * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_range() {
        assert!(glyph(' ').is_some());
        assert!(glyph('~').is_some());
        assert!(glyph('\n').is_none());
        assert!(glyph('\u{7f}').is_none());
        assert!(glyph('é').is_none());
        assert!(glyph(' ').unwrap().iter().all(|&row| row == 0));
    }

    #[test]
    fn test_glyph_is_stored_bottom_up() {
        // 'T' has its bar on the top row, so it is the last stored row
        let t = glyph('T').unwrap();
        assert_eq!(t[FONT_HEIGHT - 1].count_ones(), 6);
        // '_' sits on the bottom row of the cell
        let underscore = glyph('_').unwrap();
        assert_ne!(underscore[0], 0);
    }

    #[test]
    fn test_char_size() {
        assert_eq!(char_size('a', 1.0), 9.0);
        assert_eq!(char_size('a', 2.0), 18.0);
        assert_eq!(char_size('\t', 1.0), TAB_WIDTH);
    }

    #[test]
    fn test_string_size() {
        assert_eq!(string_size("", 1.0), Vec2::new(0.0, 8.0));
        assert_eq!(string_size("ABC", 1.0), Vec2::new(27.0, 8.0));
        assert_eq!(string_size("AB\nCDE", 2.0), Vec2::new(54.0, 34.0));
        assert_eq!(string_size("ABCD\nE", 1.0), Vec2::new(36.0, 17.0));
    }
}
