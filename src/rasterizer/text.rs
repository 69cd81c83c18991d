//! Bitmap text drawing

use super::canvas::Canvas;
use super::font::{self, FONT_HEIGHT, FONT_WIDTH, LINE_HEIGHT};
use super::types::{Color, Rect};

/// Pen layout of `text` fitted into `dst`: one cell per printable character.
///
/// The string is measured at scale 1 and stretched to fill `dst`. Newlines reset
/// the pen to the left edge and move it down one line; tabs and other characters
/// without a glyph only advance the pen.
pub fn layout_text(dst: Rect, text: &str) -> Vec<(char, Rect)> {
    let mut cells = Vec::new();
    if dst.is_empty() || text.is_empty() {
        return cells;
    }
    let dst = dst.normalized();
    let size = font::string_size(text, 1.0);
    if size.x <= 0.0 {
        return cells;
    }
    let x_scale = dst.width() / size.x;
    let y_scale = dst.height() / size.y;

    let (mut sx, mut sy) = (dst.sx, dst.sy);
    for c in text.chars() {
        if c == '\n' {
            sx = dst.sx;
            sy += LINE_HEIGHT * y_scale;
            continue;
        }
        if font::glyph(c).is_some() {
            let cell = Rect::new(sx, sy, sx + x_scale * FONT_WIDTH as f32, sy + y_scale * FONT_HEIGHT as f32);
            cells.push((c, cell));
        }
        sx += font::char_size(c, x_scale);
    }
    cells
}

impl Canvas {
    /// One glyph at (x, y), `size` times the font's native size
    pub fn draw_character(&mut self, x: i32, y: i32, c: char, size: f32, color: Color) {
        let (sx, sy) = (x as f32, y as f32);
        let dst = Rect::new(sx, sy, sx + font::char_size(c, size), sy + FONT_HEIGHT as f32 * size);
        self.draw_character_rect(dst, c, color);
    }

    /// One glyph stretched over `dst`. Characters without a glyph draw nothing.
    pub fn draw_character_rect(&mut self, dst: Rect, c: char, color: Color) {
        let Some(rows) = font::glyph(c) else {
            return;
        };
        if dst.is_empty() {
            return;
        }
        let dst = dst.normalized();
        let x_scale = dst.width() / FONT_WIDTH as f32;
        let y_scale = dst.height() / FONT_HEIGHT as f32;
        let right = FONT_WIDTH as f32 * x_scale;
        let bottom = FONT_HEIGHT as f32 * y_scale;

        let cols = dst.width().ceil() as i32;
        let lines = dst.height().ceil() as i32;
        for i in 0..cols {
            let x = i as f32;
            let ox = (x / x_scale).floor() as usize;
            for j in 0..lines {
                let y = j as f32;
                let oy = (y / y_scale).floor() as usize;
                if font::glyph_bit(rows, ox, oy) {
                    self.set_pixel(color, (dst.sx + (right - x)) as i32, (dst.sy + (bottom - y)) as i32);
                }
            }
        }
    }

    /// Text with its top-left corner at (x, y)
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, size: f32, color: Color) {
        let extent = font::string_size(text, size);
        let (sx, sy) = (x as f32, y as f32);
        self.draw_text_rect(Rect::new(sx, sy, sx + extent.x, sy + extent.y), text, color);
    }

    /// Text stretched to fill `dst`
    pub fn draw_text_rect(&mut self, dst: Rect, text: &str, color: Color) {
        for (c, cell) in layout_text(dst, text) {
            self.draw_character_rect(cell, c, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    const INK: Color = Color::WHITE;

    fn row(canvas: &Canvas, y: i32) -> BTreeSet<i32> {
        (0..canvas.width() as i32).filter(|&x| canvas.get_pixel(x, y) == INK).collect()
    }

    #[test]
    fn test_character_is_upright() {
        let mut canvas = Canvas::new(12, 12).unwrap();
        canvas.draw_character(0, 0, 'T', 1.0, INK);
        assert!(row(&canvas, 0).is_empty());
        assert_eq!(row(&canvas, 1), (2..=7).collect());
        assert_eq!(row(&canvas, 4), [4, 5].into_iter().collect());
        assert!(row(&canvas, 8).is_empty());
    }

    #[test]
    fn test_unprintable_characters_draw_nothing() {
        let mut canvas = Canvas::new(12, 12).unwrap();
        canvas.draw_character(0, 0, '\u{1}', 1.0, INK);
        canvas.draw_character(0, 0, '\t', 1.0, INK);
        canvas.draw_text(0, 0, "\n\n", 1.0, INK);
        assert!(canvas.target().pixels().iter().all(|&p| p == Color::TRANSPARENT));
    }

    #[test]
    fn test_newline_resets_pen() {
        let cells = layout_text(Rect::new(0.0, 0.0, 9.0, 17.0), "A\nB");
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0], ('A', Rect::new(0.0, 0.0, 8.0, 8.0)));
        assert_eq!(cells[1], ('B', Rect::new(0.0, 9.0, 8.0, 17.0)));
    }

    #[test]
    fn test_layout_scales_pen() {
        let size = font::string_size("AB\tC", 2.0);
        let cells = layout_text(Rect::new(10.0, 20.0, 10.0 + size.x, 20.0 + size.y), "AB\tC");
        let xs: Vec<f32> = cells.iter().map(|(_, r)| r.sx).collect();
        assert_eq!(xs, vec![10.0, 28.0, 46.0 + font::TAB_WIDTH * 2.0]);
        assert!(cells.iter().all(|(_, r)| r.height() == 16.0));
    }

    #[test]
    fn test_draw_text_matches_characters() {
        let mut text = Canvas::new(40, 12).unwrap();
        text.draw_text(1, 1, "HI", 1.0, INK);

        let mut chars = Canvas::new(40, 12).unwrap();
        chars.draw_character_rect(Rect::new(1.0, 1.0, 9.0, 9.0), 'H', INK);
        chars.draw_character_rect(Rect::new(10.0, 1.0, 18.0, 9.0), 'I', INK);
        assert_eq!(text.target(), chars.target());
    }
}
