//! Primitive rasterization: lines, rects, circles, flat triangles

use super::canvas::Canvas;
use super::math::{rotate, Vec2};
use super::types::Color;

/// Minor-axis steps taken by the midpoint line after `k` major-axis steps
fn minor_advance(k: i64, minor: i64, major: i64) -> i64 {
    if major == 0 {
        return 0;
    }
    ((2 * minor as i128 * k as i128 + major as i128) / (2 * major as i128)) as i64
}

/// Intersect the inclusive step range `[first, last]` along an axis with the
/// visible coordinates `[lo, hi)`, where step `k` lands at `start + dir * k`
fn clip_steps(first: i64, last: i64, start: i64, dir: i64, (lo, hi): (i64, i64)) -> (i64, i64) {
    let (a, b) = if dir > 0 {
        (lo.saturating_sub(start), hi.saturating_sub(1).saturating_sub(start))
    } else {
        (start.saturating_sub(hi.saturating_sub(1)), start.saturating_sub(lo))
    };
    (first.max(a), last.min(b))
}

impl Canvas {
    /// Integer Bresenham line. Both endpoints are written.
    ///
    /// Under Clip the walk starts at the first visible major-axis step, so
    /// lines running far off the target cost no more than visible ones.
    pub fn draw_line(&mut self, color: Color, x0: i32, y0: i32, x1: i32, y1: i32) {
        let (x0, y0) = (x0 as i64, y0 as i64);
        let dx = x1 as i64 - x0;
        let dy = y1 as i64 - y0;
        let step_x = if dx < 0 { -1 } else { 1 };
        let step_y = if dy < 0 { -1 } else { 1 };
        let x_major = dx.abs() > dy.abs();
        let (major, minor) = if x_major { (dx.abs(), dy.abs()) } else { (dy.abs(), dx.abs()) };

        let (mut first, mut last) = (0, major);
        if let Some(span) = self.visible_span(x_major) {
            (first, last) = if x_major {
                clip_steps(first, last, x0, step_x, span)
            } else {
                clip_steps(first, last, y0, step_y, span)
            };
        }
        if first > last {
            return;
        }

        // Jump straight to step `first`: advances taken so far and the error term there
        let mut advance = minor_advance(first, minor, major);
        let mut d = (2 * minor as i128 * (first as i128 + 1)
            - major as i128
            - 2 * major as i128 * advance as i128) as i64;
        let mut k = first;
        loop {
            if x_major {
                self.plot(color, x0 + step_x * k, y0 + step_y * advance);
            } else {
                self.plot(color, x0 + step_x * advance, y0 + step_y * k);
            }
            if k == last {
                break;
            }
            k += 1;
            if d < 0 {
                d += 2 * minor;
            } else {
                advance += 1;
                d += 2 * (minor - major);
            }
        }
    }

    /// Fill the half-open span `[sx, ex)` on row `y`
    fn fill_span(&mut self, color: Color, sx: i64, ex: i64, y: i64) {
        let (mut sx, mut ex) = if sx > ex { (ex, sx) } else { (sx, ex) };
        if let Some((lo, hi)) = self.visible_span(false) {
            if y < lo || y >= hi {
                return;
            }
        }
        if let Some((lo, hi)) = self.visible_span(true) {
            sx = sx.max(lo);
            ex = ex.min(hi);
        }
        for x in sx..ex {
            self.plot(color, x, y);
        }
    }

    /// Rows `[sy, ey)` narrowed to those that can reach the target
    fn visible_rows(&self, sy: i64, ey: i64) -> (i64, i64) {
        match self.visible_span(false) {
            Some((lo, hi)) => (sy.max(lo), ey.min(hi)),
            None => (sy, ey),
        }
    }

    /// Fill `[sx, ex) x [sy, ey)`; corners may be given in any order
    pub fn draw_rect(&mut self, color: Color, sx: i32, sy: i32, ex: i32, ey: i32) {
        let (sx, ex) = (sx.min(ex) as i64, sx.max(ex) as i64);
        let (sy, ey) = self.visible_rows(sy.min(ey) as i64, sy.max(ey) as i64);
        for y in sy..ey {
            self.fill_span(color, sx, ex, y);
        }
    }

    pub fn draw_rect_outline(&mut self, color: Color, sx: i32, sy: i32, ex: i32, ey: i32) {
        self.draw_line(color, sx, sy, sx, ey);
        self.draw_line(color, sx, sy, ex, sy);
        self.draw_line(color, ex, ey, sx, ey);
        self.draw_line(color, ex, ey, ex, sy);
    }

    /// Outline with all four corners rotated about the origin.
    /// Exactly zero rotation takes the axis-aligned path.
    pub fn draw_rotated_rect_outline(&mut self, color: Color, sx: i32, sy: i32, ex: i32, ey: i32, rotation: f32) {
        if rotation == 0.0 {
            self.draw_rect_outline(color, sx, sy, ex, ey);
            return;
        }
        let corner = |x: i32, y: i32| {
            let p = rotate(rotation, Vec2::new(x as f32, y as f32));
            (p.x as i32, p.y as i32)
        };
        let p1 = corner(sx, sy);
        let p2 = corner(sx, ey);
        let p3 = corner(ex, ey);
        let p4 = corner(ex, sy);
        self.draw_line(color, p1.0, p1.1, p2.0, p2.1);
        self.draw_line(color, p1.0, p1.1, p4.0, p4.1);
        self.draw_line(color, p3.0, p3.1, p2.0, p2.1);
        self.draw_line(color, p3.0, p3.1, p4.0, p4.1);
    }

    /// Filled circle, one span per scanline in `[cy - r, cy + r)`
    pub fn draw_circle(&mut self, color: Color, cx: i32, cy: i32, radius: i32) {
        let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
        let r2 = r * r;
        let (first, last) = self.visible_rows(cy - r, cy + r);
        for y in first..last {
            let py = y - cy;
            let px = (((r2 - py * py) as f64).sqrt() + 0.5).floor() as i64;
            self.fill_span(color, cx - px, cx + px, y);
        }
    }

    /// Midpoint circle outline with eight-way symmetry
    pub fn draw_circle_outline(&mut self, color: Color, cx: i32, cy: i32, radius: i32) {
        let (cx, cy) = (cx as i64, cy as i64);
        let mut t1 = radius as i64 / 16;
        let mut x = radius as i64;
        let mut y = 0;
        while x >= y {
            for (px, py) in [(x, y), (-x, y), (x, -y), (-x, -y), (y, x), (-y, x), (y, -x), (-y, -x)] {
                self.plot(color, cx + px, cy + py);
            }
            y += 1;
            t1 += y;
            if t1 >= x {
                t1 -= x;
                x -= 1;
            }
        }
    }

    /// Flat-shaded scanline triangle fill.
    ///
    /// Vertices are sorted by y. The long edge (top to bottom) drives one end of
    /// each span, the two short edges drive the other. Each slope divides by
    /// `dy + 1` so single-row edges stay finite.
    pub fn draw_triangle(&mut self, color: Color, x1: i32, y1: i32, x2: i32, y2: i32, x3: i32, y3: i32) {
        let mut v = [(x1, y1), (x2, y2), (x3, y3)];
        v.sort_by_key(|&(_, y)| y);
        let [(x1, y1), (x2, y2), (x3, y3)] = v;

        let (x1, x2, x3) = (x1 as f32, x2 as f32, x3 as f32);
        let (y1, y2, y3) = (y1 as i64, y2 as i64, y3 as i64);

        let far = (x3 - x1) / ((y3 - y1) as f32 + 1.0);
        let upper = (x2 - x1) / ((y2 - y1) as f32 + 1.0);
        let lower = (x3 - x2) / ((y3 - y2) as f32 + 1.0);

        // Rows above the target are skipped by starting both edges part way down
        let (first, last) = self.visible_rows(y1, y3 + 1);
        let mut start = x1 + far * (first - y1) as f32;
        let mut end = if first <= y2 {
            x1 + upper * (first - y1 + 1) as f32
        } else {
            x1 + upper * (y2 - y1 + 1) as f32 + lower * (first - y2) as f32
        };
        for y in first..last {
            self.fill_span(color, start as i64, end as i64, y);
            start += far;
            end += if y < y2 { upper } else { lower };
        }
    }

    pub fn draw_triangle_outline(&mut self, color: Color, x1: i32, y1: i32, x2: i32, y2: i32, x3: i32, y3: i32) {
        self.draw_line(color, x1, y1, x2, y2);
        self.draw_line(color, x1, y1, x3, y3);
        self.draw_line(color, x2, y2, x3, y3);
    }
}
