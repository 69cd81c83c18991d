//! Textured triangles and sprite blits
//!
//! Source sprites are read with the paint's `sample` address mode, so a Wrap
//! sample mode tiles textures and Clip returns transparent black outside the
//! sprite. Flips mirror the sampled source index (`extent - 1 - index`).

use super::buffer::{PixelBuffer, SpriteSheet};
use super::canvas::Canvas;
use super::error::RasterError;
use super::math::Transform;
use super::types::{Color, Flip, Rect, Vertex};

/// Interpolated state along one triangle edge
#[derive(Clone, Copy)]
struct EdgeState {
    x: f32,
    u: f32,
    v: f32,
}

impl EdgeState {
    fn step(&mut self, delta: &EdgeState) {
        self.x += delta.x;
        self.u += delta.u;
        self.v += delta.v;
    }
}

/// Per-row increments from `a` to `b`, with the `+1` guard on the y span
fn edge_delta(a: &Vertex, b: &Vertex) -> EdgeState {
    let span = b.pos.y - a.pos.y + 1.0;
    EdgeState {
        x: (b.pos.x - a.pos.x) / span,
        u: (b.uv.x - a.uv.x) / span,
        v: (b.uv.y - a.uv.y) / span,
    }
}

/// Fraction of the way from `from` to `to` at row `y`, 0 for flat edges
fn edge_fraction(y: f32, from: f32, to: f32) -> f32 {
    if to == from {
        0.0
    } else {
        ((y - from) / (to - from)).clamp(0.0, 1.0)
    }
}

#[inline]
fn mirror(index: i32, extent: i32, flipped: bool) -> i32 {
    if flipped { extent - 1 - index } else { index }
}

impl Canvas {
    /// One textured span on row `y`, interpolating (u, v) in texture space
    fn textured_span(
        &mut self,
        sprite: &PixelBuffer,
        y: i32,
        mut start: EdgeState,
        mut end: EdgeState,
        mut colors: Option<(Color, Color)>,
    ) {
        let mut sx = start.x as i32;
        let mut ex = end.x as i32;
        if ex < sx {
            std::mem::swap(&mut sx, &mut ex);
            std::mem::swap(&mut start, &mut end);
            colors = colors.map(|(a, b)| (b, a));
        }
        if ex == sx {
            return;
        }

        let w = sprite.width() as f32;
        let h = sprite.height() as f32;
        let sample = self.paint().sample;
        let step = 1.0 / (ex - sx) as f32;
        let mut t = 0.0;
        for x in sx..ex {
            let u = (start.u + t * (end.u - start.u)) * w;
            let v = (start.v + t * (end.v - start.v)) * h;
            let texel = sprite.get_pixel(u.floor() as i32, v.floor() as i32, sample);
            let color = match colors {
                Some((a, b)) => a.lerp(b, t).lerp(texel, 0.5),
                None => texel,
            };
            self.set_pixel(color, x, y);
            t += step;
        }
    }

    /// Scanline textured triangle.
    ///
    /// Same scan structure as [`Canvas::draw_triangle`], with texture
    /// coordinates interpolated along the edges and across each span. When all
    /// three vertices carry a color, the interpolated color is mixed 50/50
    /// with the texel.
    pub fn draw_textured_triangle(&mut self, sprite: &PixelBuffer, v1: Vertex, v2: Vertex, v3: Vertex) {
        let mut v = [v1, v2, v3];
        v.sort_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        let [v1, v2, v3] = v;

        let far = edge_delta(&v1, &v3);
        let upper = edge_delta(&v1, &v2);
        let lower = edge_delta(&v2, &v3);

        let colors = match (v1.color, v2.color, v3.color) {
            (Some(c1), Some(c2), Some(c3)) => Some((c1, c2, c3)),
            _ => None,
        };

        let mut start = EdgeState { x: v1.pos.x, u: v1.uv.x, v: v1.uv.y };
        let mut end = start;
        end.step(&upper);

        let mut y = v1.pos.y as i32;
        while y as f32 <= v3.pos.y {
            let yf = y as f32;
            let span_colors = colors.map(|(c1, c2, c3)| {
                let long = c1.lerp(c3, edge_fraction(yf, v1.pos.y, v3.pos.y));
                let short = if yf < v2.pos.y {
                    c1.lerp(c2, edge_fraction(yf, v1.pos.y, v2.pos.y))
                } else {
                    c2.lerp(c3, edge_fraction(yf, v2.pos.y, v3.pos.y))
                };
                (long, short)
            });

            self.textured_span(sprite, y, start, end, span_colors);

            start.step(&far);
            end.step(if yf < v2.pos.y { &upper } else { &lower });
            y += 1;
        }
    }

    /// General rotate/scale/shear blit.
    ///
    /// The destination box is the bounding box of the sprite's corners mapped
    /// forward; every pixel in it is mapped backward into sprite space and
    /// sampled. Pixels that land outside the sprite sample transparent black
    /// under Clip, so draw under a masked paint to keep the background.
    pub fn draw_sprite_transformed(&mut self, sprite: &PixelBuffer, transform: &mut Transform, flip: Flip) -> Result<(), RasterError> {
        let w = sprite.width() as f32;
        let h = sprite.height() as f32;

        let (mut sx, mut sy) = transform.forward(0.0, 0.0);
        let (mut ex, mut ey) = (sx, sy);
        for (cx, cy) in [(w, 0.0), (0.0, h), (w, h)] {
            let (px, py) = transform.forward(cx, cy);
            sx = sx.min(px);
            sy = sy.min(py);
            ex = ex.max(px);
            ey = ey.max(py);
        }

        transform.invert()?;

        let sample = self.paint().sample;
        let (sw, sh) = (sprite.width() as i32, sprite.height() as i32);
        let cols = (ex - sx).ceil() as i32;
        let rows = (ey - sy).ceil() as i32;
        for j in 0..rows {
            let dy = sy + j as f32;
            for i in 0..cols {
                let dx = sx + i as f32;
                let (ox, oy) = transform.backward(dx, dy);
                let u = mirror(ox.floor() as i32, sw, flip.horizontal);
                let v = mirror(oy.floor() as i32, sh, flip.vertical);
                let texel = sprite.get_pixel(u, v, sample);
                self.set_pixel(texel, dx as i32, dy as i32);
            }
        }
        Ok(())
    }

    /// Whole sprite, scaled by `size`, centred on (x, y)
    pub fn draw_sprite(&mut self, x: i32, y: i32, sprite: &PixelBuffer, size: f32, flip: Flip) {
        let dst = Rect::centered(
            x as f32,
            y as f32,
            sprite.width() as f32 * size,
            sprite.height() as f32 * size,
        );
        self.draw_sprite_rect(dst, sprite, flip);
    }

    /// Part `src` of a sprite, scaled by `size`, centred on (x, y)
    pub fn draw_sprite_region(&mut self, x: i32, y: i32, src: Rect, sprite: &PixelBuffer, size: f32, flip: Flip) {
        if src.is_empty() {
            return;
        }
        let src = src.normalized();
        let dst = Rect::centered(x as f32, y as f32, src.width() * size, src.height() * size);
        self.draw_sprite_rect_src(dst, src, sprite, flip);
    }

    /// Whole sprite stretched into `dst`
    pub fn draw_sprite_rect(&mut self, dst: Rect, sprite: &PixelBuffer, flip: Flip) {
        let src = Rect::new(0.0, 0.0, sprite.width() as f32, sprite.height() as f32);
        self.draw_sprite_rect_src(dst, src, sprite, flip);
    }

    /// Nearest-neighbour blit of `src` (sprite space) into `dst` (canvas space).
    /// Each destination offset maps to source offset `floor(offset / scale)`.
    pub fn draw_sprite_rect_src(&mut self, dst: Rect, src: Rect, sprite: &PixelBuffer, flip: Flip) {
        if dst.is_empty() || src.is_empty() {
            return;
        }
        let dst = dst.normalized();
        let src = src.normalized();

        let x_scale = dst.width() / src.width();
        let y_scale = dst.height() / src.height();
        let src_w = src.width() as i32;
        let src_h = src.height() as i32;
        let (src_x, src_y) = (src.sx as i32, src.sy as i32);
        let sample = self.paint().sample;

        let cols = dst.width().ceil() as i32;
        let rows = dst.height().ceil() as i32;
        for j in 0..rows {
            let y = j as f32;
            let oy = mirror((y / y_scale).floor() as i32, src_h, flip.vertical);
            for i in 0..cols {
                let x = i as f32;
                let ox = mirror((x / x_scale).floor() as i32, src_w, flip.horizontal);
                let texel = sprite.get_pixel(src_x + ox, src_y + oy, sample);
                self.set_pixel(texel, (dst.sx + x) as i32, (dst.sy + y) as i32);
            }
        }
    }
}

impl SpriteSheet {
    /// Draw cell (cx, cy) centred on (x, y)
    pub fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, size: f32, cx: usize, cy: usize, flip: Flip) {
        canvas.draw_sprite_region(x, y, self.sub_image(cx, cy), &self.sprite, size, flip);
    }
}
