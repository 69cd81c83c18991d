//! Presentation: upload the active draw target to a GPU texture once per frame

use macroquad::prelude::{
    clear_background, draw_texture_ex, next_frame, screen_height, screen_width, Color as MqColor,
    DrawTextureParams, FilterMode, Texture2D, Vec2 as MqVec2, WHITE,
};
use crate::rasterizer::Canvas;

/// Letterbox placement `(x, y, w, h)` of a `width` x `height` image in the window.
///
/// Uses the largest integer scale that fits, or a fractional downscale when the
/// window is smaller than the image.
pub fn fit_rect(screen_w: f32, screen_h: f32, width: usize, height: usize) -> (f32, f32, f32, f32) {
    let (w, h) = (width as f32, height as f32);
    let scale = (screen_w / w).min(screen_h / h);
    let scale = if scale >= 1.0 { scale.floor() } else { scale };
    let (draw_w, draw_h) = (w * scale, h * scale);
    ((screen_w - draw_w) * 0.5, (screen_h - draw_h) * 0.5, draw_w, draw_h)
}

/// Texture dimensions for a `width` x `height` target, or `None` when either
/// side does not fit the `u16` extent a `Texture2D` is created with
pub fn texture_size(width: usize, height: usize) -> Option<(u16, u16)> {
    Some((u16::try_from(width).ok()?, u16::try_from(height).ok()?))
}

/// Owns the display texture the canvas is copied into
pub struct Presenter {
    texture: Option<Texture2D>,
    size: (usize, usize),
    border: MqColor,
}

impl Presenter {
    pub fn new() -> Self {
        Self {
            texture: None,
            size: (0, 0),
            border: MqColor::from_rgba(0, 0, 0, 255),
        }
    }

    /// Color of the letterbox bars
    pub fn with_border(mut self, border: MqColor) -> Self {
        self.border = border;
        self
    }

    /// Upload the active target, draw it letterboxed and flip.
    ///
    /// A target too large for a texture is logged and the frame shows only the border.
    pub async fn present(&mut self, canvas: &Canvas) {
        let target = canvas.target();
        let size = (target.width(), target.height());
        let bytes = target.as_bytes();

        let Some((tex_w, tex_h)) = texture_size(size.0, size.1) else {
            if self.size != size {
                log::error!("{}x{} target is too large to present", size.0, size.1);
                self.texture = None;
                self.size = size;
            }
            clear_background(self.border);
            next_frame().await;
            return;
        };

        let texture = match self.texture.clone() {
            Some(texture) if self.size == size => {
                texture.update_from_bytes(tex_w as u32, tex_h as u32, bytes);
                texture
            }
            _ => {
                let texture = Texture2D::from_rgba8(tex_w, tex_h, bytes);
                texture.set_filter(FilterMode::Nearest);
                log::info!("Created {}x{} display texture", size.0, size.1);
                self.texture = Some(texture.clone());
                self.size = size;
                texture
            }
        };

        clear_background(self.border);
        let (x, y, w, h) = fit_rect(screen_width(), screen_height(), size.0, size.1);
        draw_texture_ex(
            &texture,
            x,
            y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(MqVec2::new(w, h)),
                ..Default::default()
            },
        );

        next_frame().await
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_rect_integer_scale() {
        assert_eq!(fit_rect(960.0, 720.0, 320, 240), (0.0, 0.0, 960.0, 720.0));
        // 1000x720 still fits 3x; the spare width becomes bars
        assert_eq!(fit_rect(1000.0, 720.0, 320, 240), (20.0, 0.0, 960.0, 720.0));
    }

    #[test]
    fn test_fit_rect_downscale() {
        let (x, y, w, h) = fit_rect(160.0, 240.0, 320, 240);
        assert_eq!((w, h), (160.0, 120.0));
        assert_eq!((x, y), (0.0, 60.0));
    }

    #[test]
    fn test_texture_size_limits() {
        assert_eq!(texture_size(320, 240), Some((320, 240)));
        assert_eq!(texture_size(65_535, 1), Some((65_535, 1)));
        assert_eq!(texture_size(65_536, 240), None);
        assert_eq!(texture_size(320, 70_000), None);
    }
}
