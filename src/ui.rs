//! Sprite buttons

use std::path::Path;
use crate::rasterizer::{Canvas, Flip, PixelBuffer, RasterError, Vec2};

/// A clickable sprite centred on `position`
#[derive(Debug, Clone)]
pub struct Button {
    pub image: PixelBuffer,
    pub position: Vec2,
    pub size: f32,
}

impl Button {
    pub fn new(image: PixelBuffer, position: Vec2) -> Self {
        Self { image, position, size: 1.0 }
    }

    pub fn from_file<P: AsRef<Path>>(path: P, position: Vec2) -> Result<Self, RasterError> {
        Ok(Self::new(PixelBuffer::from_file(path)?, position))
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Whether (x, y) lies strictly inside the scaled sprite
    pub fn hover(&self, x: i32, y: i32) -> bool {
        let w = (self.image.width() as f32 * self.size) as i32 as f32;
        let h = (self.image.height() as f32 * self.size) as i32 as f32;
        let (x, y) = (x as f32, y as f32);
        x < self.position.x + w * 0.5
            && x > self.position.x - w * 0.5
            && y < self.position.y + h * 0.5
            && y > self.position.y - h * 0.5
    }

    /// Pressed while hovering
    pub fn clicked(&self, x: i32, y: i32, pressed: bool) -> bool {
        pressed && self.hover(x, y)
    }

    /// Draw the sprite with transparent texels skipped. The canvas paint is
    /// left as it was.
    pub fn render(&self, canvas: &mut Canvas) {
        let paint = canvas.paint().masked();
        canvas.with_paint(paint, |c| {
            c.draw_sprite(
                self.position.x as i32,
                self.position.y as i32,
                &self.image,
                self.size,
                Flip::NONE,
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{Color, PixelMode};

    fn button() -> Button {
        Button::new(PixelBuffer::filled(10, 6, Color::RED).unwrap(), Vec2::new(20.0, 20.0))
    }

    #[test]
    fn test_hover_bounds_are_exclusive() {
        let b = button();
        assert!(b.hover(20, 20));
        assert!(b.hover(24, 22));
        assert!(!b.hover(25, 20));
        assert!(!b.hover(15, 20));
        assert!(!b.hover(20, 23));
        let big = button().with_size(2.0);
        assert!(big.hover(29, 20));
    }

    #[test]
    fn test_clicked_needs_press_and_hover() {
        let b = button();
        assert!(b.clicked(20, 20, true));
        assert!(!b.clicked(20, 20, false));
        assert!(!b.clicked(0, 0, true));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("square-io-button-{}.png", std::process::id()));
        PixelBuffer::filled(10, 6, Color::RED).unwrap().save_png(&path).unwrap();
        let b = Button::from_file(&path, Vec2::new(20.0, 20.0)).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(b.hover(24, 22));
        assert!(matches!(
            Button::from_file("definitely/not/here.png", Vec2::ZERO),
            Err(RasterError::Image(_))
        ));
    }

    #[test]
    fn test_render_is_masked_and_restores_paint() {
        let mut pixels = vec![Color::RED; 4];
        pixels[0] = Color::TRANSPARENT;
        let b = Button::new(PixelBuffer::from_pixels(2, 2, pixels).unwrap(), Vec2::new(4.0, 4.0));

        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.clear(Color::WHITE);
        b.render(&mut canvas);

        assert_eq!(canvas.paint().pixel, PixelMode::Normal);
        assert_eq!(canvas.get_pixel(3, 3), Color::WHITE);
        assert_eq!(canvas.get_pixel(4, 3), Color::RED);
        assert_eq!(canvas.get_pixel(4, 4), Color::RED);
    }
}
