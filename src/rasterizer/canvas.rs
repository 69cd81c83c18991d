//! Canvas: draw targets plus the paint state every draw call goes through
//!
//! All primitives end up in [`Canvas::set_pixel`]. It applies, in order:
//! 1. the camera offset (subtracted from the incoming coordinate),
//! 2. the Mask check (alpha 0 writes are dropped),
//! 3. the active target's address mode.

use std::path::Path;
use super::buffer::PixelBuffer;
use super::error::RasterError;
use super::math::Vec2;
use super::types::{AddressMode, Color, Paint, PixelMode};

/// Immediate-mode drawing surface owning one or more draw targets
pub struct Canvas {
    targets: Vec<PixelBuffer>,
    current: usize,
    paint: Paint,
}

impl Canvas {
    /// One zeroed draw target of the given size
    pub fn new(width: usize, height: usize) -> Result<Self, RasterError> {
        Ok(Self::with_target(PixelBuffer::new(width, height)?))
    }

    pub fn with_target(target: PixelBuffer) -> Self {
        Self {
            targets: vec![target],
            current: 0,
            paint: Paint::default(),
        }
    }

    /// Add a draw target, returning its index. The active target is unchanged.
    pub fn push_target(&mut self, target: PixelBuffer) -> usize {
        self.targets.push(target);
        self.targets.len() - 1
    }

    pub fn set_target(&mut self, index: usize) -> Result<(), RasterError> {
        if index >= self.targets.len() {
            return Err(RasterError::NoSuchTarget(index));
        }
        log::debug!("Switching draw target {} -> {}", self.current, index);
        self.current = index;
        Ok(())
    }

    pub fn target_index(&self) -> usize {
        self.current
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn target(&self) -> &PixelBuffer {
        &self.targets[self.current]
    }

    pub fn target_mut(&mut self) -> &mut PixelBuffer {
        &mut self.targets[self.current]
    }

    /// Any owned target, e.g. to sample a render-to-texture result
    pub fn target_at(&self, index: usize) -> Option<&PixelBuffer> {
        self.targets.get(index)
    }

    pub fn width(&self) -> usize {
        self.target().width()
    }

    pub fn height(&self) -> usize {
        self.target().height()
    }

    pub fn paint(&self) -> Paint {
        self.paint
    }

    /// Replace the paint for all following draw calls
    pub fn set_paint(&mut self, paint: Paint) {
        self.paint = paint;
    }

    /// Run `draw` under `paint`, restoring the previous paint afterwards
    pub fn with_paint<R>(&mut self, paint: Paint, draw: impl FnOnce(&mut Canvas) -> R) -> R {
        let saved = std::mem::replace(&mut self.paint, paint);
        let result = draw(self);
        self.paint = saved;
        result
    }

    /// Fill the active target, bypassing camera and mask
    pub fn clear(&mut self, color: Color) {
        self.target_mut().fill(color);
    }

    /// The single write path for every primitive
    #[inline]
    pub fn set_pixel(&mut self, color: Color, x: i32, y: i32) {
        let (x, y) = match self.paint.camera {
            Some(camera) => (
                (x as f32 - camera.x).floor() as i32,
                (y as f32 - camera.y).floor() as i32,
            ),
            None => (x, y),
        };
        if self.paint.pixel == PixelMode::Mask && color.is_transparent() {
            return;
        }
        let mode = self.paint.address;
        self.targets[self.current].set_pixel(color, x, y, mode);
    }

    /// Write at a wide coordinate; anything outside the `i32` range is dropped
    #[inline]
    pub(crate) fn plot(&mut self, color: Color, x: i64, y: i64) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.set_pixel(color, x, y);
        }
    }

    /// Half-open range of incoming coordinates along one axis that can land in
    /// the active target, padded by one on each side. `None` when the address
    /// mode maps every coordinate somewhere (Wrap, Clamp).
    pub(crate) fn visible_span(&self, horizontal: bool) -> Option<(i64, i64)> {
        if self.paint.address != AddressMode::Clip {
            return None;
        }
        let camera = self.paint.camera.unwrap_or(Vec2::ZERO);
        let (extent, offset) = if horizontal {
            (self.width(), camera.x)
        } else {
            (self.height(), camera.y)
        };
        let lo = (offset.floor() as i64).saturating_sub(1);
        let hi = (offset.ceil() as i64).saturating_add(extent as i64 + 1);
        Some((lo, hi))
    }

    /// Read the active target in raw target coordinates (no camera)
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        self.target().get_pixel(x, y, self.paint.address)
    }

    /// Write the active target to a PNG file
    pub fn save_screenshot<P: AsRef<Path>>(&self, path: P) -> Result<(), RasterError> {
        let path = path.as_ref();
        self.target().save_png(path)?;
        log::info!("Saved screenshot to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::math::Vec2;

    #[test]
    fn test_init_is_zeroed() {
        let canvas = Canvas::new(8, 6).unwrap();
        assert_eq!(canvas.width(), 8);
        assert_eq!(canvas.height(), 6);
        assert!(canvas.target().pixels().iter().all(|&p| p == Color::TRANSPARENT));
    }

    #[test]
    fn test_mask_mode() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.clear(Color::WHITE);
        canvas.set_paint(Paint::default().masked());
        canvas.set_pixel(Color::with_alpha(255, 0, 0, 0), 1, 1);
        assert_eq!(canvas.get_pixel(1, 1), Color::WHITE);
        canvas.set_pixel(Color::RED, 1, 1);
        assert_eq!(canvas.get_pixel(1, 1), Color::RED);
    }

    #[test]
    fn test_camera_offset_is_subtracted() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.set_paint(Paint::default().with_camera(Some(Vec2::new(3.0, 2.0))));
        canvas.set_pixel(Color::GREEN, 5, 5);
        assert_eq!(canvas.get_pixel(2, 3), Color::GREEN);
        assert_eq!(canvas.get_pixel(5, 5), Color::TRANSPARENT);
    }

    #[test]
    fn test_camera_applies_before_wrap() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        let paint = Paint::default()
            .with_address(AddressMode::Wrap)
            .with_camera(Some(Vec2::new(2.0, 0.0)));
        canvas.set_paint(paint);
        canvas.set_pixel(Color::BLUE, 1, 0);
        // 1 - 2 = -1 wraps to 3
        assert_eq!(canvas.target().get_pixel(3, 0, AddressMode::Clip), Color::BLUE);
    }

    #[test]
    fn test_with_paint_restores_previous() {
        let mut canvas = Canvas::new(2, 2).unwrap();
        let before = canvas.paint();
        canvas.with_paint(Paint::default().masked().with_address(AddressMode::Wrap), |c| {
            assert_eq!(c.paint().pixel, PixelMode::Mask);
            c.set_pixel(Color::RED, 2, 2);
        });
        assert_eq!(canvas.paint(), before);
        assert_eq!(canvas.get_pixel(0, 0), Color::RED);
    }

    #[test]
    fn test_targets() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        let offscreen = canvas.push_target(PixelBuffer::new(2, 3).unwrap());
        assert_eq!(offscreen, 1);
        assert_eq!(canvas.target_count(), 2);
        assert_eq!(canvas.target_index(), 0);
        canvas.set_target(offscreen).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (2, 3));
        canvas.clear(Color::RED);
        canvas.set_target(0).unwrap();
        assert_eq!(canvas.get_pixel(0, 0), Color::TRANSPARENT);
        assert!(matches!(canvas.set_target(5), Err(RasterError::NoSuchTarget(5))));
        assert_eq!(canvas.target_index(), 0);
        assert_eq!(canvas.target_at(1).map(|t| t.get_pixel(1, 2, AddressMode::Clip)), Some(Color::RED));
    }

    #[test]
    fn test_visible_span_follows_camera() {
        let mut canvas = Canvas::new(10, 4).unwrap();
        assert_eq!(canvas.visible_span(true), Some((-1, 11)));
        assert_eq!(canvas.visible_span(false), Some((-1, 5)));
        canvas.set_paint(Paint::default().with_camera(Some(Vec2::new(20.5, -3.0))));
        assert_eq!(canvas.visible_span(true), Some((19, 32)));
        assert_eq!(canvas.visible_span(false), Some((-4, 2)));
        canvas.set_paint(Paint::default().with_address(AddressMode::Wrap));
        assert_eq!(canvas.visible_span(true), None);
    }

    #[test]
    fn test_screenshot_writes_png() {
        let mut canvas = Canvas::new(3, 2).unwrap();
        canvas.clear(Color::MAGENTA);
        let path = std::env::temp_dir().join(format!("square-io-shot-{}.png", std::process::id()));
        canvas.save_screenshot(&path).unwrap();
        let loaded = PixelBuffer::from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(&loaded, canvas.target());
    }
}
