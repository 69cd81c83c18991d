//! Pixel buffers: draw targets, loaded sprites and sprite sheets

use std::path::Path;
use image::GenericImageView;
use super::error::RasterError;
use super::types::{AddressMode, Color, Rect};

/// Reduce `coord` into `[0, extent)` with the buffer's period.
/// Works from the input coordinate, so any negative value lands in range.
#[inline]
pub fn wrap_address(coord: i32, extent: usize) -> usize {
    coord.rem_euclid(extent as i32) as usize
}

/// Saturate `coord` into `[0, extent - 1]`
#[inline]
pub fn clamp_address(coord: i32, extent: usize) -> usize {
    coord.clamp(0, extent as i32 - 1) as usize
}

impl AddressMode {
    /// Map a coordinate onto an index inside `extent`, or `None` if Clip drops it
    #[inline]
    pub fn resolve(self, coord: i32, extent: usize) -> Option<usize> {
        match self {
            AddressMode::Clip => {
                if coord >= 0 && (coord as usize) < extent {
                    Some(coord as usize)
                } else {
                    None
                }
            }
            AddressMode::Wrap => Some(wrap_address(coord, extent)),
            AddressMode::Clamp => Some(clamp_address(coord, extent)),
        }
    }
}

/// Contiguous packed-color pixels with fixed dimensions.
///
/// Used for canvas draw targets and for sprites. `pixels.len() == width * height`
/// holds for the whole lifetime and both dimensions are non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Zeroed (transparent black) buffer
    pub fn new(width: usize, height: usize) -> Result<Self, RasterError> {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    pub fn filled(width: usize, height: usize, color: Color) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyBuffer { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![color; width * height],
        })
    }

    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyBuffer { width, height });
        }
        if pixels.len() != width * height {
            return Err(RasterError::SizeMismatch {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Load a sprite from an image file (PNG, JPEG or BMP)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RasterError> {
        let path = path.as_ref();
        let img = image::open(path)?;
        let sprite = Self::from_image(&img)?;
        log::debug!("Loaded sprite {} ({}x{})", path.display(), sprite.width, sprite.height);
        Ok(sprite)
    }

    /// Decode a sprite from encoded image bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RasterError> {
        let img = image::load_from_memory(bytes)?;
        Self::from_image(&img)
    }

    fn from_image(img: &image::DynamicImage) -> Result<Self, RasterError> {
        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();

        let pixels: Vec<Color> = rgba
            .pixels()
            .map(|p| Color::with_alpha(p[0], p[1], p[2], p[3]))
            .collect();

        Self::from_pixels(width as usize, height as usize, pixels)
    }

    /// Create a checkerboard test sprite
    pub fn checkerboard(width: usize, height: usize, cell: usize, color1: Color, color2: Color) -> Result<Self, RasterError> {
        let cell = cell.max(1);
        let mut buffer = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                let checker = ((x / cell) + (y / cell)) % 2 == 0;
                buffer.pixels[y * width + x] = if checker { color1 } else { color2 };
            }
        }
        Ok(buffer)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Raw bytes, `4 * width * height` long, R,G,B,A per pixel
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    fn index(&self, x: i32, y: i32, mode: AddressMode) -> Option<usize> {
        let x = mode.resolve(x, self.width)?;
        let y = mode.resolve(y, self.height)?;
        Some(y * self.width + x)
    }

    /// Write `color` at (x, y) after remapping by `mode`
    #[inline]
    pub fn set_pixel(&mut self, color: Color, x: i32, y: i32, mode: AddressMode) {
        if let Some(i) = self.index(x, y, mode) {
            self.pixels[i] = color;
        }
    }

    /// Read (x, y) after remapping by `mode`; transparent black if clipped
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32, mode: AddressMode) -> Color {
        match self.index(x, y, mode) {
            Some(i) => self.pixels[i],
            None => Color::TRANSPARENT,
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Encode as PNG
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), RasterError> {
        image::save_buffer_with_format(
            path.as_ref(),
            self.as_bytes(),
            self.width as u32,
            self.height as u32,
            image::ExtendedColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        Ok(())
    }
}

/// A sprite cut into a grid of equally sized cells
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub sprite: PixelBuffer,
    pub cell_width: usize,
    pub cell_height: usize,
}

impl SpriteSheet {
    pub fn new(sprite: PixelBuffer, cell_width: usize, cell_height: usize) -> Self {
        Self { sprite, cell_width, cell_height }
    }

    pub fn from_file<P: AsRef<Path>>(path: P, cell_width: usize, cell_height: usize) -> Result<Self, RasterError> {
        Ok(Self::new(PixelBuffer::from_file(path)?, cell_width, cell_height))
    }

    /// Source rect of cell (cx, cy)
    pub fn sub_image(&self, cx: usize, cy: usize) -> Rect {
        let sx = (cx * self.cell_width) as f32;
        let sy = (cy * self.cell_height) as f32;
        Rect::new(sx, sy, sx + self.cell_width as f32, sy + self.cell_height as f32)
    }

    pub fn columns(&self) -> usize {
        if self.cell_width == 0 { 0 } else { self.sprite.width() / self.cell_width }
    }

    pub fn rows(&self) -> usize {
        if self.cell_height == 0 { 0 } else { self.sprite.height() / self.cell_height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [AddressMode; 3] = [AddressMode::Clip, AddressMode::Wrap, AddressMode::Clamp];

    #[test]
    fn test_zero_sized_buffer_rejected() {
        assert!(matches!(PixelBuffer::new(0, 4), Err(RasterError::EmptyBuffer { .. })));
        assert!(matches!(PixelBuffer::new(4, 0), Err(RasterError::EmptyBuffer { .. })));
    }

    #[test]
    fn test_buffer_size_invariant() {
        for &(w, h) in &[(1, 1), (3, 7), (64, 48)] {
            let buffer = PixelBuffer::new(w, h).unwrap();
            assert_eq!(buffer.pixels().len(), w * h);
            assert_eq!(buffer.as_bytes().len(), 4 * w * h);
        }
        assert!(matches!(
            PixelBuffer::from_pixels(2, 2, vec![Color::WHITE; 3]),
            Err(RasterError::SizeMismatch { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_wrap_address() {
        for dim in [1usize, 3, 8] {
            for x in -25..25 {
                let w = wrap_address(x, dim);
                assert!(w < dim);
                assert_eq!(wrap_address(x + dim as i32, dim), w);
            }
        }
        assert_eq!(wrap_address(-1, 4), 3);
        assert_eq!(wrap_address(-9, 4), 3);
    }

    #[test]
    fn test_address_remap_idempotent() {
        let extent = 5;
        for mode in MODES {
            for x in -12..12 {
                if let Some(once) = mode.resolve(x, extent) {
                    assert_eq!(mode.resolve(once as i32, extent), Some(once));
                }
            }
        }
    }

    #[test]
    fn test_clamp_saturates_to_last_index() {
        assert_eq!(clamp_address(-4, 6), 0);
        assert_eq!(clamp_address(6, 6), 5);
        assert_eq!(clamp_address(100, 6), 5);
    }

    #[test]
    fn test_clip_policy() {
        let mut buffer = PixelBuffer::filled(4, 4, Color::WHITE).unwrap();
        buffer.set_pixel(Color::RED, -1, 0, AddressMode::Clip);
        buffer.set_pixel(Color::RED, 4, 2, AddressMode::Clip);
        assert!(buffer.pixels().iter().all(|&p| p == Color::WHITE));
        assert_eq!(buffer.get_pixel(9, 9, AddressMode::Clip), Color::TRANSPARENT);
    }

    #[test]
    fn test_wrap_and_clamp_writes() {
        let mut buffer = PixelBuffer::new(4, 3).unwrap();
        buffer.set_pixel(Color::RED, -1, -1, AddressMode::Wrap);
        assert_eq!(buffer.get_pixel(3, 2, AddressMode::Clip), Color::RED);
        buffer.set_pixel(Color::BLUE, 10, -10, AddressMode::Clamp);
        assert_eq!(buffer.get_pixel(3, 0, AddressMode::Clip), Color::BLUE);
        assert_eq!(buffer.get_pixel(7, 5, AddressMode::Wrap), Color::RED);
    }

    #[test]
    fn test_png_round_trip() {
        let sprite = PixelBuffer::checkerboard(6, 4, 2, Color::RED, Color::with_alpha(0, 0, 255, 128)).unwrap();
        let path = std::env::temp_dir().join(format!("square-io-buffer-{}.png", std::process::id()));
        sprite.save_png(&path).unwrap();
        let loaded = PixelBuffer::from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, sprite);
    }

    #[test]
    fn test_decode_from_memory() {
        let sprite = PixelBuffer::checkerboard(4, 4, 1, Color::GREEN, Color::BLACK).unwrap();
        let path = std::env::temp_dir().join(format!("square-io-bytes-{}.png", std::process::id()));
        sprite.save_png(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(PixelBuffer::from_bytes(&bytes).unwrap(), sprite);
        assert!(matches!(PixelBuffer::from_bytes(&bytes[..8]), Err(RasterError::Image(_))));
    }

    #[test]
    fn test_missing_sprite_is_an_error() {
        let result = PixelBuffer::from_file("definitely/not/here.png");
        assert!(matches!(result, Err(RasterError::Image(_))));
    }

    #[test]
    fn test_sprite_sheet_cells() {
        let sheet = SpriteSheet::new(PixelBuffer::new(32, 16).unwrap(), 8, 8);
        assert_eq!(sheet.columns(), 4);
        assert_eq!(sheet.rows(), 2);
        assert_eq!(sheet.sub_image(2, 1), Rect::new(16.0, 8.0, 24.0, 16.0));
    }

    #[test]
    fn test_sprite_sheet_from_file() {
        let path = std::env::temp_dir().join(format!("square-io-sheet-{}.png", std::process::id()));
        PixelBuffer::new(24, 16).unwrap().save_png(&path).unwrap();
        let sheet = SpriteSheet::from_file(&path, 8, 8).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!((sheet.columns(), sheet.rows()), (3, 2));
        assert!(SpriteSheet::from_file("definitely/not/here.png", 8, 8).is_err());
    }
}
