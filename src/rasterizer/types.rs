//! Core types for the rasterizer

use bytemuck::{Pod, Zeroable};
use super::math::Vec2;

/// Packed 32-bit color, `0xAABBGGRR`.
///
/// In memory on little-endian targets the bytes read R, G, B, A, which is the
/// layout both the presenter texture and the PNG encoder expect.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0x0000_0000);
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const RED: Color = Color(0xFF00_00FF);
    pub const GREEN: Color = Color(0xFF00_FF00);
    pub const BLUE: Color = Color(0xFFFF_0000);
    pub const YELLOW: Color = Color(0xFF00_FFFF);
    pub const MAGENTA: Color = Color(0xFFFF_00FF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self::with_alpha(r, g, b, 255)
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color((a as u32) << 24 | (b as u32) << 16 | (g as u32) << 8 | r as u32)
    }

    pub const fn packed(self) -> u32 {
        self.0
    }

    pub const fn r(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub const fn b(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Zero alpha byte; Mask mode drops these writes
    pub const fn is_transparent(self) -> bool {
        self.a() == 0
    }

    /// Channel-wise blend towards `other`. The result is always opaque.
    pub fn lerp(self, other: Color, fraction: f32) -> Color {
        let mix = |a: u8, b: u8| -> u8 {
            (a as f32 + (b as f32 - a as f32) * fraction).clamp(0.0, 255.0) as u8
        };
        Color::new(
            mix(self.r(), other.r()),
            mix(self.g(), other.g()),
            mix(self.b(), other.b()),
        )
    }

    /// Convert to [u8; 4] in R, G, B, A order
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), self.a()]
    }
}

/// How out-of-range coordinates are resolved when a buffer is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressMode {
    /// Writes outside the buffer are dropped, reads return transparent black
    #[default]
    Clip,
    /// Coordinates repeat with the buffer's period (tiling)
    Wrap,
    /// Coordinates saturate to the nearest edge
    Clamp,
}

/// Per-pixel write policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelMode {
    #[default]
    Normal,
    /// Skip writes whose alpha byte is zero
    Mask,
}

/// The draw-mode state every draw call reads.
///
/// `address` governs writes into the active target, `sample` governs reads
/// from source sprites. The camera, when set, is subtracted from every
/// incoming coordinate before anything else happens.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Paint {
    pub address: AddressMode,
    pub sample: AddressMode,
    pub pixel: PixelMode,
    pub camera: Option<Vec2>,
}

impl Paint {
    pub fn with_address(mut self, address: AddressMode) -> Self {
        self.address = address;
        self
    }

    pub fn with_sample(mut self, sample: AddressMode) -> Self {
        self.sample = sample;
        self
    }

    pub fn with_pixel(mut self, pixel: PixelMode) -> Self {
        self.pixel = pixel;
        self
    }

    pub fn with_camera(mut self, camera: Option<Vec2>) -> Self {
        self.camera = camera;
        self
    }

    /// Same paint with transparent texels skipped
    pub fn masked(self) -> Self {
        self.with_pixel(PixelMode::Mask)
    }
}

/// Mirroring applied to the sampled source coordinate of a blit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Flip {
    pub const NONE: Flip = Flip { horizontal: false, vertical: false };
    pub const HORIZONTAL: Flip = Flip { horizontal: true, vertical: false };
    pub const VERTICAL: Flip = Flip { horizontal: false, vertical: true };
    pub const BOTH: Flip = Flip { horizontal: true, vertical: true };
}

/// Floating-point rectangle given by its start and end corners
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub sx: f32,
    pub sy: f32,
    pub ex: f32,
    pub ey: f32,
}

impl Rect {
    pub const fn new(sx: f32, sy: f32, ex: f32, ey: f32) -> Self {
        Self { sx, sy, ex, ey }
    }

    /// Rect of the given size centred on (cx, cy)
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            sx: cx - width * 0.5,
            sy: cy - height * 0.5,
            ex: cx + width * 0.5,
            ey: cy + height * 0.5,
        }
    }

    /// Swap corners so that `sx <= ex` and `sy <= ey`
    pub fn normalized(self) -> Self {
        Self {
            sx: self.sx.min(self.ex),
            sy: self.sy.min(self.ey),
            ex: self.sx.max(self.ex),
            ey: self.sy.max(self.ey),
        }
    }

    pub fn width(&self) -> f32 {
        (self.ex - self.sx).abs()
    }

    pub fn height(&self) -> f32 {
        (self.ey - self.sy).abs()
    }

    /// Zero extent along either axis
    pub fn is_empty(&self) -> bool {
        self.ex == self.sx || self.ey == self.sy
    }
}

/// A triangle corner: screen position, texture coordinate (0..1) and an
/// optional color blended with the texel
#[derive(Debug, Clone, Copy, Default)]
pub struct Vertex {
    pub pos: Vec2,
    pub uv: Vec2,
    pub color: Option<Color>,
}

impl Vertex {
    pub fn new(pos: Vec2, uv: Vec2) -> Self {
        Self { pos, uv, color: None }
    }

    pub fn with_color(pos: Vec2, uv: Vec2, color: Color) -> Self {
        Self { pos, uv, color: Some(color) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_channels() {
        let c = Color::with_alpha(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.packed(), 0x4433_2211);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x11, 0x22, 0x33, 0x44));
        assert_eq!(c.to_bytes(), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn test_color_lerp_endpoints() {
        let a = Color::new(0, 100, 200);
        let b = Color::new(200, 100, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::new(100, 100, 100));
    }

    #[test]
    fn test_rect_normalized() {
        let r = Rect::new(5.0, 8.0, 1.0, 2.0).normalized();
        assert_eq!(r, Rect::new(1.0, 2.0, 5.0, 8.0));
        assert!(Rect::new(3.0, 0.0, 3.0, 10.0).is_empty());
    }
}
