//! Software rasterizer core
//!
//! Features:
//! - Packed 32-bit pixel buffers with Clip/Wrap/Clamp addressing
//! - Bresenham lines, scanline rects, circles and triangles
//! - Affine textured triangles and nearest-neighbour sprite blits
//! - Rotate/scale blits through an invertible 3x3 transform
//! - 8x8 bitmap text

mod error;
mod types;
mod math;
mod buffer;
mod canvas;
mod render;
mod blit;
mod font;
mod text;

pub use error::*;
pub use types::*;
pub use math::*;
pub use buffer::*;
pub use canvas::*;
pub use font::{char_size, string_size, FONT_HEIGHT, FONT_WIDTH, LINE_HEIGHT, TAB_WIDTH};
pub use text::layout_text;

/// Default canvas dimensions
pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 240;
