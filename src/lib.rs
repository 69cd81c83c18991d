//! Square-io: a small software rasterizer engine
//!
//! Everything is drawn on the CPU into packed 32-bit pixel buffers:
//! - Lines, rects, circles and triangles, flat or textured
//! - Nearest-neighbour and fully affine sprite blits
//! - 8x8 bitmap text
//! - Clip/Wrap/Clamp addressing, masked writes and a camera offset
//!
//! The finished frame is handed to [`present::Presenter`] for display.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod rasterizer;
pub mod config;
pub mod present;
pub mod shapes;
pub mod ui;
