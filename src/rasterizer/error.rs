//! Error type for the rasterizer

/// Errors surfaced by buffer construction, sprite loading and transforms.
///
/// Geometry edge cases (zero-area rects, out-of-range pixels) are not errors;
/// the draw calls resolve them locally.
#[derive(Debug)]
pub enum RasterError {
    /// A pixel buffer was requested with a zero width or height
    EmptyBuffer { width: usize, height: usize },
    /// Pixel data length does not match `width * height`
    SizeMismatch { expected: usize, actual: usize },
    /// Image decode or encode failed (missing file, corrupt data, bad path)
    Image(image::ImageError),
    /// The transform matrix has no inverse
    DegenerateTransform,
    /// A draw target index that the canvas does not own
    NoSuchTarget(usize),
}

impl From<image::ImageError> for RasterError {
    fn from(e: image::ImageError) -> Self {
        RasterError::Image(e)
    }
}

impl std::fmt::Display for RasterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterError::EmptyBuffer { width, height } => {
                write!(f, "Pixel buffer must not be empty (got {}x{})", width, height)
            }
            RasterError::SizeMismatch { expected, actual } => {
                write!(f, "Expected {} pixels, got {}", expected, actual)
            }
            RasterError::Image(e) => write!(f, "Image error: {}", e),
            RasterError::DegenerateTransform => write!(f, "Degenerate transform: matrix is singular"),
            RasterError::NoSuchTarget(index) => write!(f, "No draw target at index {}", index),
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RasterError::Image(e) => Some(e),
            _ => None,
        }
    }
}
