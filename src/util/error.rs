//! Error types for frankenpatch.

use thiserror::Error;

/// Result alias for frankenpatch operations.
pub type FrankenResult<T> = std::result::Result<T, FrankenError>;

/// Errors that can occur while loading a grid, matching tiles, or writing output.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FrankenError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// Width or height is zero or overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is shorter than the declared shape.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A region does not fit inside an image.
    #[error(
        "region ({x}, {y}, {width}x{height}) out of bounds for {img_width}x{img_height} image"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Two patches compared by the metric differ in shape (height, width).
    #[error("patch shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    /// A view or patch has an unexpected number of channel planes.
    #[error("channel count mismatch: expected {expected}, got {got}")]
    ChannelMismatch { expected: usize, got: usize },
    /// An index is outside a collection.
    #[error("{context} index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
        context: &'static str,
    },
    /// The capture grid has a hole at this position.
    #[error("missing view at grid position ({row}, {col})")]
    MissingView { row: usize, col: usize },
    /// Two files map to the same grid position.
    #[error("duplicate view at grid position ({row}, {col})")]
    DuplicateView { row: usize, col: usize },
    /// No views were found.
    #[error("grid contains no views")]
    EmptyGrid,
    /// A file name does not encode a `_RR_CC` grid position.
    #[error("file name does not encode a grid position: {name}")]
    InvalidFileName { name: String },
    /// The worker pool could not be created.
    #[error("thread pool setup failed: {reason}")]
    ThreadPool { reason: String },
    /// Image decoding failed.
    #[error("image i/o failed: {reason}")]
    ImageIo { reason: String },
    /// Filesystem access failed.
    #[error("i/o failed: {reason}")]
    Io { reason: String },
}

impl From<std::io::Error> for FrankenError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            reason: err.to_string(),
        }
    }
}
