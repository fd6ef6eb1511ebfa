//! Result and Error types for voxtools-array

use crate::axis::Axis;

/// Type alias for `Result<T, array::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `voxtools-array` crate
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Every extent of a shape must be at least one voxel
    #[error("invalid shape {shape:?}, all extents must be > 0")]
    InvalidShape { shape: [usize; 3] },

    /// Spacings must be positive and finite
    #[error("invalid spacing {spacing:?}, all values must be positive and finite")]
    InvalidSpacing { spacing: [f64; 3] },

    /// Crop bounds are half-open and must sit inside the raw extent
    #[error("invalid crop window [{min}, {max}) on {axis} axis (extent {extent})")]
    InvalidCropWindow {
        axis: Axis,
        min: usize,
        max: usize,
        extent: usize,
    },

    /// Merge blocks must be non-zero and no larger than the cropped extent
    #[error("invalid merge block of {block} on {axis} axis (cropped extent {extent})")]
    InvalidMergeBlock {
        axis: Axis,
        block: usize,
        extent: usize,
    },

    /// Block size does not divide the cropped extent, raised in strict mode
    #[error("merge block of {block} does not divide {axis} extent {extent} (remainder {remainder})")]
    NonDivisibleMerge {
        axis: Axis,
        block: usize,
        extent: usize,
        remainder: usize,
    },

    /// Coordinate or flat index outside of the raw shape
    #[error("index {actual} out of range (maximum {maximum})")]
    IndexOutOfRange { actual: usize, maximum: usize },

    /// Partial indices take one to three coordinates
    #[error("expected 1 to 3 coordinates, found {found}")]
    InvalidCoordinateCount { found: usize },

    /// Number of elements does not match the shape
    #[error("inconsistent number of elements (expected {expected:?}, found {found:?})")]
    UnexpectedLength { expected: usize, found: usize },

    /// Quantization step must be positive and finite
    #[error("invalid rounding step {0}")]
    InvalidRoundingStep(f64),

    /// A computed value does not fit the element type
    #[error("value {0} is not representable by the element type")]
    UnrepresentableValue(f64),

    /// Reduction over a buffer with no elements
    #[error("buffer contains no values")]
    EmptyBuffer,
}
