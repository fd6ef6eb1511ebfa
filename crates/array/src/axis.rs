//! Axis labels for the per-axis triplets

use serde::{Deserialize, Serialize};

/// One of the three axes of a voxel grid
///
/// Shapes, spacings, crop windows and merge blocks are all stored as `[_; 3]`
/// triplets indexed by [Axis::index()], so an invalid axis can not be
/// requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// First axis
    X = 0,
    /// Second axis
    Y = 1,
    /// Third axis
    Z = 2,
}

impl Axis {
    /// All axes in storage order `[X, Y, Z]`
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of the axis in a `[_; 3]` triplet
    ///
    /// ```rust
    /// # use voxtools_array::Axis;
    /// assert_eq!(Axis::X.index(), 0);
    /// assert_eq!(Axis::Z.index(), 2);
    /// ```
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Lowercase axis label i.e. 'x', 'y', 'z'
    pub fn name(&self) -> &str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
