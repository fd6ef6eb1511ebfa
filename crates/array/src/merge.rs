//! Merge (downsample) block bookkeeping

// crate modules
use crate::axis::Axis;

// voxtools modules
use voxtools_utils::TripletExt;

// external crates
use serde::{Deserialize, Serialize};

/// How to treat block sizes that do not divide the cropped extent
///
/// The merged extent is always `extent / block` with truncating division, so
/// the trailing `extent % block` voxels of the axis are dropped from the
/// reported shape.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergePolicy {
    /// Drop the remainder and report it through [MergeStatus::Truncated]
    #[default]
    Truncate,
    /// Refuse the merge with [Error::NonDivisibleMerge](crate::Error::NonDivisibleMerge)
    Strict,
}

/// Outcome of a successful merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStatus {
    /// Every block size divided its extent exactly
    Exact,
    /// Some voxels were dropped, with the remainder recorded per axis
    Truncated {
        /// Number of voxels dropped on each axis
        remainder: [usize; 3],
    },
}

impl MergeStatus {
    /// Status for a single axis merge
    pub(crate) fn for_axis(axis: Axis, remainder: usize) -> Self {
        match remainder {
            0 => Self::Exact,
            _ => {
                let mut r = [0; 3];
                r[axis.index()] = remainder;
                Self::Truncated { remainder: r }
            }
        }
    }

    /// Check if the merge dropped nothing
    ///
    /// ```rust
    /// # use voxtools_array::MergeStatus;
    /// assert!(MergeStatus::Exact.is_exact());
    /// assert!(!MergeStatus::Truncated { remainder: [0, 1, 0] }.is_exact());
    /// ```
    pub const fn is_exact(&self) -> bool {
        matches!(*self, Self::Exact)
    }

    /// Merge the outcomes of several single axis merges
    pub(crate) fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Exact, status) | (status, Self::Exact) => status,
            (Self::Truncated { remainder: a }, Self::Truncated { remainder: b }) => {
                Self::Truncated {
                    remainder: [a[0].max(b[0]), a[1].max(b[1]), a[2].max(b[2])],
                }
            }
        }
    }
}

/// Per-axis block sizes and the merged shape they produced
///
/// The merged shape is captured from the cropped shape at the time each axis
/// was merged, so later crop changes do not silently rescale it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeBlock {
    sizes: [usize; 3],
    shape: [usize; 3],
}

impl MergeBlock {
    /// Block of size 1 on every axis over `shape`
    pub fn identity(shape: &[usize; 3]) -> Self {
        Self {
            sizes: [1; 3],
            shape: *shape,
        }
    }

    /// Apply `block` to one axis of extent `extent`, returning the remainder
    ///
    /// Callers are expected to have rejected a zero `block` already.
    pub(crate) fn set_axis(&mut self, axis: Axis, block: usize, extent: usize) -> usize {
        self.sizes[axis.index()] = block;
        self.shape[axis.index()] = extent / block;
        extent % block
    }

    /// Block size on every axis
    pub fn sizes(&self) -> [usize; 3] {
        self.sizes
    }

    /// Block size on a single axis
    pub fn size(&self, axis: Axis) -> usize {
        self.sizes[axis.index()]
    }

    /// Merged (downsampled) shape
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Scale raw voxel spacing up to the merged voxel spacing
    ///
    /// ```rust
    /// # use voxtools_array::{Axis, Geometry};
    /// let mut geometry = Geometry::new([4, 4, 4], [0.5, 1.0, 2.0]).unwrap();
    /// geometry.merge(2, 1, 4).unwrap();
    ///
    /// let block = geometry.merge_block().unwrap();
    /// assert_eq!(block.scale_spacing(&[0.5, 1.0, 2.0]), [1.0, 1.0, 8.0]);
    /// ```
    pub fn scale_spacing(&self, spacing: &[f64; 3]) -> [f64; 3] {
        [
            spacing[0] * self.sizes[0] as f64,
            spacing[1] * self.sizes[1] as f64,
            spacing[2] * self.sizes[2] as f64,
        ]
    }
}

impl std::fmt::Display for MergeBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} blocks -> {}", self.sizes.dims(), self.shape.dims())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncating_division_drops_remainder() {
        let mut block = MergeBlock::identity(&[10, 11, 4]);
        assert_eq!(block.set_axis(Axis::X, 2, 10), 0);
        assert_eq!(block.set_axis(Axis::Y, 2, 11), 1);
        assert_eq!(block.shape(), [5, 5, 4]);
        assert_eq!(block.sizes(), [2, 2, 1]);
    }

    #[test]
    fn statuses_combine_per_axis() {
        let a = MergeStatus::for_axis(Axis::X, 0);
        let b = MergeStatus::for_axis(Axis::Y, 1);
        let c = MergeStatus::for_axis(Axis::Z, 3);
        assert_eq!(a, MergeStatus::Exact);
        assert_eq!(
            a.combine(b).combine(c),
            MergeStatus::Truncated {
                remainder: [0, 1, 3]
            }
        );
    }
}
