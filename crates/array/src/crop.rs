//! Crop window bookkeeping

// crate modules
use crate::axis::Axis;
use crate::error::{Error, Result};

// voxtools modules
use voxtools_utils::f;

// external crates
use serde::{Deserialize, Serialize};

/// Per-axis half-open `[min, max)` window over the raw shape
///
/// A window always satisfies `min < max <= extent` on every axis of the shape
/// it was built against, so the cropped shape is never empty.
///
/// ```rust
/// # use voxtools_array::{Axis, CropWindow};
/// let window = CropWindow::full(&[10, 20, 30])
///     .with_axis(Axis::Y, 5, 15, 20)
///     .unwrap();
///
/// assert_eq!(window.shape(), [10, 10, 30]);
/// assert_eq!(window.bounds(Axis::Y), (5, 15));
/// assert_eq!(window.limits(), [0, 10, 5, 15, 0, 30]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropWindow {
    min: [usize; 3],
    max: [usize; 3],
}

impl CropWindow {
    /// Window covering the full extent of `shape`
    pub fn full(shape: &[usize; 3]) -> Self {
        Self {
            min: [0; 3],
            max: *shape,
        }
    }

    /// Replace the bounds on one axis, checking them against `extent`
    pub fn with_axis(mut self, axis: Axis, min: usize, max: usize, extent: usize) -> Result<Self> {
        Self::validate(axis, min, max, extent)?;
        self.min[axis.index()] = min;
        self.max[axis.index()] = max;
        Ok(self)
    }

    /// Check a single `[min, max)` pair against the raw `extent`
    pub(crate) fn validate(axis: Axis, min: usize, max: usize, extent: usize) -> Result<()> {
        if min >= max || max > extent {
            return Err(Error::InvalidCropWindow {
                axis,
                min,
                max,
                extent,
            });
        }
        Ok(())
    }

    /// `(min, max)` bounds for a single axis
    pub fn bounds(&self, axis: Axis) -> (usize, usize) {
        (self.min[axis.index()], self.max[axis.index()])
    }

    /// Lower bounds for every axis
    pub fn min(&self) -> [usize; 3] {
        self.min
    }

    /// Upper (exclusive) bounds for every axis
    pub fn max(&self) -> [usize; 3] {
        self.max
    }

    /// Flat `[xmin, xmax, ymin, ymax, zmin, zmax]` list of the bounds
    pub fn limits(&self) -> [usize; 6] {
        [
            self.min[0],
            self.max[0],
            self.min[1],
            self.max[1],
            self.min[2],
            self.max[2],
        ]
    }

    /// Extent of the window on every axis, `max - min`
    pub fn shape(&self) -> [usize; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

impl std::fmt::Display for CropWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = Axis::ALL
            .iter()
            .map(|axis| {
                let (min, max) = self.bounds(*axis);
                f!("{axis}[{min}, {max})")
            })
            .collect::<Vec<String>>()
            .join(" ");
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_window_matches_shape() {
        let window = CropWindow::full(&[4, 5, 6]);
        assert_eq!(window.shape(), [4, 5, 6]);
        assert_eq!(window.min(), [0, 0, 0]);
    }

    #[test]
    fn rejects_empty_and_oversized_bounds() {
        let window = CropWindow::full(&[4, 5, 6]);
        assert!(window.with_axis(Axis::X, 2, 2, 4).is_err());
        assert!(window.with_axis(Axis::X, 3, 1, 4).is_err());
        assert!(window.with_axis(Axis::Z, 0, 7, 6).is_err());
        assert!(window.with_axis(Axis::Z, 0, 6, 6).is_ok());
    }

    #[test]
    fn display_lists_every_axis() {
        let window = CropWindow::full(&[4, 5, 6]);
        assert_eq!(window.to_string(), "x[0, 4) y[0, 5) z[0, 6)");
    }
}
