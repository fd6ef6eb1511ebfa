//! Shape, spacing, and sub-view bookkeeping for a voxel buffer

// crate modules
use crate::axis::Axis;
use crate::crop::CropWindow;
use crate::data::VoxelData;
use crate::error::{Error, Result};
use crate::merge::{MergeBlock, MergePolicy, MergeStatus};
use crate::order::Order;

// voxtools modules
use voxtools_utils::{f, OptionExt, TripletExt, ValueExt};

// external crates
use log::{debug, trace, warn};
use nalgebra::Vector3;

/// Geometry of a flat voxel buffer, with optional crop and merge sub-views
///
/// A [Geometry] holds everything needed to interpret a contiguous block of
/// elements as a 3D grid, but never the elements themselves.
///
/// ## Raw and effective geometry
///
/// The *raw* shape and spacing are fixed when the geometry is bound to a
/// buffer. Two sub-views may then be layered on top, independently of each
/// other:
///
/// - a **crop window**, a half-open `[min, max)` range on every axis
/// - a **merge block**, a downsample factor on every axis
///
/// The *effective* shape and spacing reported by [Geometry::shape()] and
/// [Geometry::spacing()] follow a strict precedence:
///
/// | Merge  | Crop   | Shape         | Spacing             |
/// | ------ | ------ | ------------- | ------------------- |
/// | active | any    | merged shape  | raw spacing * block |
/// | -      | active | cropped shape | raw spacing         |
/// | -      | -      | raw shape     | raw spacing         |
///
/// ## Addressing
///
/// Flat indices and positions are **always** computed from the raw shape and
/// spacing. Sub-views change what is reported, not how coordinates resolve to
/// buffer offsets.
///
/// ```rust
/// # use voxtools_array::{Geometry, Order};
/// let mut geometry = Geometry::new([2, 3, 5], [1.0, 1.0, 1.0])
///     .unwrap()
///     .with_order(Order::RowMajor);
///
/// assert_eq!(geometry.to_index([1, 2, 4]).unwrap(), 29);
///
/// // crop only changes the reported shape
/// geometry.crop(0, 1, 0, 3, 1, 5).unwrap();
/// assert_eq!(geometry.shape(), [1, 3, 4]);
/// assert_eq!(geometry.to_index([1, 2, 4]).unwrap(), 29);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    shape: [usize; 3],
    spacing: [f64; 3],
    origin: [f64; 3],
    order: Order,
    /// Active crop window
    crop: Option<CropWindow>,
    /// Crop window deactivated by the toggle, kept for reactivation
    stashed_crop: Option<CropWindow>,
    merge: Option<MergeBlock>,
    policy: MergePolicy,
}

impl Geometry {
    /// Initialise a new geometry from a raw shape and spacing
    ///
    /// The origin defaults to `[0.0, 0.0, 0.0]` and the order to
    /// [Order::ColumnMajor]. Fails fast on zero extents, non-positive
    /// spacings, or a shape with more elements than can be addressed.
    pub fn new(shape: [usize; 3], spacing: [f64; 3]) -> Result<Self> {
        validate_shape(&shape)?;
        validate_spacing(&spacing)?;
        Ok(Self {
            shape,
            spacing,
            origin: [0.0; 3],
            order: Order::default(),
            crop: None,
            stashed_crop: None,
            merge: None,
            policy: MergePolicy::default(),
        })
    }

    /// Geometry of an existing buffer, with no sub-views active
    ///
    /// The buffer has already validated its own shape and spacing.
    pub fn bind<T>(data: &VoxelData<T>) -> Self {
        trace!("Binding geometry to {} buffer", data.shape().dims());
        Self {
            shape: data.shape(),
            spacing: data.spacing(),
            origin: data.origin(),
            order: data.order(),
            crop: None,
            stashed_crop: None,
            merge: None,
            policy: MergePolicy::default(),
        }
    }

    /// Set the physical origin
    pub fn with_origin(mut self, origin: [f64; 3]) -> Self {
        self.origin = origin;
        self
    }

    /// Set the flattening order
    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Set the policy for block sizes that do not divide the cropped extent
    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Change the merge policy in place
    pub fn set_merge_policy(&mut self, policy: MergePolicy) {
        self.policy = policy;
    }

    /// Current merge policy
    pub fn merge_policy(&self) -> MergePolicy {
        self.policy
    }
}

// Shape and spacing
impl Geometry {
    /// Raw shape, ignoring any crop or merge
    pub fn raw_shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Raw spacing, ignoring any merge
    pub fn raw_spacing(&self) -> [f64; 3] {
        self.spacing
    }

    /// Effective shape (merge > crop > raw)
    ///
    /// ```rust
    /// # use voxtools_array::Geometry;
    /// let mut geometry = Geometry::new([10, 10, 10], [1.0, 1.0, 1.0]).unwrap();
    /// geometry.crop(0, 8, 0, 10, 2, 6).unwrap();
    /// assert_eq!(geometry.shape(), [8, 10, 4]);
    ///
    /// geometry.merge(2, 5, 4).unwrap();
    /// assert_eq!(geometry.shape(), [4, 2, 1]);
    /// ```
    pub fn shape(&self) -> [usize; 3] {
        match self.merge {
            Some(block) => block.shape(),
            None => self.cropped_shape(),
        }
    }

    /// Effective extent along the first axis
    pub fn shape_x(&self) -> usize {
        self.shape()[0]
    }

    /// Effective extent along the second axis
    pub fn shape_y(&self) -> usize {
        self.shape()[1]
    }

    /// Effective extent along the third axis
    pub fn shape_z(&self) -> usize {
        self.shape()[2]
    }

    /// Replace the raw shape wholesale
    ///
    /// Crop and merge are cleared, since their bounds were relative to the
    /// previous shape.
    pub fn set_shape(&mut self, shape: [usize; 3]) -> Result<()> {
        validate_shape(&shape)?;
        debug!("Replacing shape {} with {}", self.shape.dims(), shape.dims());
        self.shape = shape;
        self.clear_crop();
        self.clear_merge();
        Ok(())
    }

    /// Effective spacing (raw spacing scaled by the merge block if active)
    pub fn spacing(&self) -> [f64; 3] {
        match self.merge {
            Some(block) => block.scale_spacing(&self.spacing),
            None => self.spacing,
        }
    }

    /// Effective spacing along the first axis
    pub fn spacing_x(&self) -> f64 {
        self.spacing()[0]
    }

    /// Effective spacing along the second axis
    pub fn spacing_y(&self) -> f64 {
        self.spacing()[1]
    }

    /// Effective spacing along the third axis
    pub fn spacing_z(&self) -> f64 {
        self.spacing()[2]
    }

    /// Replace the raw spacing wholesale
    pub fn set_spacing(&mut self, spacing: [f64; 3]) -> Result<()> {
        validate_spacing(&spacing)?;
        debug!("Replacing spacing {:?} with {:?}", self.spacing, spacing);
        self.spacing = spacing;
        Ok(())
    }

    /// Flattening order of the underlying buffer
    pub fn order(&self) -> Order {
        self.order
    }

    /// Number of elements addressed by the raw shape
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    /// Always false, a valid shape has at least one voxel
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Addressing, always against the raw shape
impl Geometry {
    /// Flat buffer index of `[x, y, z]`
    ///
    /// Every coordinate must be inside the raw shape, otherwise
    /// [Error::IndexOutOfRange] is returned.
    pub fn to_index(&self, coords: [usize; 3]) -> Result<usize> {
        for (c, extent) in coords.iter().zip(self.shape) {
            if *c >= extent {
                return Err(Error::IndexOutOfRange {
                    actual: *c,
                    maximum: extent - 1,
                });
            }
        }
        Ok(self.to_index_unchecked(coords))
    }

    /// Flat buffer index of `[x, y, z]`, without bounds checks
    ///
    /// For hot loops where the coordinates are already known to be valid. An
    /// out of range coordinate gives a meaningless index rather than an error.
    #[inline]
    pub fn to_index_unchecked(&self, coords: [usize; 3]) -> usize {
        self.order.flatten(&coords, &self.shape)
    }

    /// Flat buffer index of a partial set of one to three coordinates
    ///
    /// With three coordinates this is [Geometry::to_index()]. With fewer the
    /// values are treated as a pre-flattened partial index over the leading
    /// extents (see [Order::flatten()]), and only the resulting index is
    /// checked against the number of elements. Any other number of
    /// coordinates is [Error::InvalidCoordinateCount].
    ///
    /// ```rust
    /// # use voxtools_array::{Geometry, Order};
    /// let geometry = Geometry::new([2, 3, 5], [1.0, 1.0, 1.0]).unwrap();
    ///
    /// assert_eq!(geometry.partial_index(&[29]).unwrap(), 29);
    /// assert_eq!(geometry.partial_index(&[1, 2]).unwrap(), 5);
    /// assert!(geometry.partial_index(&[30]).is_err());
    /// assert!(geometry.partial_index(&[0, 0, 0, 1]).is_err());
    /// ```
    pub fn partial_index(&self, coords: &[usize]) -> Result<usize> {
        match coords {
            [x, y, z] => self.to_index([*x, *y, *z]),
            [_] | [_, _] => {
                // overflow saturates, which is always past the end
                let index = self
                    .order
                    .checked_flatten(coords, &self.shape)
                    .unwrap_or(usize::MAX);
                self.check_index(index)?;
                Ok(index)
            }
            _ => Err(Error::InvalidCoordinateCount {
                found: coords.len(),
            }),
        }
    }

    /// Coordinates `[x, y, z]` of a flat buffer index
    ///
    /// The exact inverse of [Geometry::to_index()] for the same order.
    pub fn from_index(&self, index: usize) -> Result<[usize; 3]> {
        self.check_index(index)?;
        Ok(self.order.unflatten(index, &self.shape))
    }

    /// Make sure a flat index falls inside the raw buffer
    pub fn check_index(&self, index: usize) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfRange {
                actual: index,
                maximum: len - 1,
            });
        }
        Ok(())
    }
}

// Crop sub-view
impl Geometry {
    /// Crop a single axis to `[min, max)` and activate cropping
    ///
    /// Bounds are checked against the raw extent and never clamped. If a
    /// window was deactivated with [Geometry::set_cropped_active()], its other
    /// axes are carried over.
    pub fn crop_axis(&mut self, axis: Axis, min: usize, max: usize) -> Result<()> {
        let extent = self.shape[axis.index()];
        let window = self.current_window().with_axis(axis, min, max, extent)?;
        debug!("Cropping {axis} axis to [{min}, {max})");
        self.crop = Some(window);
        self.stashed_crop = None;
        Ok(())
    }

    /// Crop the first axis to `[xmin, xmax)`
    pub fn crop_x(&mut self, xmin: usize, xmax: usize) -> Result<()> {
        self.crop_axis(Axis::X, xmin, xmax)
    }

    /// Crop the second axis to `[ymin, ymax)`
    pub fn crop_y(&mut self, ymin: usize, ymax: usize) -> Result<()> {
        self.crop_axis(Axis::Y, ymin, ymax)
    }

    /// Crop the third axis to `[zmin, zmax)`
    pub fn crop_z(&mut self, zmin: usize, zmax: usize) -> Result<()> {
        self.crop_axis(Axis::Z, zmin, zmax)
    }

    /// Crop all three axes at once
    ///
    /// Every pair of bounds is checked before anything changes, so a failure
    /// leaves the existing crop untouched.
    ///
    /// ```rust
    /// # use voxtools_array::Geometry;
    /// let mut geometry = Geometry::new([4, 4, 4], [1.0, 1.0, 1.0]).unwrap();
    /// geometry.crop(0, 2, 0, 2, 0, 2).unwrap();
    ///
    /// // z bounds are invalid so nothing changes
    /// assert!(geometry.crop(1, 3, 1, 3, 3, 3).is_err());
    /// assert_eq!(geometry.shape(), [2, 2, 2]);
    /// ```
    pub fn crop(
        &mut self,
        xmin: usize,
        xmax: usize,
        ymin: usize,
        ymax: usize,
        zmin: usize,
        zmax: usize,
    ) -> Result<()> {
        let window = CropWindow::full(&self.shape)
            .with_axis(Axis::X, xmin, xmax, self.shape[0])?
            .with_axis(Axis::Y, ymin, ymax, self.shape[1])?
            .with_axis(Axis::Z, zmin, zmax, self.shape[2])?;
        debug!("Cropping to {window}");
        self.crop = Some(window);
        self.stashed_crop = None;
        Ok(())
    }

    /// Reset the window to the full raw extent and deactivate cropping
    pub fn clear_crop(&mut self) {
        self.crop = None;
        self.stashed_crop = None;
    }

    /// Toggle cropping without discarding the window bounds
    ///
    /// Activating without any stored window is equivalent to a window over the
    /// full raw extent.
    ///
    /// ```rust
    /// # use voxtools_array::Geometry;
    /// let mut geometry = Geometry::new([4, 4, 4], [1.0, 1.0, 1.0]).unwrap();
    /// geometry.crop_x(1, 3).unwrap();
    ///
    /// geometry.set_cropped_active(false);
    /// assert_eq!(geometry.shape(), [4, 4, 4]);
    ///
    /// geometry.set_cropped_active(true);
    /// assert_eq!(geometry.shape(), [2, 4, 4]);
    /// ```
    pub fn set_cropped_active(&mut self, active: bool) {
        if active && self.crop.is_none() {
            self.crop = Some(self.current_window());
            self.stashed_crop = None;
        } else if !active {
            if let Some(window) = self.crop.take() {
                self.stashed_crop = Some(window);
            }
        }
    }

    /// Check if a crop window is active
    pub fn is_cropped(&self) -> bool {
        self.crop.is_some()
    }

    /// Active crop window, if any
    pub fn crop_window(&self) -> Option<CropWindow> {
        self.crop
    }

    /// Stored crop bounds as `[xmin, xmax, ymin, ymax, zmin, zmax]`
    ///
    /// Includes a deactivated window, or the full extent if nothing is stored.
    pub fn crop_limits(&self) -> [usize; 6] {
        self.current_window().limits()
    }

    /// Shape of the crop window if active, otherwise the raw shape
    pub fn cropped_shape(&self) -> [usize; 3] {
        self.crop.map_or(self.shape, |window| window.shape())
    }

    /// Whichever window is stored, active or not, else the full extent
    fn current_window(&self) -> CropWindow {
        self.crop
            .or(self.stashed_crop)
            .unwrap_or_else(|| CropWindow::full(&self.shape))
    }
}

// Merge sub-view
impl Geometry {
    /// Merge blocks of `block` voxels along one axis and activate merging
    ///
    /// The merged extent is the current cropped extent divided by `block`,
    /// truncated. A remainder is reported through [MergeStatus::Truncated]
    /// under [MergePolicy::Truncate], or refused under [MergePolicy::Strict].
    ///
    /// ```rust
    /// # use voxtools_array::{Axis, Geometry, MergeStatus};
    /// let mut geometry = Geometry::new([10, 11, 1], [1.0, 1.0, 1.0]).unwrap();
    ///
    /// assert_eq!(geometry.merge_x(2).unwrap(), MergeStatus::Exact);
    /// assert_eq!(
    ///     geometry.merge_y(2).unwrap(),
    ///     MergeStatus::Truncated { remainder: [0, 1, 0] }
    /// );
    /// assert_eq!(geometry.shape(), [5, 5, 1]);
    /// ```
    pub fn merge_axis(&mut self, axis: Axis, block: usize) -> Result<MergeStatus> {
        let extent = self.check_merge(axis, block)?;
        Ok(self.apply_merge(axis, block, extent))
    }

    /// Merge along the first axis
    pub fn merge_x(&mut self, block: usize) -> Result<MergeStatus> {
        self.merge_axis(Axis::X, block)
    }

    /// Merge along the second axis
    pub fn merge_y(&mut self, block: usize) -> Result<MergeStatus> {
        self.merge_axis(Axis::Y, block)
    }

    /// Merge along the third axis
    pub fn merge_z(&mut self, block: usize) -> Result<MergeStatus> {
        self.merge_axis(Axis::Z, block)
    }

    /// Merge all three axes at once
    ///
    /// Every block size is checked before anything changes.
    pub fn merge(&mut self, bx: usize, by: usize, bz: usize) -> Result<MergeStatus> {
        let blocks = [bx, by, bz];
        let extents = [
            self.check_merge(Axis::X, bx)?,
            self.check_merge(Axis::Y, by)?,
            self.check_merge(Axis::Z, bz)?,
        ];

        Ok(Axis::ALL
            .into_iter()
            .map(|axis| self.apply_merge(axis, blocks[axis.index()], extents[axis.index()]))
            .fold(MergeStatus::Exact, MergeStatus::combine))
    }

    /// Reset every block size to 1 and deactivate merging
    pub fn clear_merge(&mut self) {
        self.merge = None;
    }

    /// Check if a merge block is active
    pub fn is_merged(&self) -> bool {
        self.merge.is_some()
    }

    /// Active merge block, if any
    pub fn merge_block(&self) -> Option<MergeBlock> {
        self.merge
    }

    /// Block size on every axis, 1 where nothing is merged
    pub fn merge_sizes(&self) -> [usize; 3] {
        self.merge.map_or([1; 3], |block| block.sizes())
    }

    /// Merged shape if active, otherwise the cropped shape
    pub fn merged_shape(&self) -> [usize; 3] {
        self.merge.map_or(self.cropped_shape(), |block| block.shape())
    }

    /// Validate a block size against the cropped extent, returning the extent
    fn check_merge(&self, axis: Axis, block: usize) -> Result<usize> {
        let extent = self.cropped_shape()[axis.index()];

        if block == 0 || block > extent {
            return Err(Error::InvalidMergeBlock {
                axis,
                block,
                extent,
            });
        }

        let remainder = extent % block;
        if remainder != 0 {
            if self.policy == MergePolicy::Strict {
                return Err(Error::NonDivisibleMerge {
                    axis,
                    block,
                    extent,
                    remainder,
                });
            }
            warn!("Merge block of {block} drops {remainder} voxel(s) from {axis} extent {extent}");
        }

        Ok(extent)
    }

    /// Store an already validated block size
    fn apply_merge(&mut self, axis: Axis, block: usize, extent: usize) -> MergeStatus {
        let mut merge = self
            .merge
            .unwrap_or_else(|| MergeBlock::identity(&self.cropped_shape()));
        let remainder = merge.set_axis(axis, block, extent);
        debug!("Merging {axis} axis in blocks of {block}");

        self.merge = Some(merge);
        MergeStatus::for_axis(axis, remainder)
    }
}

// Physical positions
impl Geometry {
    /// Physical origin of the buffer, passed through unchanged
    pub fn origin(&self) -> Vector3<f64> {
        Vector3::from(self.origin)
    }

    /// Physical position of `[x, y, z]`, centred on the coordinate origin
    ///
    /// Uses the raw shape and spacing on each axis (see [position()]).
    ///
    /// ```rust
    /// # use voxtools_array::Geometry;
    /// # use nalgebra::Vector3;
    /// let geometry = Geometry::new([4, 2, 1], [1.0, 0.5, 2.0]).unwrap();
    /// assert_eq!(geometry.position([0, 0, 0]), Vector3::new(-2.0, -0.5, -1.0));
    /// assert_eq!(geometry.position([3, 1, 0]), Vector3::new(1.0, 0.0, -1.0));
    /// ```
    pub fn position(&self, coords: [usize; 3]) -> Vector3<f64> {
        Vector3::from_fn(|i, _| position(coords[i], self.shape[i], self.spacing[i]))
    }

    /// Position along a single axis
    pub fn position_axis(&self, axis: Axis, index: usize) -> f64 {
        let i = axis.index();
        position(index, self.shape[i], self.spacing[i])
    }

    /// Position along the first axis
    pub fn position_x(&self, x: usize) -> f64 {
        self.position_axis(Axis::X, x)
    }

    /// Position along the second axis
    pub fn position_y(&self, y: usize) -> f64 {
        self.position_axis(Axis::Y, y)
    }

    /// Position along the third axis
    pub fn position_z(&self, z: usize) -> f64 {
        self.position_axis(Axis::Z, z)
    }

    /// Half-size of an effective voxel on every axis
    ///
    /// ```rust
    /// # use voxtools_array::Geometry;
    /// # use nalgebra::Vector3;
    /// let mut geometry = Geometry::new([4, 4, 4], [1.0, 1.0, 1.0]).unwrap();
    /// assert_eq!(geometry.voxel_size(), Vector3::new(0.5, 0.5, 0.5));
    ///
    /// geometry.merge(2, 2, 2).unwrap();
    /// assert_eq!(geometry.voxel_size(), Vector3::new(1.0, 1.0, 1.0));
    /// ```
    pub fn voxel_size(&self) -> Vector3<f64> {
        Vector3::from(self.spacing()) / 2.0
    }

    /// Effective shape as a vector, for building physical volumes
    pub fn volume_shape(&self) -> Vector3<f64> {
        Vector3::from(self.shape().map(|extent| extent as f64))
    }
}

impl std::fmt::Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let spacing = |s: [f64; 3]| {
            s.iter()
                .map(|v| v.sci(3, 2))
                .collect::<Vec<String>>()
                .join(" ")
        };

        let mut s = f!("{}\n > Geometry [{}]\n{}\n", "-".repeat(40), self.order, "-".repeat(40));
        s += &f!("shape    : {}\n", self.shape.dims());
        s += &f!("spacing  : {}\n", spacing(self.spacing));
        s += &f!("origin   : {}\n", spacing(self.origin));
        s += &f!("crop     : {}\n", self.crop.display());
        s += &f!("merge    : {}\n", self.merge.display());
        s += &f!("effective: {} @ {}", self.shape().dims(), spacing(self.spacing()));
        write!(f, "{s}")
    }
}

/// Physical position of `index` along an axis of `extent` voxels
///
/// `index * spacing - (extent / 2) * spacing`, which centres the axis on the
/// coordinate origin. The halving is done in floating point, so odd extents
/// land between voxel edges.
///
/// ```rust
/// # use voxtools_array::position;
/// assert_eq!(position(0, 4, 1.0), -2.0);
/// assert_eq!(position(0, 3, 2.0), -3.0);
/// assert_eq!(position(3, 3, 2.0), 3.0);
/// ```
pub fn position(index: usize, extent: usize, spacing: f64) -> f64 {
    index as f64 * spacing - (extent as f64 / 2.0) * spacing
}

/// Every extent must be non-zero, and the total must be addressable
pub(crate) fn validate_shape(shape: &[usize; 3]) -> Result<()> {
    if shape.contains(&0) || shape.checked_product().is_none() {
        return Err(Error::InvalidShape { shape: *shape });
    }
    Ok(())
}

/// Every spacing must be positive and finite
pub(crate) fn validate_spacing(spacing: &[f64; 3]) -> Result<()> {
    if spacing.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
        return Err(Error::InvalidSpacing { spacing: *spacing });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(shape: [usize; 3]) -> Geometry {
        Geometry::new(shape, [1.0, 1.0, 1.0]).unwrap()
    }

    #[test]
    fn partial_index_is_always_checked() {
        let geometry = unit([2, 3, 5]).with_order(Order::RowMajor);
        assert_eq!(geometry.partial_index(&[1, 14]), Ok(29));
        assert_eq!(
            geometry.partial_index(&[usize::MAX, 1]),
            Err(Error::IndexOutOfRange {
                actual: usize::MAX,
                maximum: 29
            })
        );
        assert_eq!(
            geometry.partial_index(&[]),
            Err(Error::InvalidCoordinateCount { found: 0 })
        );
        assert_eq!(
            geometry.partial_index(&[0, 0, 0, 99]),
            Err(Error::InvalidCoordinateCount { found: 4 })
        );
    }

    #[test]
    fn rejects_invalid_shape_and_spacing() {
        assert_eq!(
            Geometry::new([0, 1, 1], [1.0; 3]),
            Err(Error::InvalidShape { shape: [0, 1, 1] })
        );
        assert!(Geometry::new([1, 1, 1], [1.0, 0.0, 1.0]).is_err());
        assert!(Geometry::new([1, 1, 1], [1.0, f64::NAN, 1.0]).is_err());
        assert!(Geometry::new([usize::MAX, 2, 1], [1.0; 3]).is_err());
    }

    #[test]
    fn out_of_range_coordinates_are_errors() {
        let geometry = unit([2, 3, 5]);
        assert_eq!(
            geometry.to_index([0, 3, 0]),
            Err(Error::IndexOutOfRange {
                actual: 3,
                maximum: 2
            })
        );
        assert!(geometry.from_index(30).is_err());
        assert!(geometry.from_index(29).is_ok());
    }

    #[test]
    fn toggling_crop_keeps_bounds() {
        let mut geometry = unit([6, 6, 6]);
        geometry.crop(1, 5, 2, 4, 0, 3).unwrap();
        geometry.set_cropped_active(false);

        assert!(!geometry.is_cropped());
        assert_eq!(geometry.crop_window(), None);
        assert_eq!(geometry.crop_limits(), [1, 5, 2, 4, 0, 3]);

        // cropping one axis while inactive keeps the stored bounds on others
        geometry.crop_z(1, 2).unwrap();
        assert!(geometry.is_cropped());
        assert_eq!(geometry.shape(), [4, 2, 1]);
    }

    #[test]
    fn activating_without_window_uses_full_extent() {
        let mut geometry = unit([3, 4, 5]);
        geometry.set_cropped_active(true);
        assert!(geometry.is_cropped());
        assert_eq!(geometry.shape(), [3, 4, 5]);
    }

    #[test]
    fn merge_prefers_its_own_shape_over_crop() {
        let mut geometry = unit([8, 8, 8]);
        geometry.merge(2, 2, 2).unwrap();
        geometry.crop(0, 2, 0, 2, 0, 2).unwrap();

        // merged shape was captured before the crop
        assert_eq!(geometry.shape(), [4, 4, 4]);

        geometry.clear_merge();
        assert_eq!(geometry.shape(), [2, 2, 2]);
    }

    #[test]
    fn merge_is_checked_against_cropped_extent() {
        let mut geometry = unit([8, 8, 8]);
        geometry.crop_x(0, 3).unwrap();
        assert!(matches!(
            geometry.merge_x(4),
            Err(Error::InvalidMergeBlock { extent: 3, .. })
        ));
        assert!(geometry.merge_x(0).is_err());
        assert!(!geometry.is_merged());
    }

    #[test]
    fn strict_policy_refuses_truncation() {
        let mut geometry = unit([11, 4, 4]).with_merge_policy(MergePolicy::Strict);
        assert!(matches!(
            geometry.merge(2, 2, 2),
            Err(Error::NonDivisibleMerge { remainder: 1, .. })
        ));
        assert_eq!(geometry.merge_sizes(), [1, 1, 1]);
        assert_eq!(geometry.merge(1, 2, 2), Ok(MergeStatus::Exact));
    }

    #[test]
    fn set_shape_clears_sub_views() {
        let mut geometry = unit([8, 8, 8]);
        geometry.crop_x(0, 4).unwrap();
        geometry.merge_y(2).unwrap();

        geometry.set_shape([2, 2, 2]).unwrap();
        assert!(!geometry.is_cropped());
        assert!(!geometry.is_merged());
        assert_eq!(geometry.shape(), [2, 2, 2]);
        assert!(geometry.set_shape([2, 0, 2]).is_err());
    }

    #[test]
    fn positions_use_raw_geometry() {
        let mut geometry = unit([4, 4, 4]);
        geometry.merge(2, 2, 2).unwrap();
        assert_eq!(geometry.position_x(0), -2.0);
        assert_eq!(geometry.position_z(4), 2.0);
        assert_eq!(geometry.volume_shape(), Vector3::new(2.0, 2.0, 2.0));
    }
}
