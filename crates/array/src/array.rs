//! Typed value access over a borrowed voxel buffer

// standard library
use std::ops::{Deref, DerefMut};
use std::path::Path;

// crate modules
use crate::codec::Codec;
use crate::data::VoxelData;
use crate::element::{checked_add, checked_sub, round, round_clamped, Element};
use crate::error::{Error, Result};
use crate::geometry::Geometry;

/// Read access to voxel values through a [Geometry]
///
/// Implementors only provide the geometry and raw element lookups, and every
/// coordinate based read, including the quantized variants, comes for free.
///
/// All reads are bounds checked against both the geometry and the buffer and
/// return [Error::IndexOutOfRange] rather than panicking. The one exception is
/// [ValueAccess::get_value_unchecked()], an explicit fast path for hot loops.
pub trait ValueAccess {
    /// Type of the values returned by reads
    type Value: Element;

    /// Type of the parameters accepted by the quantized reads
    type Param: Copy;

    /// Geometry used to resolve coordinates
    fn geometry(&self) -> &Geometry;

    /// Value at a flat buffer index, `None` past the end of the buffer
    fn value_at(&self, index: usize) -> Option<Self::Value>;

    /// Value at a flat buffer index, panics past the end of the buffer
    fn value_unchecked(&self, index: usize) -> Self::Value;

    /// Reduce a quantization parameter to the value type
    fn project(param: Self::Param) -> Self::Value;

    /// Value at `[x, y, z]`
    fn get_value(&self, x: usize, y: usize, z: usize) -> Result<Self::Value> {
        let index = self.geometry().to_index([x, y, z])?;
        self.get_value_at(index)
    }

    /// Value at a flat buffer index
    fn get_value_at(&self, index: usize) -> Result<Self::Value> {
        self.geometry().check_index(index)?;
        self.value_at(index).ok_or(Error::IndexOutOfRange {
            actual: index,
            maximum: self.geometry().len() - 1,
        })
    }

    /// Value at a pre-flattened partial index made of two coordinates
    ///
    /// This is **not** a lookup on a 2D slice. See
    /// [Geometry::partial_index()] for how the pair is flattened.
    fn get_value_partial(&self, x: usize, y: usize) -> Result<Self::Value> {
        let index = self.geometry().partial_index(&[x, y])?;
        self.get_value_at(index)
    }

    /// Value at `[x, y, z]` with no bounds checks on the coordinates
    ///
    /// Out of range coordinates either read the wrong voxel or panic when the
    /// resulting index is past the end of the buffer.
    #[inline]
    fn get_value_unchecked(&self, x: usize, y: usize, z: usize) -> Self::Value {
        self.value_unchecked(self.geometry().to_index_unchecked([x, y, z]))
    }

    /// Value at a flat index, quantized to a multiple of `step`
    ///
    /// See [round()](crate::round) for the rounding rules.
    fn rounded_value(&self, index: usize, step: Self::Param) -> Result<Self::Value> {
        round(self.get_value_at(index)?, Self::project(step))
    }

    /// Value at a flat index, quantized then clamped to `[lower, upper]`
    fn rounded_value_clamped(
        &self,
        index: usize,
        lower: Self::Param,
        upper: Self::Param,
        step: Self::Param,
    ) -> Result<Self::Value> {
        round_clamped(
            self.get_value_at(index)?,
            Self::project(lower),
            Self::project(upper),
            Self::project(step),
        )
    }
}

/// Write access to voxel values through a [Geometry]
///
/// Only views holding an exclusive borrow of their buffer implement this.
pub trait ValueAccessMut: ValueAccess {
    /// Mutable element at a flat buffer index, `None` past the end
    fn value_mut(&mut self, index: usize) -> Option<&mut Self::Value>;

    /// Overwrite the value at `[x, y, z]`
    fn set_value(&mut self, value: Self::Value, x: usize, y: usize, z: usize) -> Result<()> {
        *self.slot(x, y, z)? = value;
        Ok(())
    }

    /// Overwrite the value at a flat buffer index
    fn set_value_at(&mut self, value: Self::Value, index: usize) -> Result<()> {
        *self.slot_at(index)? = value;
        Ok(())
    }

    /// Add `value` to the value at `[x, y, z]`
    ///
    /// Overflow is [Error::UnrepresentableValue] and leaves the voxel as it
    /// was.
    fn increment_value(&mut self, value: Self::Value, x: usize, y: usize, z: usize) -> Result<()> {
        let slot = self.slot(x, y, z)?;
        *slot = checked_add(*slot, value)?;
        Ok(())
    }

    /// Subtract `value` from the value at `[x, y, z]`
    ///
    /// The inverse of [ValueAccessMut::increment_value()], written as a
    /// subtraction so that unsigned elements are supported. Underflow is
    /// [Error::UnrepresentableValue] and leaves the voxel as it was.
    fn decrement_value(&mut self, value: Self::Value, x: usize, y: usize, z: usize) -> Result<()> {
        let slot = self.slot(x, y, z)?;
        *slot = checked_sub(*slot, value)?;
        Ok(())
    }

    /// Checked mutable element at `[x, y, z]`
    fn slot(&mut self, x: usize, y: usize, z: usize) -> Result<&mut Self::Value> {
        let index = self.geometry().to_index([x, y, z])?;
        self.slot_at(index)
    }

    /// Checked mutable element at a flat buffer index
    fn slot_at(&mut self, index: usize) -> Result<&mut Self::Value> {
        self.geometry().check_index(index)?;
        let maximum = self.geometry().len() - 1;
        self.value_mut(index)
            .ok_or(Error::IndexOutOfRange { actual: index, maximum })
    }
}

/// Read-only typed view over a borrowed [VoxelData]
///
/// The view owns its own [Geometry], so cropping or merging one view never
/// affects another view of the same buffer. All of the [Geometry] methods are
/// available directly on the view.
///
/// Several views can read the same buffer at once, including from different
/// threads.
///
/// ```rust
/// # use voxtools_array::{ValueAccess, VoxelArray, VoxelData};
/// let data = VoxelData::new(vec![1, 5, 2, 9, 0, 4], [1, 2, 3], [1.0; 3]).unwrap();
/// let mut array = VoxelArray::new(&data);
///
/// assert_eq!(array.get_value(0, 1, 0).unwrap(), 9);
/// assert_eq!(array.get_value_at(4).unwrap(), 0);
///
/// // reductions always scan the whole buffer
/// array.crop_z(0, 1).unwrap();
/// assert_eq!(array.shape(), [1, 2, 1]);
/// assert_eq!(array.max_value().unwrap(), 9);
/// ```
#[derive(Clone)]
pub struct VoxelArray<'a, T> {
    geometry: Geometry,
    data: &'a VoxelData<T>,
}

impl<'a, T> VoxelArray<'a, T> {
    /// Bind a new view to `data`, with no sub-views active
    pub fn new(data: &'a VoxelData<T>) -> Self {
        Self {
            geometry: Geometry::bind(data),
            data,
        }
    }

    /// Rebind the view to another buffer, resetting its geometry
    pub fn bind(&mut self, data: &'a VoxelData<T>) {
        *self = Self::new(data);
    }

    /// The borrowed buffer
    pub fn data(&self) -> &'a VoxelData<T> {
        self.data
    }

    /// Write the underlying buffer through a format codec
    pub fn write_with<C, P>(&self, codec: &C, path: P) -> core::result::Result<(), C::Error>
    where
        C: Codec<T>,
        P: AsRef<Path>,
    {
        self.data.write_with(codec, path)
    }
}

impl<T: Element> VoxelArray<'_, T> {
    /// Largest value in the **whole** buffer, ignoring crop and merge
    pub fn max_value(&self) -> Result<T> {
        max_value(self.data.values())
    }

    /// Smallest value in the **whole** buffer, ignoring crop and merge
    pub fn min_value(&self) -> Result<T> {
        min_value(self.data.values())
    }
}

impl<T: Element> ValueAccess for VoxelArray<'_, T> {
    type Value = T;
    type Param = T;

    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn value_at(&self, index: usize) -> Option<T> {
        self.data.values().get(index).copied()
    }

    fn value_unchecked(&self, index: usize) -> T {
        self.data.values()[index]
    }

    fn project(param: T) -> T {
        param
    }
}

impl<T> Deref for VoxelArray<'_, T> {
    type Target = Geometry;
    fn deref(&self) -> &Geometry {
        &self.geometry
    }
}

impl<T> DerefMut for VoxelArray<'_, T> {
    fn deref_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }
}

impl<T> std::fmt::Debug for VoxelArray<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("VoxelArray")
            .field("geometry", &self.geometry)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Read-write typed view over an exclusively borrowed [VoxelData]
///
/// ```rust
/// # use voxtools_array::{ValueAccess, ValueAccessMut, VoxelArrayMut, VoxelData};
/// let mut data = VoxelData::<f32>::zeros([2, 2, 2], [1.0; 3]).unwrap();
/// let mut array = VoxelArrayMut::new(&mut data);
///
/// array.set_value(2.0, 1, 0, 1).unwrap();
/// array.increment_value(0.5, 1, 0, 1).unwrap();
/// assert_eq!(array.get_value(1, 0, 1).unwrap(), 2.5);
///
/// // the exclusive borrow ends with the view
/// drop(array);
/// assert_eq!(data.values().iter().sum::<f32>(), 2.5);
/// ```
pub struct VoxelArrayMut<'a, T> {
    geometry: Geometry,
    data: &'a mut VoxelData<T>,
}

impl<'a, T> VoxelArrayMut<'a, T> {
    /// Bind a new mutable view to `data`, with no sub-views active
    pub fn new(data: &'a mut VoxelData<T>) -> Self {
        Self {
            geometry: Geometry::bind(data),
            data,
        }
    }

    /// The borrowed buffer
    pub fn data(&self) -> &VoxelData<T> {
        self.data
    }

    /// The borrowed buffer, mutably
    pub fn data_mut(&mut self) -> &mut VoxelData<T> {
        self.data
    }

    /// Read-only view sharing this view's geometry
    pub fn view(&self) -> VoxelArray<'_, T> {
        VoxelArray {
            geometry: self.geometry.clone(),
            data: self.data,
        }
    }

    /// Write the underlying buffer through a format codec
    pub fn write_with<C, P>(&self, codec: &C, path: P) -> core::result::Result<(), C::Error>
    where
        C: Codec<T>,
        P: AsRef<Path>,
    {
        self.data.write_with(codec, path)
    }
}

impl<T: Element> VoxelArrayMut<'_, T> {
    /// Largest value in the **whole** buffer, ignoring crop and merge
    pub fn max_value(&self) -> Result<T> {
        max_value(self.data.values())
    }

    /// Smallest value in the **whole** buffer, ignoring crop and merge
    pub fn min_value(&self) -> Result<T> {
        min_value(self.data.values())
    }
}

impl<T: Element> ValueAccess for VoxelArrayMut<'_, T> {
    type Value = T;
    type Param = T;

    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn value_at(&self, index: usize) -> Option<T> {
        self.data.values().get(index).copied()
    }

    fn value_unchecked(&self, index: usize) -> T {
        self.data.values()[index]
    }

    fn project(param: T) -> T {
        param
    }
}

impl<T: Element> ValueAccessMut for VoxelArrayMut<'_, T> {
    fn value_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.values_mut().get_mut(index)
    }
}

impl<T> Deref for VoxelArrayMut<'_, T> {
    type Target = Geometry;
    fn deref(&self) -> &Geometry {
        &self.geometry
    }
}

impl<T> DerefMut for VoxelArrayMut<'_, T> {
    fn deref_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }
}

impl<T> std::fmt::Debug for VoxelArrayMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("VoxelArrayMut")
            .field("geometry", &self.geometry)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Linear scan for the largest value, first one wins on ties and NaN
fn max_value<T: Element>(values: &[T]) -> Result<T> {
    values
        .iter()
        .copied()
        .reduce(|best, v| if v > best { v } else { best })
        .ok_or(Error::EmptyBuffer)
}

/// Linear scan for the smallest value, first one wins on ties and NaN
fn min_value<T: Element>(values: &[T]) -> Result<T> {
    values
        .iter()
        .copied()
        .reduce(|best, v| if v < best { v } else { best })
        .ok_or(Error::EmptyBuffer)
}
