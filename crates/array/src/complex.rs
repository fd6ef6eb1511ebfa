//! Real-valued view over complex voxel storage

// standard library
use std::ops::{Deref, DerefMut};

// crate modules
use crate::array::ValueAccess;
use crate::data::VoxelData;
use crate::element::Element;
use crate::geometry::Geometry;

// external crates
use num_complex::Complex;

/// Read-only view projecting complex voxels onto their real component
///
/// Every read returns the real part of the stored element, and the quantized
/// reads take complex parameters of which only the real part is used. There
/// is no mutable counterpart.
///
/// ```rust
/// # use voxtools_array::{ComplexVoxelArray, ValueAccess, VoxelData};
/// # use num_complex::Complex;
/// let values = vec![Complex::new(3.0, 4.0), Complex::new(-1.5, 2.0)];
/// let data = VoxelData::new(values, [2, 1, 1], [1.0; 3]).unwrap();
/// let array = ComplexVoxelArray::new(&data);
///
/// assert_eq!(array.get_value(0, 0, 0).unwrap(), 3.0);
/// assert_eq!(array.rounded_value(0, Complex::new(5.0, 100.0)).unwrap(), 5.0);
/// ```
#[derive(Clone)]
pub struct ComplexVoxelArray<'a, T> {
    geometry: Geometry,
    data: &'a VoxelData<Complex<T>>,
}

impl<'a, T> ComplexVoxelArray<'a, T> {
    /// Bind a new view to complex `data`, with no sub-views active
    pub fn new(data: &'a VoxelData<Complex<T>>) -> Self {
        Self {
            geometry: Geometry::bind(data),
            data,
        }
    }

    /// Rebind the view to another buffer, resetting its geometry
    pub fn bind(&mut self, data: &'a VoxelData<Complex<T>>) {
        *self = Self::new(data);
    }

    /// The borrowed buffer
    pub fn data(&self) -> &'a VoxelData<Complex<T>> {
        self.data
    }
}

impl<T: Element> ValueAccess for ComplexVoxelArray<'_, T> {
    type Value = T;
    type Param = Complex<T>;

    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn value_at(&self, index: usize) -> Option<T> {
        self.data.values().get(index).map(|c| c.re)
    }

    fn value_unchecked(&self, index: usize) -> T {
        self.data.values()[index].re
    }

    fn project(param: Complex<T>) -> T {
        param.re
    }
}

impl<T> Deref for ComplexVoxelArray<'_, T> {
    type Target = Geometry;
    fn deref(&self) -> &Geometry {
        &self.geometry
    }
}

impl<T> DerefMut for ComplexVoxelArray<'_, T> {
    fn deref_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }
}

impl<T> std::fmt::Debug for ComplexVoxelArray<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ComplexVoxelArray")
            .field("geometry", &self.geometry)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Order;

    fn data() -> VoxelData<Complex<f64>> {
        let values = (0..8).map(|i| Complex::new(i as f64, -(i as f64))).collect();
        VoxelData::new(values, [2, 2, 2], [1.0; 3])
            .unwrap()
            .with_order(Order::RowMajor)
    }

    #[test]
    fn reads_real_part() {
        let data = data();
        let array = ComplexVoxelArray::new(&data);
        assert_eq!(array.get_value(1, 1, 1), Ok(7.0));
        assert_eq!(array.get_value_at(2), Ok(2.0));
        assert_eq!(array.get_value_partial(1, 1), Ok(3.0));
        assert_eq!(array.get_value_unchecked(0, 0, 1), 4.0);
        assert!(array.get_value(2, 0, 0).is_err());
    }

    #[test]
    fn rounding_ignores_imaginary_parts() {
        let data = data();
        let array = ComplexVoxelArray::new(&data);
        let step = Complex::new(4.0, 0.1);
        assert_eq!(array.rounded_value(6, step), Ok(8.0));
        assert_eq!(
            array.rounded_value_clamped(6, Complex::new(0.0, 9.0), Complex::new(5.0, -9.0), step),
            Ok(5.0)
        );
    }

    #[test]
    fn sub_views_apply() {
        let data = data();
        let mut array = ComplexVoxelArray::new(&data);
        array.merge(2, 2, 1).unwrap();
        assert_eq!(array.shape(), [1, 1, 2]);
        assert_eq!(array.get_value(1, 0, 0), Ok(1.0));
    }
}
