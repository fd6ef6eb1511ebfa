//! Owned voxel buffers

// standard library
use std::path::Path;

// crate modules
use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::geometry::{validate_shape, validate_spacing};
use crate::order::Order;

// voxtools modules
use voxtools_utils::{f, TripletExt};

// external crates
use num_traits::Zero;
use serde::Serialize;

/// Contiguous voxel storage with the metadata needed to interpret it
///
/// A [VoxelData] owns its elements. Every view onto it
/// ([VoxelArray](crate::VoxelArray), [VoxelArrayMut](crate::VoxelArrayMut),
/// [ComplexVoxelArray](crate::ComplexVoxelArray)) borrows it and can not
/// outlive it.
///
/// The number of elements always matches the product of the shape.
///
/// ```rust
/// # use voxtools_array::{Order, VoxelData};
/// let data = VoxelData::new(vec![0u16; 24], [2, 3, 4], [0.5, 0.5, 1.0])
///     .unwrap()
///     .with_origin([10.0, 0.0, -5.0])
///     .with_order(Order::RowMajor);
///
/// assert_eq!(data.len(), 24);
/// assert_eq!(data.length(), 48);
/// assert_eq!(data.ndims(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoxelData<T> {
    shape: [usize; 3],
    spacing: [f64; 3],
    origin: [f64; 3],
    order: Order,
    values: Vec<T>,
}

impl<T> VoxelData<T> {
    /// Wrap existing values with a raw shape and spacing
    ///
    /// The origin defaults to `[0.0, 0.0, 0.0]` and the order to
    /// [Order::ColumnMajor].
    pub fn new(values: Vec<T>, shape: [usize; 3], spacing: [f64; 3]) -> Result<Self> {
        validate_shape(&shape)?;
        validate_spacing(&spacing)?;

        let expected = shape.iter().product();
        if values.len() != expected {
            return Err(Error::UnexpectedLength {
                expected,
                found: values.len(),
            });
        }

        Ok(Self {
            shape,
            spacing,
            origin: [0.0; 3],
            order: Order::default(),
            values,
        })
    }

    /// Set the physical origin
    pub fn with_origin(mut self, origin: [f64; 3]) -> Self {
        self.origin = origin;
        self
    }

    /// Set the flattening order of the values
    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Read a buffer through a format codec
    pub fn read_with<C, P>(codec: &C, path: P) -> core::result::Result<Self, C::Error>
    where
        C: Codec<T>,
        P: AsRef<Path>,
    {
        codec.read(path.as_ref())
    }

    /// Write the buffer through a format codec
    pub fn write_with<C, P>(&self, codec: &C, path: P) -> core::result::Result<(), C::Error>
    where
        C: Codec<T>,
        P: AsRef<Path>,
    {
        codec.write(self, path.as_ref())
    }

    /// Raw shape
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Raw spacing
    pub fn spacing(&self) -> [f64; 3] {
        self.spacing
    }

    /// Physical origin
    pub fn origin(&self) -> [f64; 3] {
        self.origin
    }

    /// Flattening order
    pub fn order(&self) -> Order {
        self.order
    }

    /// Number of dimensions, always 3
    pub fn ndims(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false, a valid buffer has at least one element
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Size of the element storage in bytes
    pub fn length(&self) -> usize {
        self.values.len() * std::mem::size_of::<T>()
    }

    /// All elements in storage order
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// All elements in storage order, mutably
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Take ownership of the elements
    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

impl<T: Zero + Clone> VoxelData<T> {
    /// Zero-initialised buffer in [Order::ColumnMajor] order
    ///
    /// ```rust
    /// # use voxtools_array::VoxelData;
    /// let data = VoxelData::<f32>::zeros([2, 2, 2], [1.0, 1.0, 1.0]).unwrap();
    /// assert!(data.values().iter().all(|v| *v == 0.0));
    /// ```
    pub fn zeros(shape: [usize; 3], spacing: [f64; 3]) -> Result<Self> {
        validate_shape(&shape)?;
        let n = shape.iter().product();
        Self::new(vec![T::zero(); n], shape, spacing)
    }
}

impl<T> std::fmt::Display for VoxelData<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "VoxelData {\n".to_string();
        s += &f!("    shape: {} ({} voxels, {})\n", self.shape.dims(), self.len(), self.order);
        s += &f!("    spacing: {}\n", self.spacing.dims());
        s += &f!("    origin: {}\n", self.origin.dims());
        s += &f!("    bytes: {}\n}}", self.length());
        write!(f, "{s}")
    }
}
