//! Out-of-band metadata for headerless dumps

// standard library
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::reader::read_raw_file;
use crate::writer::write_raw_file;

// voxtools modules
use voxtools_array::{Codec, Order, VoxelData};
use voxtools_utils::{f, TripletExt};

// external crates
use num_traits::Zero;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Codec for files holding nothing but the voxel elements
///
/// A raw dump has no header, so the shape, spacing, origin, and storage order
/// must all be known up front. Elements are read and written back to back as
/// fixed width little-endian values.
///
/// ```rust, no_run
/// # use voxtools_array::{Order, VoxelData};
/// # use voxtools_raw::RawCodec;
/// let codec = RawCodec::new([64, 64, 32], [1.0, 1.0, 2.5])
///     .with_origin([-32.0, -32.0, 0.0])
///     .with_order(Order::RowMajor);
///
/// let data: VoxelData<f32> = VoxelData::read_with(&codec, "./dose.raw").unwrap();
/// data.write_with(&codec, "./dose_copy.raw").unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawCodec {
    /// Number of voxels on each axis
    pub shape: [usize; 3],
    /// Voxel spacing on each axis
    pub spacing: [f64; 3],
    /// Physical origin
    pub origin: [f64; 3],
    /// Which axis varies fastest in the file
    pub order: Order,
}

impl RawCodec {
    /// Codec for a given shape and spacing
    ///
    /// The origin defaults to `[0.0, 0.0, 0.0]` and the order to
    /// [Order::ColumnMajor].
    pub fn new(shape: [usize; 3], spacing: [f64; 3]) -> Self {
        Self {
            shape,
            spacing,
            origin: [0.0; 3],
            order: Order::default(),
        }
    }

    /// Codec carrying the metadata of an existing buffer
    ///
    /// Useful for writing a buffer out and reading it back unchanged.
    pub fn matching<T>(data: &VoxelData<T>) -> Self {
        Self {
            shape: data.shape(),
            spacing: data.spacing(),
            origin: data.origin(),
            order: data.order(),
        }
    }

    /// Set the physical origin
    pub fn with_origin(mut self, origin: [f64; 3]) -> Self {
        self.origin = origin;
        self
    }

    /// Set the storage order
    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Number of elements expected in the file
    pub fn len(&self) -> usize {
        self.shape.checked_product().unwrap_or(0)
    }

    /// Check if the shape describes no elements at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expected file size in bytes for elements of type `T`
    pub fn byte_length<T>(&self) -> Result<u64>
    where
        T: Serialize + Zero,
    {
        let width = bincode::serialized_size(&T::zero())?;
        (self.len() as u64)
            .checked_mul(width)
            .ok_or(Error::ArrayError(voxtools_array::Error::InvalidShape {
                shape: self.shape,
            }))
    }
}

impl<T> Codec<T> for RawCodec
where
    T: Serialize + DeserializeOwned + Zero,
{
    type Error = Error;

    fn read(&self, path: &Path) -> Result<VoxelData<T>> {
        read_raw_file(path, self)
    }

    fn write(&self, data: &VoxelData<T>, path: &Path) -> Result<()> {
        write_raw_file(data, path)
    }
}

impl std::fmt::Display for RawCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = f!(
            "RawCodec {{ shape: {}, spacing: {}, order: {} }}",
            self.shape.dims(),
            self.spacing.dims(),
            self.order
        );
        write!(f, "{s}")
    }
}
