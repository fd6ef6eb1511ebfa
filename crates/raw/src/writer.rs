//! Write operations for voxel buffers

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::error::Result;

// voxtools modules
use voxtools_array::VoxelData;
use voxtools_utils::TripletExt;

// external crates
use bincode::serialize_into;
use log::debug;
use serde::Serialize;

/// Write the elements of a [VoxelData] as a headerless raw dump
///
/// Only the elements are written, in buffer order. The shape, spacing,
/// origin, and storage order have to be kept elsewhere to read the file
/// back.
///
/// ```rust, no_run
/// # use voxtools_array::VoxelData;
/// # use voxtools_raw::write_raw_file;
/// let data = VoxelData::<f32>::zeros([16, 16, 16], [1.0, 1.0, 1.0]).unwrap();
/// write_raw_file(&data, "./zeros.raw").unwrap();
/// ```
pub fn write_raw_file<T, P>(data: &VoxelData<T>, path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!(
        "Writing {} raw voxels to {}",
        data.shape().dims(),
        path.display()
    );

    let mut writer = init_writer(path)?;
    for value in data.values() {
        serialize_into(&mut writer, value)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a [VoxelData] to a JSON file
///
/// Any buffer may be written to JSON for inspection or analysis. This is a
/// direct serialisation of the shape, spacing, origin, order, and every
/// element in buffer order.
///
/// ```rust, no_run
/// # use voxtools_array::VoxelData;
/// # use voxtools_raw::write_json;
/// let data = VoxelData::new(vec![1u8, 2, 3, 4], [2, 2, 1], [1.0, 1.0, 1.0]).unwrap();
/// write_json(&data, "./voxels.json").unwrap();
/// ```
pub fn write_json<T, P>(data: &VoxelData<T>, path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let writer = init_writer(path)?;
    serde_json::to_writer_pretty(writer, data)?;
    Ok(())
}

/// Initialise a writer from anything that can be turned into a path
fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}
