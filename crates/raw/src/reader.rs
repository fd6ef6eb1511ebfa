//! Read operations for headerless raw dumps
//!
//! The file is nothing but a sequence of fixed width little-endian elements,
//! so the only possible sanity check is on the total byte length.

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// crate modules
use crate::codec::RawCodec;
use crate::error::{Error, Result};

// voxtools modules
use voxtools_array::VoxelData;
use voxtools_utils::TripletExt;

// external crates
use bincode::deserialize_from;
use log::debug;
use num_traits::Zero;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Deserialise a raw dump into a [VoxelData]
///
/// The file size at `path` must match the element count and width implied by
/// `codec` exactly, otherwise [Error::UnexpectedByteLength] is returned before
/// anything is decoded.
///
/// ```rust, no_run
/// # use voxtools_array::VoxelData;
/// # use voxtools_raw::{read_raw_file, RawCodec};
/// let codec = RawCodec::new([128, 128, 64], [0.2, 0.2, 0.5]);
/// let data: VoxelData<i16> = read_raw_file("./ct.raw", &codec).unwrap();
///
/// println!("{data}");
/// ```
pub fn read_raw_file<T, P>(path: P, codec: &RawCodec) -> Result<VoxelData<T>>
where
    T: Serialize + DeserializeOwned + Zero,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let expected = codec.byte_length::<T>()?;
    let found = std::fs::metadata(path)?.len();
    if found != expected {
        return Err(Error::UnexpectedByteLength { expected, found });
    }

    debug!(
        "Reading {} raw voxels from {}",
        codec.shape.dims(),
        path.display()
    );

    let mut reader = init_reader(path)?;
    let values = parse_values(&mut reader, codec.len())?;

    Ok(VoxelData::new(values, codec.shape, codec.spacing)?
        .with_origin(codec.origin)
        .with_order(codec.order))
}

/// Initialise a reader from anything that can be turned into a path
fn init_reader(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Deserialise `n` consecutive elements
fn parse_values<T: DeserializeOwned>(reader: &mut BufReader<File>, n: usize) -> Result<Vec<T>> {
    let mut values = Vec::with_capacity(n);
    for _ in 0..n {
        values.push(deserialize_from(&mut *reader)?);
    }
    Ok(values)
}
