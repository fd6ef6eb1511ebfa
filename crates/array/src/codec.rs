//! Extension point for format-specific readers and writers

// standard library
use std::path::Path;

// crate modules
use crate::data::VoxelData;

/// A file format able to produce and consume [VoxelData]
///
/// Format-specific behaviour is injected rather than inherited: any type
/// implementing [Codec] can be handed to
/// [VoxelData::read_with()](crate::VoxelData::read_with) and
/// [VoxelData::write_with()](crate::VoxelData::write_with).
///
/// Implementations keep their own error type, which must be able to carry the
/// geometry errors raised while building a buffer.
pub trait Codec<T> {
    /// Error raised by the format
    type Error: From<crate::Error>;

    /// Read a complete buffer from `path`
    fn read(&self, path: &Path) -> Result<VoxelData<T>, Self::Error>;

    /// Write a complete buffer to `path`
    fn write(&self, data: &VoxelData<T>, path: &Path) -> Result<(), Self::Error>;
}
