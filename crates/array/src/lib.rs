//! Geometry views over flat voxel buffers
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod array;
mod axis;
mod codec;
mod complex;
mod crop;
mod data;
mod element;
mod error;
mod geometry;
mod merge;
mod order;

// Inline anything important for a nice public API
#[doc(inline)]
pub use array::{ValueAccess, ValueAccessMut, VoxelArray, VoxelArrayMut};

#[doc(inline)]
pub use complex::ComplexVoxelArray;

#[doc(inline)]
pub use axis::Axis;

#[doc(inline)]
pub use order::Order;

#[doc(inline)]
pub use crop::CropWindow;

#[doc(inline)]
pub use merge::{MergeBlock, MergePolicy, MergeStatus};

#[doc(inline)]
pub use geometry::{position, Geometry};

#[doc(inline)]
pub use data::VoxelData;

#[doc(inline)]
pub use codec::Codec;

#[doc(inline)]
pub use element::{round, round_clamped, CheckedArith, Element};

#[doc(inline)]
pub use error::{Error, Result};
