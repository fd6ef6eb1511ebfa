//! Module for working with headerless raw voxel dumps
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod codec;
mod error;
mod reader;
mod writer;

// Inline anything important for a nice public API
#[doc(inline)]
pub use codec::RawCodec;

#[doc(inline)]
pub use reader::read_raw_file;

#[doc(inline)]
pub use writer::{write_json, write_raw_file};

#[doc(inline)]
pub use error::{Error, Result};
