//! `voxtools` is a small toolkit for interpreting flat voxel buffers as
//! addressable, queryable grids
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use voxtools_utils as utils;

#[cfg(feature = "array")]
#[cfg_attr(docsrs, doc(cfg(feature = "array")))]
#[doc(inline)]
pub use voxtools_array as array;

#[cfg(feature = "raw")]
#[cfg_attr(docsrs, doc(cfg(feature = "raw")))]
#[doc(inline)]
pub use voxtools_raw as raw;
