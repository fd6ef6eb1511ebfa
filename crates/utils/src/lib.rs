//! Common utility for extended `std` types
//!
//! These are left public for convenience.
//!
//! For example, printing shapes as `NXxNYxNZ` or using prettier formatting for
//! scientific numbers are useful everywhere.
#![doc = include_str!("../readme.md")]

// Alias for the format! macro
pub use std::format as f;

// Modules
mod option_ext;
mod triplet_ext;
mod value_ext;

// Flatten
pub use option_ext::OptionExt;
pub use triplet_ext::TripletExt;
pub use value_ext::ValueExt;
