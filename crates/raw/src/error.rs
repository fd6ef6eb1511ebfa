//! Result and Error types for the raw module

/// Type alias for `Result<T, raw::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `voxtools-raw`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure to encode or decode an element
    #[error("failed bincode operation")]
    BincodeError(#[from] Box<bincode::ErrorKind>),

    /// Failure to serialise to a JSON string
    #[error("failed serde JSON operation")]
    JSONError(#[from] serde_json::Error),

    /// Shape, spacing, or length rejected by the buffer
    #[error(transparent)]
    ArrayError(#[from] voxtools_array::Error),

    /// File size does not match the expected number of elements
    #[error("unexpected byte length (expected {expected:?}, found {found:?})")]
    UnexpectedByteLength { expected: u64, found: u64 },
}
