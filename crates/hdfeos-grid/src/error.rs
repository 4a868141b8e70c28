//! Error types for HDF-EOS grid reading operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for grid reader operations.
pub type GridResult<T> = Result<T, GridError>;

/// Error types for HDF-EOS grid reading.
#[derive(Error, Debug)]
pub enum GridError {
    /// The grid file could not be opened
    #[error("failed to open grid file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        source: netcdf::Error,
    },

    /// Requested dataset or attribute is not present in the file
    #[error("field not found: {0}")]
    FieldNotFound(String),

    /// Layer index beyond the extent of the leading dimension
    #[error("layer index {index} out of bounds for dimension of extent {extent}")]
    Bounds { index: usize, extent: usize },

    /// Dataset rank or dimensions do not match what the caller expects
    #[error("unexpected dataset shape: {0}")]
    Shape(String),

    /// Error bubbled up from the netCDF library
    #[error("netCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),
}
