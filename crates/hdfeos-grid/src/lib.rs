//! Reading HDF-EOS2 grid products through libnetcdf.
//!
//! AIRS Level-3 retrievals are distributed as HDF-EOS2 grids on the HDF4
//! disk format, which libnetcdf reads directly when built with HDF4 support.
//! This crate wraps that access path:
//! - open a grid file and list its datasets
//! - slice one layer out of a 3-D field, or read a 2-D field whole
//! - mask fill cells to NaN using the dataset's `_FillValue` attribute

pub mod error;
pub mod file;
pub mod mask;

pub use error::{GridError, GridResult};
pub use file::{silence_hdf5_errors, GridFile, GridVariable};
pub use mask::MaskedField;
