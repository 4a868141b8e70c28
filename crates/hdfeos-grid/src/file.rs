//! Grid file access built on the netcdf library.
//!
//! AIRS Level-3 products ship as HDF-EOS2 grids on the classic HDF4 disk
//! format. libnetcdf opens those transparently when it is built with HDF4
//! support, so the same reader handles both .hdf and .nc inputs. Geolocation
//! fields (`Latitude`, `Longitude`) and data fields appear as ordinary
//! netCDF variables with their HDF-EOS attributes attached.

use std::path::{Path, PathBuf};
use std::sync::Once;

use ndarray::Array2;
use tracing::debug;

use crate::error::{GridError, GridResult};

/// Attribute that marks cells with no retrieval.
const FILL_ATTRIBUTE: &str = "_FillValue";

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when
/// errors are handled gracefully by the Rust code (e.g., when probing a
/// variable for an attribute that does not exist). This creates confusing
/// log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// This function disables that output by calling H5Eset_auto2 with null
/// handlers. It only needs to be called once per process, but is safe to
/// call multiple times.
///
/// **Important**: Call this function early in your program's startup (e.g.,
/// in main()) before any HDF5/NetCDF operations occur. If HDF5 is
/// initialized before this is called, the error silencing may not take
/// effect for all operations.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// An opened HDF-EOS2 grid file.
///
/// Wraps a read-only netCDF handle together with the path it was opened
/// from, so error messages and log lines can name the file.
pub struct GridFile {
    file: netcdf::File,
    path: PathBuf,
}

impl GridFile {
    /// Open a grid file for reading.
    ///
    /// Returns [`GridError::FileOpen`] when the path does not exist or the
    /// file is not a format libnetcdf understands.
    pub fn open<P: AsRef<Path>>(path: P) -> GridResult<Self> {
        silence_hdf5_errors();

        let path = path.as_ref().to_path_buf();
        let file = netcdf::open(&path).map_err(|source| GridError::FileOpen {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), "opened grid file");
        Ok(Self { file, path })
    }

    /// Path this file was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of every dataset (netCDF variable) in the file.
    pub fn dataset_names(&self) -> Vec<String> {
        self.file.variables().map(|var| var.name()).collect()
    }

    /// Look up a dataset by name.
    ///
    /// Returns [`GridError::FieldNotFound`] when no variable with that name
    /// exists in the file.
    pub fn variable(&self, name: &str) -> GridResult<GridVariable<'_>> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| GridError::FieldNotFound(name.to_string()))?;
        Ok(GridVariable { var })
    }
}

/// A dataset inside an open [`GridFile`].
pub struct GridVariable<'f> {
    var: netcdf::Variable<'f>,
}

impl GridVariable<'_> {
    /// Name of the underlying variable.
    pub fn name(&self) -> String {
        self.var.name()
    }

    /// Extent of each dimension, outermost first.
    pub fn shape(&self) -> Vec<usize> {
        self.var.dimensions().iter().map(|dim| dim.len()).collect()
    }

    /// Read one layer of a 3-D dataset as a 2-D array.
    ///
    /// The layer is taken along the leading (outermost) dimension, which for
    /// AIRS 3-D fields is the pressure-level axis. Values are widened to f64
    /// on read.
    ///
    /// Returns [`GridError::Shape`] when the dataset is not rank 3 and
    /// [`GridError::Bounds`] when `index` is past the leading extent.
    pub fn slice_layer(&self, index: usize) -> GridResult<Array2<f64>> {
        let shape = self.shape();
        if shape.len() != 3 {
            return Err(GridError::Shape(format!(
                "{} has rank {}, expected a 3-D dataset",
                self.name(),
                shape.len()
            )));
        }
        if index >= shape[0] {
            return Err(GridError::Bounds {
                index,
                extent: shape[0],
            });
        }

        let (rows, cols) = (shape[1], shape[2]);
        let values: Vec<f64> = self.var.get_values((index, .., ..))?;
        Array2::from_shape_vec((rows, cols), values)
            .map_err(|e| GridError::Shape(e.to_string()))
    }

    /// Read an entire 2-D dataset, widened to f64.
    ///
    /// Returns [`GridError::Shape`] when the dataset is not rank 2.
    pub fn read_2d(&self) -> GridResult<Array2<f64>> {
        let shape = self.shape();
        if shape.len() != 2 {
            return Err(GridError::Shape(format!(
                "{} has rank {}, expected a 2-D dataset",
                self.name(),
                shape.len()
            )));
        }

        let (rows, cols) = (shape[0], shape[1]);
        let values: Vec<f64> = self.var.get_values(..)?;
        Array2::from_shape_vec((rows, cols), values)
            .map_err(|e| GridError::Shape(e.to_string()))
    }

    /// Read the `_FillValue` attribute of this dataset.
    ///
    /// HDF4 attributes always carry an element count, so a scalar fill value
    /// may surface as a one-element array; both forms are accepted. Returns
    /// [`GridError::FieldNotFound`] when the attribute is absent.
    pub fn fill_value(&self) -> GridResult<f64> {
        // Probing attributes by name first avoids HDF5 error spam for
        // variables that genuinely lack a fill value.
        if !has_attr(&self.var, FILL_ATTRIBUTE) {
            return Err(GridError::FieldNotFound(format!(
                "attribute {} on {}",
                FILL_ATTRIBUTE,
                self.name()
            )));
        }

        let value = self
            .var
            .attribute_value(FILL_ATTRIBUTE)
            .ok_or_else(|| {
                GridError::FieldNotFound(format!(
                    "attribute {} on {}",
                    FILL_ATTRIBUTE,
                    self.name()
                ))
            })??;

        attr_scalar(&value).ok_or_else(|| {
            GridError::Shape(format!(
                "attribute {} on {} is not a numeric scalar",
                FILL_ATTRIBUTE,
                self.name()
            ))
        })
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Coerce an attribute value to a numeric scalar.
///
/// Accepts every numeric scalar variant plus one-element arrays, which is
/// how HDF4 single-count attributes come through libnetcdf.
fn attr_scalar(value: &netcdf::AttributeValue) -> Option<f64> {
    use netcdf::AttributeValue::*;

    match value {
        Uchar(v) => Some(f64::from(*v)),
        Schar(v) => Some(f64::from(*v)),
        Ushort(v) => Some(f64::from(*v)),
        Short(v) => Some(f64::from(*v)),
        Uint(v) => Some(f64::from(*v)),
        Int(v) => Some(f64::from(*v)),
        Ulonglong(v) => Some(*v as f64),
        Longlong(v) => Some(*v as f64),
        Float(v) => Some(f64::from(*v)),
        Double(v) => Some(*v),
        Uchars(v) => v.first().map(|&x| f64::from(x)),
        Schars(v) => v.first().map(|&x| f64::from(x)),
        Ushorts(v) => v.first().map(|&x| f64::from(x)),
        Shorts(v) => v.first().map(|&x| f64::from(x)),
        Uints(v) => v.first().map(|&x| f64::from(x)),
        Ints(v) => v.first().map(|&x| f64::from(x)),
        Ulonglongs(v) => v.first().map(|&x| x as f64),
        Longlongs(v) => v.first().map(|&x| x as f64),
        Floats(v) => v.first().map(|&x| f64::from(x)),
        Doubles(v) => v.first().copied(),
        Str(_) | Strs(_) => None,
    }
}
