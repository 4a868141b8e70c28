//! End-to-end pipeline tests against synthetic granules.
//!
//! The files written here are ordinary netCDF-4, not HDF-EOS2, but they
//! carry the same dataset layout the pipeline reads: a 3-D retrieval
//! field with a `_FillValue` attribute plus 2-D `Latitude`/`Longitude`.

use std::fs;
use std::path::{Path, PathBuf};

use airs_plot::config::Config;
use airs_plot::pipeline;

const FILE_NAME: &str = "AIRS.2021.02.01.L3.RetStd_IR028.v7.0.4.0.G21066221513.hdf";
const FIELD_NAME: &str = "CH4_VMR_A";
const LAYER: usize = 11;

const LEVELS: usize = 28;
const ROWS: usize = 18;
const COLS: usize = 36;
const FILL: f32 = -9999.0;

/// Write a small granule with AIRS-like structure.
///
/// Cell values grow with the level index so each layer is distinct; a
/// handful of cells in every layer hold the fill value.
fn write_granule(path: &Path, field: &str, levels: usize) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;
    file.add_dimension("H20PrsLvls", levels)?;
    file.add_dimension("YDim", ROWS)?;
    file.add_dimension("XDim", COLS)?;

    let mut data = Vec::with_capacity(levels * ROWS * COLS);
    for level in 0..levels {
        for row in 0..ROWS {
            for col in 0..COLS {
                if row == col {
                    data.push(FILL);
                } else {
                    data.push(1.0e-6 + level as f32 * 1.0e-8 + row as f32 * 1.0e-10);
                }
            }
        }
    }
    let mut var = file.add_variable::<f32>(field, &["H20PrsLvls", "YDim", "XDim"])?;
    // Fill value must be declared before any data lands in the variable.
    var.set_fill_value(FILL)?;
    var.put_values(&data, ..)?;

    let mut lat = Vec::with_capacity(ROWS * COLS);
    let mut lon = Vec::with_capacity(ROWS * COLS);
    for row in 0..ROWS {
        for col in 0..COLS {
            lat.push(85.0 - 170.0 * row as f32 / (ROWS - 1) as f32);
            lon.push(-175.0 + 350.0 * col as f32 / (COLS - 1) as f32);
        }
    }
    let mut lat_var = file.add_variable::<f32>("Latitude", &["YDim", "XDim"])?;
    lat_var.put_values(&lat, ..)?;
    let mut lon_var = file.add_variable::<f32>("Longitude", &["YDim", "XDim"])?;
    lon_var.put_values(&lon, ..)?;

    Ok(())
}

// ===== whole pipeline =====

#[test]
fn test_end_to_end_writes_png() {
    let dir = tempfile::TempDir::new().unwrap();
    write_granule(&dir.path().join(FILE_NAME), FIELD_NAME, LEVELS).unwrap();

    let config = Config {
        data_dir: dir.path().to_path_buf(),
    };

    // The figure lands in the working directory, so run from the tempdir and
    // put the original back before asserting anything; later tests must not
    // inherit a working directory that gets deleted with the tempdir.
    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let first = pipeline::run(&config, FILE_NAME, FIELD_NAME, LAYER);
    let second = pipeline::run(&config, FILE_NAME, FIELD_NAME, LAYER);
    std::env::set_current_dir(&original_dir).unwrap();

    let output = first.unwrap();
    assert_eq!(output, PathBuf::from(format!("{}.py.png", FILE_NAME)));
    let bytes = fs::read(dir.path().join(&output)).unwrap();
    assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

    // The second run overwrites the figure with identical bytes.
    let bytes_again = fs::read(dir.path().join(&second.unwrap())).unwrap();
    assert_eq!(bytes, bytes_again);
}

// ===== failure modes =====
//
// These tests never reach the output-writing step, so they are safe to
// run from whatever working directory the test harness happens to be in.

#[test]
fn test_missing_granule_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = Config {
        data_dir: dir.path().to_path_buf(),
    };
    let result = pipeline::run(&config, "no-such-granule.hdf", FIELD_NAME, LAYER);
    assert!(result.is_err());
}

#[test]
fn test_missing_field_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    write_granule(&dir.path().join(FILE_NAME), "SomeOtherField", LEVELS).unwrap();

    let config = Config {
        data_dir: dir.path().to_path_buf(),
    };
    let result = pipeline::run(&config, FILE_NAME, FIELD_NAME, LAYER);
    assert!(result.is_err());
}

#[test]
fn test_layer_out_of_bounds_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    // Eleven levels make layer index 11 the first invalid one.
    write_granule(&dir.path().join(FILE_NAME), FIELD_NAME, 11).unwrap();

    let config = Config {
        data_dir: dir.path().to_path_buf(),
    };
    let result = pipeline::run(&config, FILE_NAME, FIELD_NAME, LAYER);
    assert!(result.is_err());
}
