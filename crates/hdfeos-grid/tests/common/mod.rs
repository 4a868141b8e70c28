//! Common test utilities for hdfeos-grid tests.
//!
//! Real AIRS granules are too large to ship with the crate, so tests write
//! small netCDF-4 files with the same layout: a 3-D data field over
//! (H20PrsLvls, YDim, XDim) carrying a `_FillValue` attribute, plus 2-D
//! `Latitude` and `Longitude` geolocation fields.

use std::path::Path;

/// Write a synthetic AIRS-like grid file.
///
/// `value` supplies the data field cell at (level, row, col). Latitude runs
/// north to south from 89.5 and longitude west to east from -179.5, matching
/// the 1-degree AIRS Level-3 grid registration.
pub fn write_grid_file(
    path: &Path,
    field: &str,
    levels: usize,
    rows: usize,
    cols: usize,
    fill: f32,
    mut value: impl FnMut(usize, usize, usize) -> f32,
) {
    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("H20PrsLvls", levels).unwrap();
    file.add_dimension("YDim", rows).unwrap();
    file.add_dimension("XDim", cols).unwrap();

    let mut data = Vec::with_capacity(levels * rows * cols);
    for level in 0..levels {
        for row in 0..rows {
            for col in 0..cols {
                data.push(value(level, row, col));
            }
        }
    }

    let mut var = file
        .add_variable::<f32>(field, &["H20PrsLvls", "YDim", "XDim"])
        .unwrap();
    // Fill value must be declared before any data lands in the variable.
    var.set_fill_value(fill).unwrap();
    var.put_values(&data, ..).unwrap();

    let lat_data: Vec<f32> = (0..rows)
        .flat_map(|row| (0..cols).map(move |_| 89.5 - row as f32))
        .collect();
    let mut lat = file
        .add_variable::<f32>("Latitude", &["YDim", "XDim"])
        .unwrap();
    lat.put_values(&lat_data, ..).unwrap();

    let lon_data: Vec<f32> = (0..rows)
        .flat_map(|_| (0..cols).map(|col| -179.5 + col as f32))
        .collect();
    let mut lon = file
        .add_variable::<f32>("Longitude", &["YDim", "XDim"])
        .unwrap();
    lon.put_values(&lon_data, ..).unwrap();
}
