//! The granule-to-figure pipeline.
//!
//! One call to [`run`] performs the whole job: open the granule, slice a
//! layer out of the retrieval field, mask fill cells, render the global
//! map, and write the PNG into the current working directory.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tracing::{debug, info};

use hdfeos_grid::{GridFile, MaskedField};
use map_renderer::{CanvasStyle, MapCanvas};

use crate::config::Config;

/// Colorbar caption.
const UNIT_LABEL: &str = "Unit:%";

/// Geolocation datasets shared by AIRS Level-3 grids.
const LATITUDE_NAME: &str = "Latitude";
const LONGITUDE_NAME: &str = "Longitude";

/// Coastline stroke width in pixels.
const COASTLINE_WIDTH: f32 = 0.5;

/// Parallels every 30 degrees, meridians every 45.
const PARALLEL_STEP: f64 = 30.0;
const MERIDIAN_STEP: f64 = 45.0;

/// Two-line figure title: the file name over the field and layer.
pub fn title_for(file_name: &str, field_name: &str, layer: usize) -> String {
    format!("{}\n {} at H20PrsLvls={}", file_name, field_name, layer)
}

/// Output file name: the input file name with `.py.png` appended.
pub fn output_name(file_name: &str) -> PathBuf {
    PathBuf::from(format!("{}.py.png", file_name))
}

/// Render one layer of one field from one granule and write the figure.
///
/// The granule is looked up under `config.data_dir`; the figure lands in
/// the current working directory. Returns the path written.
pub fn run(
    config: &Config,
    file_name: &str,
    field_name: &str,
    layer: usize,
) -> anyhow::Result<PathBuf> {
    let input = config.data_dir.join(file_name);
    info!(path = %input.display(), "opening granule");

    let grid = GridFile::open(&input)?;
    debug!(path = %grid.path().display(), datasets = ?grid.dataset_names(), "datasets in file");

    let variable = grid.variable(field_name)?;
    let layer_data = variable.slice_layer(layer)?;
    let fill_value = variable.fill_value()?;

    let masked = MaskedField::new(layer_data, fill_value);
    let (rows, cols) = masked.dim();
    info!(
        rows,
        cols,
        masked = masked.masked_cells(),
        fill_value = masked.fill_value(),
        "extracted layer"
    );
    if let Some((min, max)) = masked.finite_range() {
        debug!(min, max, "data range");
    }

    let latitude = grid.variable(LATITUDE_NAME)?.read_2d()?;
    let longitude = grid.variable(LONGITUDE_NAME)?.read_2d()?;

    let mut canvas = MapCanvas::global_equirectangular(CanvasStyle::default())?;
    canvas.draw_coastlines(COASTLINE_WIDTH)?;
    canvas.draw_parallels(PARALLEL_STEP);
    canvas.draw_meridians(MERIDIAN_STEP);
    canvas.draw_color_mesh(&latitude, &longitude, masked.values())?;
    canvas.draw_colorbar(UNIT_LABEL)?;
    canvas.draw_title(&title_for(file_name, field_name, layer));

    let output = output_name(file_name);
    let png = canvas.into_png()?;
    fs::write(&output, &png)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(path = %output.display(), bytes = png.len(), "wrote figure");
    Ok(output)
}
