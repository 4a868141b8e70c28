//! Filled color mesh of a gridded field.

use ndarray::Array2;
use tiny_skia::{FillRule, Paint, PathBuilder, Transform};
use tracing::debug;

use crate::canvas::MapCanvas;
use crate::error::{RenderError, RenderResult};

impl MapCanvas {
    /// Fill the data layer with one quad per grid cell.
    ///
    /// `latitude`, `longitude`, and `field` are corner grids of identical
    /// shape. Cell (i, j) spans the quad between grid points (i, j) and
    /// (i+1, j+1) and takes its color from `field[[i, j]]`, so the last row
    /// and column only contribute corners. NaN cells are left unpainted and
    /// excluded from the color scaling, which runs over the drawn cells only.
    ///
    /// Returns [`RenderError::ShapeMismatch`] when the grids disagree and
    /// [`RenderError::NoValidData`] when no cell is finite.
    pub fn draw_color_mesh(
        &mut self,
        latitude: &Array2<f64>,
        longitude: &Array2<f64>,
        field: &Array2<f64>,
    ) -> RenderResult<()> {
        let dim = field.dim();
        if latitude.dim() != dim {
            return Err(RenderError::ShapeMismatch {
                expected: dim,
                actual: latitude.dim(),
            });
        }
        if longitude.dim() != dim {
            return Err(RenderError::ShapeMismatch {
                expected: dim,
                actual: longitude.dim(),
            });
        }

        let (rows, cols) = dim;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for i in 0..rows.saturating_sub(1) {
            for j in 0..cols.saturating_sub(1) {
                let value = field[[i, j]];
                if value.is_finite() {
                    min = min.min(value);
                    max = max.max(value);
                }
            }
        }
        if !min.is_finite() {
            return Err(RenderError::NoValidData);
        }
        self.scale_range = Some((min, max));

        // Quads share edges, so antialiasing would double-blend the seams.
        let mut paint = Paint::default();
        paint.anti_alias = false;

        let mut drawn = 0usize;
        for i in 0..rows - 1 {
            for j in 0..cols - 1 {
                let value = field[[i, j]];
                if !value.is_finite() {
                    continue;
                }

                let corners = [
                    (longitude[[i, j]], latitude[[i, j]]),
                    (longitude[[i, j + 1]], latitude[[i, j + 1]]),
                    (longitude[[i + 1, j + 1]], latitude[[i + 1, j + 1]]),
                    (longitude[[i + 1, j]], latitude[[i + 1, j]]),
                ];
                if corners
                    .iter()
                    .any(|&(lon, lat)| !lon.is_finite() || !lat.is_finite())
                {
                    continue;
                }

                let mut pb = PathBuilder::new();
                let (x, y) = self.forward(corners[0].0, corners[0].1);
                pb.move_to(x, y);
                for &(lon, lat) in &corners[1..] {
                    let (x, y) = self.forward(lon, lat);
                    pb.line_to(x, y);
                }
                pb.close();

                if let Some(path) = pb.finish() {
                    let color = self.ramp.color_at(value, min, max);
                    paint.set_color_rgba8(color.0[0], color.0[1], color.0[2], color.0[3]);
                    self.mesh
                        .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
                    drawn += 1;
                }
            }
        }

        debug!(rows, cols, drawn, min, max, "filled color mesh");
        Ok(())
    }
}
