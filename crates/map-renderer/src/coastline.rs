//! Coastline overlay from bundled Natural Earth geometry.

use serde::Deserialize;
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Stroke, Transform};
use tracing::debug;

use crate::canvas::MapCanvas;
use crate::error::RenderResult;

/// Natural Earth 1:110m coastlines as GeoJSON LineStrings.
const COASTLINE_GEOJSON: &str = include_str!("../assets/coastline-110m.geojson");

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<[f64; 2]>,
}

impl MapCanvas {
    /// Stroke the low-resolution coastline database onto the overlay layer.
    pub fn draw_coastlines(&mut self, width: f32) -> RenderResult<()> {
        let collection: FeatureCollection = serde_json::from_str(COASTLINE_GEOJSON)?;

        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, 255);
        paint.anti_alias = true;

        let mut stroke = Stroke::default();
        stroke.width = width;
        stroke.line_cap = LineCap::Round;
        stroke.line_join = LineJoin::Round;

        let mut drawn = 0usize;
        for feature in &collection.features {
            if feature.geometry.kind != "LineString" {
                continue;
            }
            let points = &feature.geometry.coordinates;
            if points.len() < 2 {
                continue;
            }

            let mut pb = PathBuilder::new();
            let (x, y) = self.forward(points[0][0], points[0][1]);
            pb.move_to(x, y);
            for point in &points[1..] {
                let (x, y) = self.forward(point[0], point[1]);
                pb.line_to(x, y);
            }

            if let Some(path) = pb.finish() {
                self.overlay
                    .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                drawn += 1;
            }
        }

        debug!(features = drawn, width, "drew coastlines");
        Ok(())
    }
}
