//! Dashed latitude and longitude grid lines with edge labels.

use image::Rgba;
use tiny_skia::{Paint, PathBuilder, Stroke, StrokeDash, Transform};

use crate::canvas::MapCanvas;
use crate::text;

/// Gap between the plot frame and its axis labels, in pixels.
const LABEL_PAD: f32 = 6.0;

impl MapCanvas {
    /// Draw dashed parallels every `step` degrees, labeled on the left.
    ///
    /// Lines run at each multiple of `step` up from the southern map edge,
    /// both poles included when the step divides evenly.
    pub fn draw_parallels(&mut self, step: f64) {
        let size = self.style.label_font_size;
        for lat in graticule_steps(self.lat_min, self.lat_max, step) {
            let (_, y) = self.forward(self.lon_min, lat);
            let (x_end, _) = self.forward(self.lon_max, lat);
            let x_start = self.style.margin_left as f32;
            self.stroke_dashed(x_start, y, x_end, y);

            let label = format_latitude(lat);
            let label_width = text::text_width(&self.font, size, &label);
            text::draw_label(
                &mut self.base,
                &self.font,
                size,
                Rgba([0, 0, 0, 255]),
                (x_start - LABEL_PAD - label_width) as i32,
                (y - size * 0.4) as i32,
                &label,
            );
        }
    }

    /// Draw dashed meridians every `step` degrees, labeled along the bottom.
    ///
    /// Both the 180W and 180E edges are drawn and both label as plain
    /// `180°`, the way cylindrical map edges are conventionally marked.
    pub fn draw_meridians(&mut self, step: f64) {
        let size = self.style.label_font_size;
        let y_bottom = (self.style.margin_top + self.style.plot_height) as f32;
        for lon in graticule_steps(self.lon_min, self.lon_max, step) {
            let (x, _) = self.forward(lon, self.lat_max);
            self.stroke_dashed(x, self.style.margin_top as f32, x, y_bottom);

            let label = format_longitude(lon);
            let label_width = text::text_width(&self.font, size, &label);
            text::draw_label(
                &mut self.base,
                &self.font,
                size,
                Rgba([0, 0, 0, 255]),
                (x - label_width / 2.0) as i32,
                (y_bottom + LABEL_PAD) as i32,
                &label,
            );
        }
    }

    /// One dashed black hairline on the overlay layer.
    fn stroke_dashed(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        pb.line_to(x1, y1);

        if let Some(path) = pb.finish() {
            let mut paint = Paint::default();
            paint.set_color_rgba8(0, 0, 0, 255);
            paint.anti_alias = true;

            let mut stroke = Stroke {
                width: 1.0,
                ..Stroke::default()
            };
            stroke.dash = StrokeDash::new(vec![1.0, 1.0], 0.0);

            self.overlay
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}

/// Multiples of `step` from `min` through `max` inclusive.
fn graticule_steps(min: f64, max: f64, step: f64) -> Vec<f64> {
    let mut values = Vec::new();
    if !(step > 0.0) {
        return values;
    }
    let mut value = min;
    while value <= max + 1e-9 {
        values.push(value);
        value += step;
    }
    values
}

fn format_latitude(lat: f64) -> String {
    format_degrees(lat, 'N', 'S')
}

fn format_longitude(lon: f64) -> String {
    // The antimeridian is the same line from either direction.
    if lon.abs() == 180.0 {
        return "180°".to_string();
    }
    format_degrees(lon, 'E', 'W')
}

fn format_degrees(value: f64, positive: char, negative: char) -> String {
    let magnitude = value.abs();
    let number = if magnitude.fract() == 0.0 {
        format!("{:.0}", magnitude)
    } else {
        format!("{:.1}", magnitude)
    };
    if value > 0.0 {
        format!("{}°{}", number, positive)
    } else if value < 0.0 {
        format!("{}°{}", number, negative)
    } else {
        format!("{}°", number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graticule_steps_parallels() {
        let steps = graticule_steps(-90.0, 90.0, 30.0);
        assert_eq!(steps, vec![-90.0, -60.0, -30.0, 0.0, 30.0, 60.0, 90.0]);
    }

    #[test]
    fn test_graticule_steps_meridians() {
        let steps = graticule_steps(-180.0, 180.0, 45.0);
        assert_eq!(steps.len(), 9);
        assert_eq!(steps[0], -180.0);
        assert_eq!(steps[8], 180.0);
    }

    #[test]
    fn test_graticule_steps_bad_step() {
        assert!(graticule_steps(-90.0, 90.0, 0.0).is_empty());
        assert!(graticule_steps(-90.0, 90.0, -30.0).is_empty());
    }

    #[test]
    fn test_format_latitude() {
        assert_eq!(format_latitude(30.0), "30°N");
        assert_eq!(format_latitude(-45.0), "45°S");
        assert_eq!(format_latitude(0.0), "0°");
        assert_eq!(format_latitude(22.5), "22.5°N");
    }

    #[test]
    fn test_format_longitude() {
        assert_eq!(format_longitude(45.0), "45°E");
        assert_eq!(format_longitude(-135.0), "135°W");
        assert_eq!(format_longitude(0.0), "0°");
        assert_eq!(format_longitude(180.0), "180°");
        assert_eq!(format_longitude(-180.0), "180°");
    }
}
