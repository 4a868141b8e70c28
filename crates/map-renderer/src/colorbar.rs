//! Vertical colorbar keyed to the mesh color scaling.

use image::{imageops, Rgba, RgbaImage};
use tiny_skia::{Paint, PathBuilder, Stroke, Transform};
use tracing::debug;

use crate::canvas::MapCanvas;
use crate::error::{RenderError, RenderResult};
use crate::text;

/// Gap between the plot frame and the bar, in pixels.
const BAR_OFFSET: u32 = 18;
/// Bar width in pixels.
const BAR_WIDTH: u32 = 16;

impl MapCanvas {
    /// Draw the colorbar in the right margin with `unit_label` alongside.
    ///
    /// The bar spans the plot height and samples the same ramp and range the
    /// mesh was colored with, so it must run after the mesh pass. Returns
    /// [`RenderError::NoValidData`] when no range has been established and
    /// [`RenderError::Canvas`] when the right margin cannot fit the bar.
    pub fn draw_colorbar(&mut self, unit_label: &str) -> RenderResult<()> {
        // The bar plus its offset must fit inside the right margin.
        if self.style.margin_right < BAR_OFFSET + BAR_WIDTH {
            return Err(RenderError::Canvas(format!(
                "right margin {} cannot fit the colorbar, need at least {}",
                self.style.margin_right,
                BAR_OFFSET + BAR_WIDTH
            )));
        }

        let (min, max) = self.scale_range.ok_or(RenderError::NoValidData)?;

        let bar_x = self.style.margin_left + self.style.plot_width + BAR_OFFSET;
        let bar_top = self.style.margin_top;
        let bar_height = self.style.plot_height;

        // Gradient fill, maximum at the top.
        for dy in 0..bar_height {
            let t = if bar_height > 1 {
                1.0 - dy as f32 / (bar_height - 1) as f32
            } else {
                1.0
            };
            let color = self.ramp.sample(t);
            for dx in 0..BAR_WIDTH {
                self.base.put_pixel(bar_x + dx, bar_top + dy, color);
            }
        }

        self.stroke_bar_outline(bar_x, bar_top, BAR_WIDTH, bar_height);

        // Ticks at both ends plus the midpoint; a flat range gets one tick.
        let range = max - min;
        let ticks: Vec<f64> = if range > 0.0 {
            vec![min, min + range / 2.0, max]
        } else {
            vec![min]
        };

        let size = self.style.label_font_size;
        for &value in &ticks {
            let frac = if range > 0.0 { (value - min) / range } else { 0.0 };
            let y = bar_top as f32 + (1.0 - frac as f32) * bar_height.saturating_sub(1) as f32;

            self.stroke_tick_mark((bar_x + BAR_WIDTH) as f32, y);
            text::draw_label(
                &mut self.base,
                &self.font,
                size,
                Rgba([0, 0, 0, 255]),
                (bar_x + BAR_WIDTH + 7) as i32,
                (y - size * 0.4) as i32,
                &format_tick(value),
            );
        }

        self.draw_unit_label(unit_label, bar_top, bar_height);

        debug!(min, max, ticks = ticks.len(), "drew colorbar");
        Ok(())
    }

    /// Unit caption reading bottom to top beside the tick labels.
    fn draw_unit_label(&mut self, unit_label: &str, bar_top: u32, bar_height: u32) {
        let size = self.style.label_font_size;
        let strip_width = text::text_width(&self.font, size, unit_label).ceil() as u32 + 2;
        let strip_height = (size * 1.4).ceil() as u32;

        let mut strip = RgbaImage::from_pixel(strip_width, strip_height, Rgba([0, 0, 0, 0]));
        text::draw_label(
            &mut strip,
            &self.font,
            size,
            Rgba([0, 0, 0, 255]),
            1,
            1,
            unit_label,
        );
        let rotated = imageops::rotate270(&strip);

        let x = self.width() as i64 - rotated.width() as i64 - 6;
        let y = bar_top as i64 + (bar_height as i64 - rotated.height() as i64) / 2;
        imageops::overlay(&mut self.base, &rotated, x, y);
    }

    /// Crisp single-pixel outline just outside the bar.
    fn stroke_bar_outline(&mut self, bar_x: u32, bar_top: u32, width: u32, height: u32) {
        let x0 = bar_x as f32 - 0.5;
        let y0 = bar_top as f32 - 0.5;
        let x1 = (bar_x + width) as f32 + 0.5;
        let y1 = (bar_top + height) as f32 + 0.5;

        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        pb.line_to(x1, y0);
        pb.line_to(x1, y1);
        pb.line_to(x0, y1);
        pb.close();

        if let Some(path) = pb.finish() {
            let mut paint = Paint::default();
            paint.set_color_rgba8(0, 0, 0, 255);
            paint.anti_alias = false;

            let stroke = Stroke {
                width: 1.0,
                ..Stroke::default()
            };
            self.overlay
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    fn stroke_tick_mark(&mut self, x: f32, y: f32) {
        let mut pb = PathBuilder::new();
        pb.move_to(x + 1.0, y);
        pb.line_to(x + 5.0, y);

        if let Some(path) = pb.finish() {
            let mut paint = Paint::default();
            paint.set_color_rgba8(0, 0, 0, 255);
            paint.anti_alias = true;

            let stroke = Stroke {
                width: 1.0,
                ..Stroke::default()
            };
            self.overlay
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}

/// Tick label formatting: plain decimals in a comfortable window,
/// scientific notation outside it.
fn format_tick(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if (0.01..10_000.0).contains(&value.abs()) {
        format!("{:.2}", value)
    } else {
        format!("{:.2e}", value)
    }
}
