//! The figure canvas: sizing, layering, projection, and final encoding.
//!
//! A [`MapCanvas`] is three stacked layers over one coordinate system:
//! - `base`: an RGBA raster holding the background, titles, and labels
//! - `mesh`: a vector layer the data quads are filled into
//! - `overlay`: a vector layer for coastlines, graticules, and frames
//!
//! Compositing order at encode time is base, then mesh, then overlay, so
//! line work always stays visible on top of the data, and text drawn into
//! the margins never collides with either.

use image::{Rgba, RgbaImage};
use rusttype::Font;
use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::error::{RenderError, RenderResult};
use crate::png;
use crate::ramp::ColorRamp;
use crate::text;

/// Figure geometry and type sizes, in pixels.
///
/// The plot area is `plot_width` x `plot_height`; margins around it hold
/// the title (top), latitude labels (left), longitude labels (bottom), and
/// the colorbar (right).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CanvasStyle {
    pub plot_width: u32,
    pub plot_height: u32,
    pub margin_left: u32,
    pub margin_right: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    /// Background color as RGBA.
    pub background: [u8; 4],
    pub title_font_size: f32,
    pub label_font_size: f32,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            plot_width: 1000,
            plot_height: 500,
            margin_left: 70,
            margin_right: 110,
            margin_top: 60,
            margin_bottom: 50,
            background: [255, 255, 255, 255],
            title_font_size: 14.0,
            label_font_size: 12.0,
        }
    }
}

impl CanvasStyle {
    /// Total figure width including margins.
    pub fn total_width(&self) -> u32 {
        self.margin_left + self.plot_width + self.margin_right
    }

    /// Total figure height including margins.
    pub fn total_height(&self) -> u32 {
        self.margin_top + self.plot_height + self.margin_bottom
    }
}

/// A map figure under construction.
///
/// Created by [`MapCanvas::global_equirectangular`], filled in by the
/// drawing methods, and consumed by [`MapCanvas::into_png`].
pub struct MapCanvas {
    pub(crate) style: CanvasStyle,
    pub(crate) lon_min: f64,
    pub(crate) lon_max: f64,
    pub(crate) lat_min: f64,
    pub(crate) lat_max: f64,
    pub(crate) base: RgbaImage,
    pub(crate) mesh: Pixmap,
    pub(crate) overlay: Pixmap,
    pub(crate) font: Font<'static>,
    pub(crate) ramp: ColorRamp,
    /// Set by the mesh pass; the colorbar reads it back.
    pub(crate) scale_range: Option<(f64, f64)>,
}

impl MapCanvas {
    /// A whole-globe equirectangular canvas spanning 180W..180E, 90S..90N.
    pub fn global_equirectangular(style: CanvasStyle) -> RenderResult<Self> {
        let width = style.total_width();
        let height = style.total_height();

        let base = RgbaImage::from_pixel(width, height, Rgba(style.background));
        let mesh = Pixmap::new(width, height)
            .ok_or_else(|| RenderError::Canvas("mesh layer allocation failed".to_string()))?;
        let overlay = Pixmap::new(width, height)
            .ok_or_else(|| RenderError::Canvas("overlay layer allocation failed".to_string()))?;

        let mut canvas = Self {
            style,
            lon_min: -180.0,
            lon_max: 180.0,
            lat_min: -90.0,
            lat_max: 90.0,
            base,
            mesh,
            overlay,
            font: text::load_font()?,
            ramp: ColorRamp::viridis(),
            scale_range: None,
        };
        canvas.stroke_plot_frame();
        Ok(canvas)
    }

    /// Total figure width in pixels.
    pub fn width(&self) -> u32 {
        self.base.width()
    }

    /// Total figure height in pixels.
    pub fn height(&self) -> u32 {
        self.base.height()
    }

    /// Data range established by the mesh pass, if it ran.
    pub fn scale_range(&self) -> Option<(f64, f64)> {
        self.scale_range
    }

    /// Project geographic coordinates to figure pixels.
    ///
    /// Longitude maps linearly across the plot width and latitude down the
    /// plot height, north at the top. Inputs outside the canvas bounds land
    /// outside the plot area rather than clamping.
    pub fn forward(&self, lon: f64, lat: f64) -> (f32, f32) {
        let x = self.style.margin_left as f64
            + (lon - self.lon_min) / (self.lon_max - self.lon_min) * self.style.plot_width as f64;
        let y = self.style.margin_top as f64
            + (self.lat_max - lat) / (self.lat_max - self.lat_min) * self.style.plot_height as f64;
        (x as f32, y as f32)
    }

    /// Draw the figure title centered over the plot area.
    ///
    /// Embedded `\n` splits the title across lines.
    pub fn draw_title(&mut self, title: &str) {
        let size = self.style.title_font_size;
        let line_height = (size * 1.3).ceil();

        for (i, line) in title.split('\n').enumerate() {
            let line_width = text::text_width(&self.font, size, line);
            let x = self.style.margin_left as f32
                + (self.style.plot_width as f32 - line_width) / 2.0;
            let y = 8.0 + i as f32 * line_height;
            text::draw_label(
                &mut self.base,
                &self.font,
                size,
                Rgba([0, 0, 0, 255]),
                x as i32,
                y as i32,
                line,
            );
        }
    }

    /// Flatten the layers and encode the figure as a PNG.
    pub fn into_png(mut self) -> RenderResult<Vec<u8>> {
        composite_pixmap(&mut self.base, &self.mesh);
        composite_pixmap(&mut self.base, &self.overlay);

        let width = self.base.width() as usize;
        let height = self.base.height() as usize;
        png::create_png_auto(self.base.as_raw(), width, height).map_err(RenderError::PngEncoding)
    }

    /// One-pixel frame around the plot area, on the overlay layer.
    fn stroke_plot_frame(&mut self) {
        let x0 = self.style.margin_left as f32 + 0.5;
        let y0 = self.style.margin_top as f32 + 0.5;
        let x1 = (self.style.margin_left + self.style.plot_width) as f32 - 0.5;
        let y1 = (self.style.margin_top + self.style.plot_height) as f32 - 0.5;

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
}

/// Source-over composite of a full-canvas vector layer onto the base raster.
fn composite_pixmap(base: &mut RgbaImage, layer: &Pixmap) {
    let src_data = layer.data();

    for (i, pixel) in base.pixels_mut().enumerate() {
        let src_idx = i * 4;
        let src_a = src_data[src_idx + 3];

        // Skip fully transparent pixels
        if src_a == 0 {
            continue;
        }

        let src_r = src_data[src_idx];
        let src_g = src_data[src_idx + 1];
        let src_b = src_data[src_idx + 2];

        let dst_r = pixel.0[0];
        let dst_g = pixel.0[1];
        let dst_b = pixel.0[2];
        let dst_a = pixel.0[3];

        let src_a_f = src_a as f32 / 255.0;
        let dst_a_f = dst_a as f32 / 255.0;

        let out_a = src_a_f + dst_a_f * (1.0 - src_a_f);
        if out_a > 0.0 {
            let out_r =
                ((src_r as f32 * src_a_f + dst_r as f32 * dst_a_f * (1.0 - src_a_f)) / out_a) as u8;
            let out_g =
                ((src_g as f32 * src_a_f + dst_g as f32 * dst_a_f * (1.0 - src_a_f)) / out_a) as u8;
            let out_b =
                ((src_b as f32 * src_a_f + dst_b as f32 * dst_a_f * (1.0 - src_a_f)) / out_a) as u8;

            *pixel = Rgba([out_r, out_g, out_b, (out_a * 255.0) as u8]);
        }
    }
}
