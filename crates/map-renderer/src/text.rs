//! Font loading and text drawing shared by the canvas modules.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{Font, Scale};

use crate::error::{RenderError, RenderResult};

/// Embedded font data - DejaVu Sans (a clean, readable sans-serif font)
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Load the embedded font.
pub(crate) fn load_font() -> RenderResult<Font<'static>> {
    Font::try_from_bytes(FONT_DATA)
        .ok_or_else(|| RenderError::Font("embedded DejaVu Sans failed to parse".to_string()))
}

/// Width of `text` in pixels at the given size, from glyph advance widths.
pub(crate) fn text_width(font: &Font<'_>, size: f32, text: &str) -> f32 {
    let scale = Scale::uniform(size);
    text.chars()
        .map(|c| font.glyph(c).scaled(scale).h_metrics().advance_width)
        .sum()
}

/// Draw a text run onto the image, skipping positions off the canvas.
pub(crate) fn draw_label(
    img: &mut RgbaImage,
    font: &Font<'_>,
    size: f32,
    color: Rgba<u8>,
    x: i32,
    y: i32,
    text: &str,
) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        draw_text_mut(img, color, x, y, Scale::uniform(size), font, text);
    }
}
