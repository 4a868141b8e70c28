//! Value-to-color mapping for the data mesh and colorbar.

use colorgrad::Gradient;
use image::Rgba;

/// A continuous color ramp over normalized [0, 1].
pub struct ColorRamp {
    gradient: Box<dyn Gradient>,
}

impl ColorRamp {
    /// The viridis perceptual ramp.
    pub fn viridis() -> Self {
        Self {
            gradient: Box::new(colorgrad::preset::viridis()),
        }
    }

    /// Color for `value` normalized against `[min, max]`.
    ///
    /// The range test is a strict `> 0.0` rather than an epsilon: trace-gas
    /// fields have legitimate ranges around 1e-7, which an absolute epsilon
    /// would flatten to a single color. A degenerate range maps everything
    /// to the low end of the ramp.
    pub fn color_at(&self, value: f64, min: f64, max: f64) -> Rgba<u8> {
        let range = max - min;
        let t = if range > 0.0 {
            ((value - min) / range).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.sample(t as f32)
    }

    /// Color at normalized position `t` in [0, 1].
    pub fn sample(&self, t: f32) -> Rgba<u8> {
        Rgba(self.gradient.at(t.clamp(0.0, 1.0)).to_rgba8())
    }
}
