//! Error types for map rendering operations.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Error types for map rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Geolocation grids and the data field disagree on shape
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Every cell of the field is masked, nothing to scale or draw
    #[error("no valid data cells to render")]
    NoValidData,

    /// Canvas allocation or compositing failed
    #[error("canvas error: {0}")]
    Canvas(String),

    /// The bundled font could not be loaded
    #[error("font error: {0}")]
    Font(String),

    /// PNG encoding failed
    #[error("PNG encoding error: {0}")]
    PngEncoding(String),

    /// The bundled coastline geometry could not be parsed
    #[error("coastline data error: {0}")]
    Coastline(#[from] serde_json::Error),
}
