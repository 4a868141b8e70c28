//! Map figure rendering for gridded geophysical fields.
//!
//! Builds complete publication-style figures:
//! - Equirectangular color mesh of a 2-D field
//! - Coastline and dashed graticule overlays with edge labels
//! - Colorbar keyed to the mesh color scaling
//! - PNG encoding (indexed or RGBA, selected automatically)

pub mod canvas;
pub mod error;
pub mod png;
pub mod ramp;

mod coastline;
mod colorbar;
mod graticule;
mod mesh;
mod text;

pub use canvas::{CanvasStyle, MapCanvas};
pub use error::{RenderError, RenderResult};
pub use ramp::ColorRamp;
