//! One-shot plotting tool: an AIRS Level-3 granule in, a PNG map out.

pub mod config;
pub mod pipeline;
