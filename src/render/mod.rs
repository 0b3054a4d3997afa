//! CPU rasterization backend.

pub mod raster;
