//! Mathematical utilities for the pipeline

/// Bilinear interpolation for raster resampling
pub mod interpolation;
