//! Image-guided maze generation with contour-tracing solution paths
//!
//! The pipeline samples a raster image into a brightness grid, derives a
//! boundary mask through escalating detection tiers, carves a fully
//! connected maze topology, and finds an entry-to-exit path biased to
//! follow the detected contours. The result is a fixed-width character
//! maze whose solution traces the shapes in the source image.

#![forbid(unsafe_code)]

/// Maze topology carving, guided pathfinding, and pipeline execution
pub mod algorithm;
/// Image sampling and boundary detection
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for resampling
pub mod math;
/// Spatial primitives: coordinates, grid state, cell bitsets
pub mod spatial;

pub use io::error::{MazeError, Result};
