//! Spatial data structures and grid manipulation
//!
//! This module contains spatial-related functionality including:
//! - Cell coordinates and adjacency
//! - Maze grid state management
//! - Flat cell bitsets for search bookkeeping

/// Flat bitsets over grid cells
pub mod cellset;
/// Cell coordinates and adjacency helpers
pub mod coord;
/// Maze grid state management
pub mod grid;

pub use cellset::CellSet;
pub use coord::Coord;
pub use grid::{CellState, MazeGrid};
