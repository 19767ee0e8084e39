//! Maze grid state and cell classification
//!
//! The grid is a dense rectangular array of cell states with a fixed entry
//! at (1, 1) and a fixed exit at (width-2, height-2). The outer ring is
//! always wall; generation and pathfinding only ever mutate interior cells.

use ndarray::Array2;

use crate::io::error::{MazeError, Result};
use crate::spatial::coord::Coord;

/// Classification of a single maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Impassable cell
    Wall,
    /// Carved, traversable cell
    Open,
    /// The fixed entry marker
    Entry,
    /// The fixed exit marker
    Exit,
    /// Open cell overlaid by the rendered solution path
    Solution,
}

impl CellState {
    /// Whether a path may traverse this cell
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Dense rectangular grid of [`CellState`] cells
#[derive(Debug, Clone)]
pub struct MazeGrid {
    cells: Array2<CellState>,
}

impl MazeGrid {
    /// Create a grid of the given dimensions with every cell `Wall`
    ///
    /// Backing storage is reserved fallibly so an allocation failure
    /// surfaces as a typed error instead of aborting the process.
    ///
    /// # Errors
    ///
    /// Returns `ResourceExhausted` if the backing buffer cannot be
    /// allocated or shaped.
    pub fn filled_with_walls(width: usize, height: usize) -> Result<Self> {
        let len = width * height;
        let mut backing = Vec::new();
        backing
            .try_reserve_exact(len)
            .map_err(|_| MazeError::ResourceExhausted {
                operation: "maze grid allocation",
            })?;
        backing.resize(len, CellState::Wall);

        let cells = Array2::from_shape_vec((height, width), backing).map_err(|_| {
            MazeError::ResourceExhausted {
                operation: "maze grid shaping",
            }
        })?;

        Ok(Self { cells })
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total cell count
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    /// The fixed entry coordinate (1, 1)
    pub const fn entry(&self) -> Coord {
        Coord::new(1, 1)
    }

    /// The fixed exit coordinate (width-2, height-2)
    pub fn exit(&self) -> Coord {
        Coord::new(self.width() as i32 - 2, self.height() as i32 - 2)
    }

    /// Whether a coordinate lies within the grid
    pub fn contains(&self, cell: Coord) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width()
            && (cell.y as usize) < self.height()
    }

    /// Whether a coordinate lies strictly inside the outer wall ring
    pub fn interior_contains(&self, cell: Coord) -> bool {
        cell.x >= 1
            && cell.y >= 1
            && (cell.x as usize) + 1 < self.width()
            && (cell.y as usize) + 1 < self.height()
    }

    /// State of the cell at the coordinate, or `None` out of bounds
    pub fn state(&self, cell: Coord) -> Option<CellState> {
        if !self.contains(cell) {
            return None;
        }
        self.cells.get((cell.y as usize, cell.x as usize)).copied()
    }

    /// Overwrite the state of an in-bounds cell; out-of-bounds writes are ignored
    pub fn set_state(&mut self, cell: Coord, state: CellState) {
        if !self.contains(cell) {
            return;
        }
        if let Some(slot) = self.cells.get_mut((cell.y as usize, cell.x as usize)) {
            *slot = state;
        }
    }

    /// Whether a path may traverse the cell at the coordinate
    pub fn is_walkable(&self, cell: Coord) -> bool {
        self.state(cell).is_some_and(CellState::is_walkable)
    }

    /// Count cells currently holding the given state
    pub fn count_state(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Number of `Open` cells among the four axis-aligned neighbors
    pub fn open_neighbor_count(&self, cell: Coord) -> usize {
        cell.neighbors4()
            .iter()
            .filter(|&&neighbor| self.state(neighbor) == Some(CellState::Open))
            .count()
    }

    /// Force every cell on the outer ring back to `Wall`
    ///
    /// Idempotent; interior cells are untouched.
    pub fn force_outer_ring_walls(&mut self) {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return;
        }
        for x in 0..width {
            if let Some(slot) = self.cells.get_mut((0, x)) {
                *slot = CellState::Wall;
            }
            if let Some(slot) = self.cells.get_mut((height - 1, x)) {
                *slot = CellState::Wall;
            }
        }
        for y in 0..height {
            if let Some(slot) = self.cells.get_mut((y, 0)) {
                *slot = CellState::Wall;
            }
            if let Some(slot) = self.cells.get_mut((y, width - 1)) {
                *slot = CellState::Wall;
            }
        }
    }
}
