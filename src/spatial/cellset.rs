//! Flat bitset over grid cells for visited and closed-set tracking

use bitvec::bitvec;
use bitvec::prelude::BitVec;

use crate::spatial::coord::Coord;
use crate::spatial::grid::MazeGrid;

/// Fixed-size bitset addressing cells of one maze grid
///
/// Cells are keyed by their row-major flat index, giving O(1) membership
/// testing without hashing during carving and search.
#[derive(Clone, Debug)]
pub struct CellSet {
    bits: BitVec,
    width: usize,
    height: usize,
}

impl CellSet {
    /// Create an empty set sized for the given grid
    pub fn for_grid(grid: &MazeGrid) -> Self {
        Self {
            bits: bitvec![0; grid.total_cells()],
            width: grid.width(),
            height: grid.height(),
        }
    }

    fn index_of(&self, cell: Coord) -> Option<usize> {
        if cell.x < 0
            || cell.y < 0
            || cell.x as usize >= self.width
            || cell.y as usize >= self.height
        {
            return None;
        }
        Some(cell.y as usize * self.width + cell.x as usize)
    }

    /// Insert a cell; out-of-bounds coordinates are ignored
    pub fn insert(&mut self, cell: Coord) {
        if let Some(index) = self.index_of(cell) {
            self.bits.set(index, true);
        }
    }

    /// Test cell membership
    pub fn contains(&self, cell: Coord) -> bool {
        self.index_of(cell)
            .is_some_and(|index| self.bits.get(index).as_deref() == Some(&true))
    }
}
