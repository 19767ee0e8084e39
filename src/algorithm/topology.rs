//! Randomized maze topology generation
//!
//! Carves a perfect maze with randomized backtracking on the odd half-step
//! lattice, then opens a bounded number of extra walls so the maze is not
//! all corridors and dead ends. The entry (1, 1) and exit
//! (width-2, height-2) are guaranteed open and attached to the carved
//! network before the grid is returned.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::io::configuration::{
    MAX_RELAXATION_CANDIDATES, RELAXATION_CELL_DIVISOR, RELAXATION_PROBABILITY,
};
use crate::io::error::Result;
use crate::spatial::coord::Coord;
use crate::spatial::grid::{CellState, MazeGrid};

// Lattice steps in north, east, south, west order; intermediate cells are
// carved at half step.
const LATTICE_DIRECTIONS: [(i32, i32); 4] = [(0, -2), (2, 0), (0, 2), (-2, 0)];

/// Generate a fully connected maze topology
///
/// Every cell starts as `Wall`; carving produces a single connected network
/// of `Open` cells that always includes the entry and exit. Identical rng
/// state yields an identical grid.
///
/// # Errors
///
/// Returns `ResourceExhausted` if the grid buffer cannot be allocated.
pub fn generate<R: Rng>(width: usize, height: usize, rng: &mut R) -> Result<MazeGrid> {
    let mut grid = MazeGrid::filled_with_walls(width, height)?;

    carve_passages(&mut grid, rng);
    relax_walls(&mut grid, rng);
    grid.force_outer_ring_walls();
    ensure_endpoint_access(&mut grid);

    debug!(
        width,
        height,
        open = grid.count_state(CellState::Open),
        "maze topology carved"
    );
    Ok(grid)
}

// One backtracker frame: a lattice cell and its shuffled direction order.
struct CarveFrame {
    cell: Coord,
    directions: [(i32, i32); 4],
    next: usize,
}

impl CarveFrame {
    fn new<R: Rng>(cell: Coord, rng: &mut R) -> Self {
        let mut directions = LATTICE_DIRECTIONS;
        directions.shuffle(rng);
        Self {
            cell,
            directions,
            next: 0,
        }
    }
}

/// Randomized backtracking carve over the odd half-step lattice
///
/// Equivalent to the recursive formulation (shuffle on entry, recurse per
/// unvisited lattice neighbor) but driven by an explicit stack so carving
/// depth never grows the call stack on large grids.
fn carve_passages<R: Rng>(grid: &mut MazeGrid, rng: &mut R) {
    let start = lattice_start(grid, rng);
    grid.set_state(start, CellState::Open);

    let mut stack = vec![CarveFrame::new(start, rng)];
    while let Some(frame) = stack.last_mut() {
        if frame.next >= frame.directions.len() {
            stack.pop();
            continue;
        }

        let (dx, dy) = frame.directions.get(frame.next).copied().unwrap_or((0, 0));
        frame.next += 1;

        let target = frame.cell.offset(dx, dy);
        if grid.interior_contains(target) && grid.state(target) == Some(CellState::Wall) {
            let between = frame.cell.offset(dx / 2, dy / 2);
            grid.set_state(between, CellState::Open);
            grid.set_state(target, CellState::Open);
            stack.push(CarveFrame::new(target, rng));
        }
    }
}

// Random odd-aligned interior cell to start carving from.
fn lattice_start<R: Rng>(grid: &MazeGrid, rng: &mut R) -> Coord {
    let odd_columns = (grid.width() as i32 - 1) / 2;
    let odd_rows = (grid.height() as i32 - 1) / 2;
    Coord::new(
        1 + 2 * rng.random_range(0..odd_columns.max(1)),
        1 + 2 * rng.random_range(0..odd_rows.max(1)),
    )
}

/// Open a bounded number of candidate walls to introduce controlled cycles
///
/// A candidate qualifies when it has two or three already-open 4-neighbors,
/// so opening it joins corridors without dissolving walls into open rooms.
fn relax_walls<R: Rng>(grid: &mut MazeGrid, rng: &mut R) {
    if grid.width() < 3 || grid.height() < 3 {
        return;
    }
    let candidates =
        (grid.width() * grid.height() / RELAXATION_CELL_DIVISOR).min(MAX_RELAXATION_CANDIDATES);

    let mut opened = 0usize;
    for _ in 0..candidates {
        let cell = Coord::new(
            rng.random_range(1..grid.width() as i32 - 1),
            rng.random_range(1..grid.height() as i32 - 1),
        );
        let gate = rng.random::<f64>() < RELAXATION_PROBABILITY;

        if gate
            && grid.state(cell) == Some(CellState::Wall)
            && (2..=3).contains(&grid.open_neighbor_count(cell))
        {
            grid.set_state(cell, CellState::Open);
            opened += 1;
        }
    }

    debug!(candidates, opened, "relaxation pass complete");
}

/// Make sure the fixed entry and exit are open and attached to the network
///
/// The backtracker only visits odd-aligned cells, so on even-sized grids
/// the exit cell may sit off the lattice; carving it and one neighbor
/// restores the reachability invariant.
fn ensure_endpoint_access(grid: &mut MazeGrid) {
    for endpoint in [grid.entry(), grid.exit()] {
        if grid.state(endpoint) == Some(CellState::Wall) {
            grid.set_state(endpoint, CellState::Open);
        }

        let interior: Vec<Coord> = endpoint
            .neighbors4()
            .into_iter()
            .filter(|&neighbor| grid.interior_contains(neighbor))
            .collect();

        let attached = interior
            .iter()
            .any(|&neighbor| grid.state(neighbor) == Some(CellState::Open));
        if !attached {
            if let Some(&neighbor) = interior.first() {
                grid.set_state(neighbor, CellState::Open);
            }
        }
    }
}
