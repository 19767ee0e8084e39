//! Text serialization of solved mazes with derived metadata

use tracing::debug;

use crate::io::configuration::{
    EASY_CELL_LIMIT, EASY_RATIO_LIMIT, ENTRY_CHAR, EXIT_CHAR, HARD_CELL_LIMIT, HARD_RATIO_LIMIT,
    MEDIUM_CELL_LIMIT, MEDIUM_RATIO_LIMIT, OPEN_CHAR, SOLUTION_CHAR, WALL_CHAR,
};
use crate::io::error::{MazeError, Result};
use crate::spatial::coord::Coord;
use crate::spatial::grid::{CellState, MazeGrid};

/// Difficulty rating derived from maze size and solution length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    /// Small maze with a short solution
    Easy,
    /// Moderate size or winding solution
    Medium,
    /// Large maze or long solution
    Hard,
    /// Everything beyond the Hard limits
    Expert,
}

impl Difficulty {
    /// Classify from total cell count and solution length
    pub fn classify(total_cells: usize, solution_length: usize) -> Self {
        let complexity = if total_cells == 0 {
            0.0
        } else {
            solution_length as f64 / total_cells as f64
        };

        if total_cells < EASY_CELL_LIMIT && complexity < EASY_RATIO_LIMIT {
            Self::Easy
        } else if total_cells < MEDIUM_CELL_LIMIT && complexity < MEDIUM_RATIO_LIMIT {
            Self::Medium
        } else if total_cells < HARD_CELL_LIMIT && complexity < HARD_RATIO_LIMIT {
            Self::Hard
        } else {
            Self::Expert
        }
    }

    /// Human-readable rating label
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata describing a rendered maze
#[derive(Debug, Clone)]
pub struct MazeMetadata {
    /// Maze width in cells
    pub width: usize,
    /// Maze height in cells
    pub height: usize,
    /// Number of edge cells the mask contributed
    pub edge_cells: usize,
    /// Number of cells on the solution path
    pub solution_length: usize,
    /// Derived difficulty rating
    pub difficulty: Difficulty,
    /// Milliseconds since the Unix epoch at generation time
    pub generated_at_ms: u64,
}

/// Overlay the solution path and serialize the maze row-major
///
/// Consumes the grid: only the rendered text and metadata outlive the
/// call. Open cells on the path become `Solution`; entry and exit markers
/// are never overwritten; a wall on the path (fallback strategies only)
/// is rendered as solution rather than left impassable. Rows are joined
/// with newlines and the last row carries no trailing newline.
///
/// # Errors
///
/// Returns `ResourceExhausted` if the text buffer cannot be allocated.
pub fn render(
    mut grid: MazeGrid,
    path: &[Coord],
    edge_cells: usize,
    generated_at_ms: u64,
) -> Result<(String, MazeMetadata)> {
    mark_solution_path(&mut grid, path);

    let (width, height) = (grid.width(), grid.height());
    let mut text = String::new();
    // Wall glyphs are three UTF-8 bytes; reserve for the worst case.
    text.try_reserve(height * (width * 3 + 1))
        .map_err(|_| MazeError::ResourceExhausted {
            operation: "text buffer allocation",
        })?;

    for y in 0..height {
        for x in 0..width {
            let state = grid
                .state(Coord::new(x as i32, y as i32))
                .unwrap_or(CellState::Wall);
            text.push(cell_char(state));
        }
        if y < height - 1 {
            text.push('\n');
        }
    }

    let metadata = MazeMetadata {
        width,
        height,
        edge_cells,
        solution_length: path.len(),
        difficulty: Difficulty::classify(width * height, path.len()),
        generated_at_ms,
    };

    debug!(
        width,
        height,
        solution_length = metadata.solution_length,
        difficulty = %metadata.difficulty,
        "maze rendered"
    );
    Ok((text, metadata))
}

fn mark_solution_path(grid: &mut MazeGrid, path: &[Coord]) {
    for &cell in path {
        match grid.state(cell) {
            Some(CellState::Open | CellState::Wall) => {
                grid.set_state(cell, CellState::Solution);
            }
            _ => {}
        }
    }
}

const fn cell_char(state: CellState) -> char {
    match state {
        CellState::Wall => WALL_CHAR,
        CellState::Open => OPEN_CHAR,
        CellState::Entry => ENTRY_CHAR,
        CellState::Exit => EXIT_CHAR,
        CellState::Solution => SOLUTION_CHAR,
    }
}
