//! Pipeline constants and runtime configuration defaults

// Admission limits
/// Inclusive minimum maze dimension per axis
pub const MIN_DIMENSION: usize = 10;
/// Inclusive maximum maze dimension per axis
pub const MAX_DIMENSION: usize = 200;
/// Hard admission ceiling on total cell count
pub const MAX_TOTAL_CELLS: usize = 10_000;

// Memory estimate: grid cells + edge mask + path nodes + text buffer
/// Estimated bytes per cell across all intermediate buffers
pub const ESTIMATED_BYTES_PER_CELL: usize = 2 + 1 + 24 + 2;
/// Safety multiplier applied to the per-cell estimate
pub const MEMORY_SAFETY_FACTOR: usize = 2;
/// Fraction of the configured budget a single request may consume
pub const MEMORY_BUDGET_FRACTION: f64 = 0.8;
/// Default memory budget for admission control (64 MiB)
pub const DEFAULT_MEMORY_BUDGET: usize = 64 * 1024 * 1024;

// Edge detection
/// Minimum Tier-1 edge density before escalating to Tier 2
pub const MIN_EDGE_DENSITY: f64 = 0.02;
/// Absolute edge-count floor before synthesizing a Tier-3 mask
pub const MIN_EDGE_CELLS: usize = 10;
/// Gradient threshold when 5x5 local contrast exceeds 100
pub const THRESHOLD_HIGH_CONTRAST: i32 = 40;
/// Gradient threshold when 5x5 local contrast exceeds 50
pub const THRESHOLD_MEDIUM_CONTRAST: i32 = 25;
/// Gradient threshold for flat local neighborhoods
pub const THRESHOLD_LOW_CONTRAST: i32 = 15;
/// Local contrast above which the high gradient threshold applies
pub const HIGH_LOCAL_CONTRAST: i32 = 100;
/// Local contrast above which the medium gradient threshold applies
pub const MEDIUM_LOCAL_CONTRAST: i32 = 50;
/// Fixed difference threshold for Tier-2 8-neighbor detection
pub const MAX_DIFFERENCE_THRESHOLD: i32 = 10;
/// Upper bound on Tier-3 random scatter cells
pub const MAX_SCATTER_CELLS: usize = 20;
/// Cells per Tier-3 scatter cell, scaling scatter down on small grids
pub const SCATTER_CELL_DIVISOR: usize = 50;
/// Brightness contrast range below which a low-contrast warning is logged
pub const LOW_CONTRAST_WARNING_RANGE: i32 = 50;

// Topology generation
/// Cells per relaxation candidate
pub const RELAXATION_CELL_DIVISOR: usize = 50;
/// Upper bound on relaxation candidates
pub const MAX_RELAXATION_CANDIDATES: usize = 20;
/// Probability that an eligible relaxation candidate is opened
pub const RELAXATION_PROBABILITY: f64 = 0.3;

// Pathfinding
/// Base cost of one path step
pub const STEP_COST: f64 = 1.0;
/// Cost reduction for stepping onto a detected edge cell
pub const EDGE_TRAVERSAL_BONUS: f64 = 0.8;

// Difficulty classification
/// Cell count ceiling for an Easy rating
pub const EASY_CELL_LIMIT: usize = 500;
/// Solution-to-cells ratio ceiling for an Easy rating
pub const EASY_RATIO_LIMIT: f64 = 0.3;
/// Cell count ceiling for a Medium rating
pub const MEDIUM_CELL_LIMIT: usize = 1000;
/// Solution-to-cells ratio ceiling for a Medium rating
pub const MEDIUM_RATIO_LIMIT: f64 = 0.5;
/// Cell count ceiling for a Hard rating
pub const HARD_CELL_LIMIT: usize = 2000;
/// Solution-to-cells ratio ceiling for a Hard rating
pub const HARD_RATIO_LIMIT: f64 = 0.7;

// Rendering characters
/// Wall cell
pub const WALL_CHAR: char = '█';
/// Open cell
pub const OPEN_CHAR: char = ' ';
/// Entry marker
pub const ENTRY_CHAR: char = 'S';
/// Exit marker
pub const EXIT_CHAR: char = 'E';
/// Solution path cell
pub const SOLUTION_CHAR: char = '.';

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default maze width in cells
pub const DEFAULT_MAZE_WIDTH: usize = 50;
/// Default maze height in cells
pub const DEFAULT_MAZE_HEIGHT: usize = 50;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_maze";
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
