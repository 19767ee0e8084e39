//! Multi-tier boundary detection over brightness grids
//!
//! Detection never fails: an adaptive gradient pass is escalated to an
//! 8-neighbor maximum-difference pass when edge density falls below 2%,
//! and a synthetic mask is substituted when fewer than ten edge cells
//! survive. Each tier is a standalone function so escalation behavior is
//! observable and each pass is independently testable.

use ndarray::Array2;
use rand::Rng;
use tracing::{debug, warn};

use crate::analysis::sampler::BrightnessGrid;
use crate::io::configuration::{
    HIGH_LOCAL_CONTRAST, MAX_DIFFERENCE_THRESHOLD, MAX_SCATTER_CELLS, MEDIUM_LOCAL_CONTRAST,
    MIN_EDGE_CELLS, MIN_EDGE_DENSITY, SCATTER_CELL_DIVISOR, THRESHOLD_HIGH_CONTRAST,
    THRESHOLD_LOW_CONTRAST, THRESHOLD_MEDIUM_CONTRAST,
};
use crate::io::error::{MazeError, Result};
use crate::spatial::coord::Coord;

/// Boolean mask marking cells judged to lie on an object boundary
#[derive(Debug, Clone)]
pub struct EdgeMask {
    data: Array2<bool>,
}

impl EdgeMask {
    /// Create a mask of the given dimensions with no edges marked
    ///
    /// # Errors
    ///
    /// Returns `ResourceExhausted` if the backing buffer cannot be
    /// allocated.
    pub fn empty(width: usize, height: usize) -> Result<Self> {
        let len = width * height;
        let mut backing = Vec::new();
        backing
            .try_reserve_exact(len)
            .map_err(|_| MazeError::ResourceExhausted {
                operation: "edge mask allocation",
            })?;
        backing.resize(len, false);

        let data = Array2::from_shape_vec((height, width), backing).map_err(|_| {
            MazeError::ResourceExhausted {
                operation: "edge mask shaping",
            }
        })?;
        Ok(Self { data })
    }

    /// Mask width in cells
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    /// Mask height in cells
    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Mark the cell at the coordinate as an edge; out-of-bounds is ignored
    pub fn set_edge(&mut self, cell: Coord) {
        if cell.x < 0 || cell.y < 0 {
            return;
        }
        if let Some(slot) = self.data.get_mut((cell.y as usize, cell.x as usize)) {
            *slot = true;
        }
    }

    /// Whether the cell at the coordinate is marked as an edge
    pub fn is_edge(&self, cell: Coord) -> bool {
        if cell.x < 0 || cell.y < 0 {
            return false;
        }
        self.data
            .get((cell.y as usize, cell.x as usize))
            .copied()
            .unwrap_or(false)
    }

    /// Number of marked edge cells
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&edge| edge).count()
    }

    /// Marked cells as a fraction of all cells
    pub fn density(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.count() as f64 / self.data.len() as f64
    }
}

/// Which detection pass produced a mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionTier {
    /// Tier 1: gradient magnitude against an adaptive local threshold
    AdaptiveGradient,
    /// Tier 2: maximum absolute difference to any of the 8 neighbors
    MaxDifference,
    /// Tier 3: synthesized cross pattern with random scatter
    Synthetic,
}

/// An edge mask tagged with the tier that produced it
#[derive(Debug)]
pub struct EdgeDetection {
    /// The detected (or synthesized) mask
    pub mask: EdgeMask,
    /// The pass that produced the mask
    pub tier: DetectionTier,
}

/// Detect boundary cells, escalating through tiers until enough signal exists
///
/// Consumes the brightness grid; it is not needed once the mask exists.
/// Deterministic given identical grid content and rng state.
///
/// # Errors
///
/// Returns `ResourceExhausted` if a mask buffer cannot be allocated.
pub fn detect<R: Rng>(grid: BrightnessGrid, rng: &mut R) -> Result<EdgeDetection> {
    let mut mask = adaptive_gradient_mask(&grid)?;
    let mut tier = DetectionTier::AdaptiveGradient;

    if mask.density() < MIN_EDGE_DENSITY {
        debug!(
            count = mask.count(),
            density = mask.density(),
            "gradient edge density below floor, escalating to max-difference"
        );
        mask = max_difference_mask(&grid)?;
        tier = DetectionTier::MaxDifference;
    }

    if mask.count() < MIN_EDGE_CELLS {
        warn!(
            count = mask.count(),
            "too few detected edges, synthesizing fallback mask"
        );
        mask = synthetic_mask(grid.width(), grid.height(), rng)?;
        tier = DetectionTier::Synthetic;
    }

    debug!(tier = ?tier, count = mask.count(), "edge mask ready");
    Ok(EdgeDetection { mask, tier })
}

/// Tier 1: 4-neighbor gradient magnitude against an adaptive threshold
///
/// The threshold for each interior cell derives from the 5x5 local
/// contrast: high-contrast neighborhoods demand a stronger gradient so
/// texture noise is not marked as boundary.
///
/// # Errors
///
/// Returns `ResourceExhausted` if the mask buffer cannot be allocated.
pub fn adaptive_gradient_mask(grid: &BrightnessGrid) -> Result<EdgeMask> {
    let (width, height) = (grid.width(), grid.height());
    let mut mask = EdgeMask::empty(width, height)?;

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let left = brightness_at(grid, x as i32 - 1, y as i32);
            let right = brightness_at(grid, x as i32 + 1, y as i32);
            let top = brightness_at(grid, x as i32, y as i32 - 1);
            let bottom = brightness_at(grid, x as i32, y as i32 + 1);

            let magnitude = (right - left).abs() + (bottom - top).abs();
            if magnitude > adaptive_threshold(grid, x, y) {
                mask.set_edge(Coord::new(x as i32, y as i32));
            }
        }
    }

    Ok(mask)
}

/// Tier 2: maximum absolute difference to any of the 8 neighbors
///
/// A fixed low threshold recovers boundaries in images whose gradients
/// are too gentle for the adaptive pass.
///
/// # Errors
///
/// Returns `ResourceExhausted` if the mask buffer cannot be allocated.
pub fn max_difference_mask(grid: &BrightnessGrid) -> Result<EdgeMask> {
    let (width, height) = (grid.width(), grid.height());
    let mut mask = EdgeMask::empty(width, height)?;

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let center = brightness_at(grid, x as i32, y as i32);

            let mut max_diff = 0;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let neighbor = grid
                        .get((x as i32 + dx) as usize, (y as i32 + dy) as usize)
                        .map(i32::from);
                    if let Some(neighbor) = neighbor {
                        max_diff = max_diff.max((center - neighbor).abs());
                    }
                }
            }

            if max_diff > MAX_DIFFERENCE_THRESHOLD {
                mask.set_edge(Coord::new(x as i32, y as i32));
            }
        }
    }

    Ok(mask)
}

/// Tier 3: deterministic cross pattern plus bounded random scatter
///
/// Guarantees the pathfinder some signal to bias toward even for blank
/// images: a horizontal and a vertical line spanning the inner half of
/// each axis, plus scattered cells drawn from the injected rng. Scatter
/// draws that land on an already-marked cell are retried (bounded) so
/// small grids still clear the edge-count floor.
///
/// # Errors
///
/// Returns `ResourceExhausted` if the mask buffer cannot be allocated.
pub fn synthetic_mask<R: Rng>(width: usize, height: usize, rng: &mut R) -> Result<EdgeMask> {
    let mut mask = EdgeMask::empty(width, height)?;

    let mid_y = (height / 2) as i32;
    for x in width / 4..(3 * width) / 4 {
        mask.set_edge(Coord::new(x as i32, mid_y));
    }

    let mid_x = (width / 2) as i32;
    for y in height / 4..(3 * height) / 4 {
        mask.set_edge(Coord::new(mid_x, y as i32));
    }

    if width < 3 || height < 3 {
        return Ok(mask);
    }

    let scatter = (width * height / SCATTER_CELL_DIVISOR).min(MAX_SCATTER_CELLS);
    let mut placed = 0;
    let mut attempts = 0;
    while placed < scatter && attempts < scatter * 10 {
        attempts += 1;
        let cell = Coord::new(
            rng.random_range(1..width as i32 - 1),
            rng.random_range(1..height as i32 - 1),
        );
        if !mask.is_edge(cell) {
            mask.set_edge(cell);
            placed += 1;
        }
    }

    Ok(mask)
}

fn brightness_at(grid: &BrightnessGrid, x: i32, y: i32) -> i32 {
    if x < 0 || y < 0 {
        return 0;
    }
    grid.get(x as usize, y as usize).map_or(0, i32::from)
}

// 5x5 neighborhood contrast, clamped at the grid borders
fn adaptive_threshold(grid: &BrightnessGrid, x: usize, y: usize) -> i32 {
    let mut min_bright = 255;
    let mut max_bright = 0;

    for dy in -2i32..=2 {
        for dx in -2i32..=2 {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if nx < 0 || ny < 0 {
                continue;
            }
            if let Some(value) = grid.get(nx as usize, ny as usize) {
                let value = i32::from(value);
                min_bright = min_bright.min(value);
                max_bright = max_bright.max(value);
            }
        }
    }

    let local_contrast = max_bright - min_bright;
    if local_contrast > HIGH_LOCAL_CONTRAST {
        THRESHOLD_HIGH_CONTRAST
    } else if local_contrast > MEDIUM_LOCAL_CONTRAST {
        THRESHOLD_MEDIUM_CONTRAST
    } else {
        THRESHOLD_LOW_CONTRAST
    }
}
