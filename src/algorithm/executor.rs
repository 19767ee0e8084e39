//! Pipeline execution: admission control and stage sequencing
//!
//! One `generate` call runs the full pipeline synchronously: validation,
//! image sampling, edge detection, topology carving, guided pathfinding,
//! and rendering. Admission control rejects oversized requests before any
//! grid is allocated, because there is no mid-flight cancellation. Each
//! stage consumes its input buffer and returns an owned output, so
//! intermediate buffers are released as soon as the next stage finishes.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info};

use crate::algorithm::{pathfinding, topology};
use crate::analysis::{edges, sampler};
use crate::io::configuration::{
    DEFAULT_MEMORY_BUDGET, ESTIMATED_BYTES_PER_CELL, MAX_DIMENSION, MAX_TOTAL_CELLS,
    MEMORY_BUDGET_FRACTION, MEMORY_SAFETY_FACTOR, MIN_DIMENSION,
};
use crate::io::error::{MazeError, Result};
use crate::io::render::{self, MazeMetadata};
use crate::io::store::{ImageHandle, ImageStore};
use crate::spatial::grid::CellState;

/// Wall-clock source for metadata timestamps
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> u64;
}

/// System wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as u64)
    }
}

/// Parameters governing admission control
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Memory budget the pre-flight estimate is checked against
    pub memory_budget: usize,
    /// Fraction of the budget a single request may consume
    pub memory_fraction: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            memory_budget: DEFAULT_MEMORY_BUDGET,
            memory_fraction: MEMORY_BUDGET_FRACTION,
        }
    }
}

/// A maze generation request
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Handle of a previously stored image
    pub handle: ImageHandle,
    /// Maze width in cells
    pub width: usize,
    /// Maze height in cells
    pub height: usize,
}

impl GenerationRequest {
    /// Total cell count of the requested maze
    pub const fn total_cells(&self) -> usize {
        self.width * self.height
    }
}

/// Successful generation output: rendered text plus metadata
#[derive(Debug, Clone)]
pub struct MazeArtifact {
    /// The maze serialized as newline-joined rows
    pub text: String,
    /// Dimensions, counts, difficulty, and timestamp
    pub metadata: MazeMetadata,
}

/// End-to-end generation pipeline over a shared image store
pub struct Pipeline {
    store: Arc<ImageStore>,
    config: PipelineConfig,
    clock: Box<dyn Clock>,
}

impl Pipeline {
    /// Create a pipeline with default admission limits and the system clock
    pub fn new(store: Arc<ImageStore>) -> Self {
        Self::with_config(store, PipelineConfig::default())
    }

    /// Create a pipeline with explicit admission limits
    pub fn with_config(store: Arc<ImageStore>, config: PipelineConfig) -> Self {
        Self {
            store,
            config,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the clock used for metadata timestamps
    #[must_use]
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Generate a maze for the request using the given random seed
    ///
    /// Identical seed and identical stored image bytes produce
    /// byte-identical rendered text.
    ///
    /// # Errors
    ///
    /// Returns a typed error for every failure mode: `InvalidDimensions`,
    /// `SizeExceeded`, or `InsufficientMemory` from admission control,
    /// `ImageNotFound` for an unresolvable handle, `Decode` for
    /// unreadable bytes, and `ResourceExhausted` if a stage allocation
    /// fails mid-pipeline.
    pub fn generate(&self, request: &GenerationRequest, seed: u64) -> Result<MazeArtifact> {
        self.validate(request)?;

        let bytes = self
            .store
            .fetch(&request.handle)
            .ok_or_else(|| MazeError::ImageNotFound {
                handle: request.handle.to_string(),
            })?;

        let mut rng = StdRng::seed_from_u64(seed);

        let brightness = sampler::sample(&bytes, request.width, request.height)?;
        let detection = edges::detect(brightness, &mut rng)?;
        let edge_cells = detection.mask.count();
        debug!(tier = ?detection.tier, edge_cells, "edge detection complete");

        let mut maze = topology::generate(request.width, request.height, &mut rng)?;
        let (entry, exit) = (maze.entry(), maze.exit());
        maze.set_state(entry, CellState::Entry);
        maze.set_state(exit, CellState::Exit);

        let path = pathfinding::find_path(&mut maze, &detection.mask, entry, exit);
        if path.is_empty() {
            // Unreachable while the direct-line fallback exists.
            error!(
                width = request.width,
                height = request.height,
                "pathfinding returned an empty path"
            );
            return Err(MazeError::PathfindingFailure {
                width: request.width,
                height: request.height,
            });
        }

        let (text, metadata) = render::render(maze, &path, edge_cells, self.clock.now_millis())?;

        info!(
            width = metadata.width,
            height = metadata.height,
            solution_length = metadata.solution_length,
            difficulty = %metadata.difficulty,
            "maze generated"
        );
        Ok(MazeArtifact { text, metadata })
    }

    // Admission control: every check runs before any grid is allocated.
    fn validate(&self, request: &GenerationRequest) -> Result<()> {
        for (axis, value) in [("width", request.width), ("height", request.height)] {
            if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
                return Err(MazeError::InvalidDimensions { axis, value });
            }
        }

        let cells = request.total_cells();
        if cells > MAX_TOTAL_CELLS {
            return Err(MazeError::SizeExceeded { cells });
        }

        let estimated = cells * ESTIMATED_BYTES_PER_CELL * MEMORY_SAFETY_FACTOR;
        let allowed = (self.config.memory_budget as f64 * self.config.memory_fraction) as usize;
        if estimated > allowed {
            return Err(MazeError::InsufficientMemory { estimated, allowed });
        }

        debug!(cells, estimated, allowed, "request admitted");
        Ok(())
    }
}
