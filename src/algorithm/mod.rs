/// Pipeline execution with admission control
pub mod executor;
/// Edge-biased pathfinding with fallback strategies
pub mod pathfinding;
/// Randomized maze topology generation
pub mod topology;

pub use executor::{GenerationRequest, MazeArtifact, Pipeline, PipelineConfig};
