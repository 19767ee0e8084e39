//! Input/output operations, configuration, and error handling

/// Command-line interface and batch file processing
pub mod cli;
/// Pipeline constants and configuration defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Batch progress reporting
pub mod progress;
/// Maze text serialization and metadata
pub mod render;
/// Concurrent in-memory image storage
pub mod store;
