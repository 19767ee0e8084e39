//! Error types for maze generation operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum MazeError {
    /// Source bytes are not a supported raster format
    Decode {
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Image handle does not resolve to stored bytes
    ImageNotFound {
        /// The unresolvable handle
        handle: String,
    },

    /// A requested dimension lies outside the accepted range
    InvalidDimensions {
        /// Which axis failed validation
        axis: &'static str,
        /// Provided value that failed validation
        value: usize,
    },

    /// Requested cell count exceeds the hard admission ceiling
    SizeExceeded {
        /// Total requested cells
        cells: usize,
    },

    /// Pre-flight memory estimate exceeds the configured budget
    InsufficientMemory {
        /// Estimated bytes for the request
        estimated: usize,
        /// Maximum bytes a request may consume
        allowed: usize,
    },

    /// Runtime allocation failure during a pipeline stage
    ResourceExhausted {
        /// Allocation that failed
        operation: &'static str,
    },

    /// Pathfinding produced no path despite the fallback tiers
    ///
    /// Reserved: unreachable while the direct-line fallback exists.
    /// Surfaced instead of panicking if the invariant is ever broken.
    PathfindingFailure {
        /// Grid width when the failure occurred
        width: usize,
        /// Grid height when the failure occurred
        height: usize,
    },

    /// Failed to load a source image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// CLI target is not a processable file or directory
    InvalidTarget {
        /// Description of what's wrong with the target
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl MazeError {
    /// Stable machine-readable kind for this error
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Decode { .. } => "decode_error",
            Self::ImageNotFound { .. } => "image_not_found",
            Self::InvalidDimensions { .. } => "invalid_dimensions",
            Self::SizeExceeded { .. } => "size_exceeded",
            Self::InsufficientMemory { .. } => "insufficient_memory",
            Self::ResourceExhausted { .. } => "resource_exhausted",
            Self::PathfindingFailure { .. } => "pathfinding_failure",
            Self::ImageLoad { .. } => "image_load",
            Self::InvalidTarget { .. } => "invalid_target",
            Self::FileSystem { .. } => "file_system",
        }
    }
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode { source } => {
                write!(f, "Failed to decode image bytes: {source}")
            }
            Self::ImageNotFound { handle } => {
                write!(f, "Image not found: {handle}")
            }
            Self::InvalidDimensions { axis, value } => {
                write!(f, "Maze {axis} must be between 10 and 200, got {value}")
            }
            Self::SizeExceeded { cells } => {
                write!(f, "Maze size too large: {cells} cells exceeds the 10000 cell limit")
            }
            Self::InsufficientMemory { estimated, allowed } => {
                write!(
                    f,
                    "Not enough memory for maze of this size: estimated {estimated} bytes, allowed {allowed}"
                )
            }
            Self::ResourceExhausted { operation } => {
                write!(f, "Allocation failed during {operation}")
            }
            Self::PathfindingFailure { width, height } => {
                write!(f, "No solution path found for {width}x{height} maze")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidTarget { reason } => {
                write!(f, "Invalid target: {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source } | Self::ImageLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<image::ImageError> for MazeError {
    fn from(err: image::ImageError) -> Self {
        Self::Decode { source: err }
    }
}

impl From<std::io::Error> for MazeError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, MazeError>;

/// Create an invalid target error
pub fn invalid_target(reason: &impl ToString) -> MazeError {
    MazeError::InvalidTarget {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_stable() {
        let err = MazeError::SizeExceeded { cells: 40_000 };
        assert_eq!(err.kind(), "size_exceeded");
        assert!(err.to_string().contains("40000"));

        let err = MazeError::ImageNotFound {
            handle: "img-0000002a".to_string(),
        };
        assert_eq!(err.kind(), "image_not_found");
        assert!(err.to_string().contains("img-0000002a"));
    }

    #[test]
    fn test_io_error_conversion_defaults_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = MazeError::from(io_err);
        match err {
            MazeError::FileSystem { path, .. } => {
                assert_eq!(path, PathBuf::from("<unknown>"));
            }
            _ => unreachable!("Expected FileSystem error type"),
        }
    }
}
