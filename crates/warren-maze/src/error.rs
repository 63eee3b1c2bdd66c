//! Error types for warren-maze.
//!
//! Only configuration mistakes are errors; graph-consistency findings go
//! through [`crate::validate`] as a structured report, and degenerate
//! geometry (empty boundaries, single-point rings) is skipped silently.

use thiserror::Error;

/// Result type for warren-maze operations.
pub type Result<T> = std::result::Result<T, MazeError>;

/// Fatal configuration errors, surfaced immediately and never retried.
#[derive(Debug, Error)]
pub enum MazeError {
    /// The grid has no points to partition.
    #[error("grid has no points")]
    EmptyGrid,

    /// The configuration declares no layers.
    #[error("maze configuration declares no layers")]
    NoLayers,

    /// A proportional weight must be positive and finite.
    #[error("{context} weight must be positive and finite, got {weight}")]
    BadWeight {
        weight: f64,
        context: &'static str,
    },

    /// Each slice needs exactly one width weight.
    #[error("layer {layer} declares {slices} slices but {weights} slice weights")]
    SliceWeightMismatch {
        layer: usize,
        slices: usize,
        weights: usize,
    },

    /// The requested start position does not exist in the grid.
    #[error("start position ({row}, {col}) is outside the grid")]
    StartOutOfBounds { row: usize, col: usize },
}
