//! Warren Grid Lattices
//!
//! 2-D point lattices arranged as ordered sequences of rings, the raw
//! material the maze engine partitions and carves.
//!
//! # Ring Model
//!
//! A grid is a `Vec` of rings, ordered from the centre outward. For a
//! square lattice the "rings" are simply the rows; for a hexagonal
//! lattice they are concentric hexagons of `6 * ring` points around a
//! single centre point.
//!
//! # Identity
//!
//! Every point carries a stable [`PointId`] (ring index + position within
//! the ring) assigned at construction. That key is the sole identity used
//! anywhere in the engine - there are no floating-point proximity
//! comparisons. Positions (`x`, `y`) exist purely for downstream
//! rendering.
//!
//! # Adjacency
//!
//! Physical adjacency is undirected: [`Grid::add_edge`] wires both
//! endpoints and refuses self-edges, so every neighbour list is
//! symmetric by construction.

mod hex;
mod point;
mod square;

pub use hex::build_hex;
pub use point::{Grid, Point, PointId};
pub use square::build_square;

use thiserror::Error;

/// Which lattice tiling to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GridKind {
    /// Row/column lattice; rings are rows.
    Square,
    /// Concentric hexagonal rings around a centre point.
    Hex,
}

impl std::fmt::Display for GridKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridKind::Square => write!(f, "square"),
            GridKind::Hex => write!(f, "hex"),
        }
    }
}

/// Errors raised while constructing a lattice.
#[derive(Debug, Error)]
pub enum GridError {
    /// The cell size must be a positive, finite length.
    #[error("cell size must be positive and finite, got {0}")]
    BadCellSize(f64),

    /// The requested bounds cannot fit a single cell.
    #[error("bounds {height}x{width} cannot fit any cell of size {cell_size}")]
    BoundsTooSmall {
        height: f64,
        width: f64,
        cell_size: f64,
    },
}

/// Build a grid of the given tiling within `height` x `width` bounds.
///
/// `cell_size` is the row/column pitch for square grids and the hexagon
/// side length for hex grids.
pub fn build_grid(
    kind: GridKind,
    height: f64,
    width: f64,
    cell_size: f64,
) -> Result<Grid, GridError> {
    match kind {
        GridKind::Square => build_square(height, width, cell_size),
        GridKind::Hex => build_hex(height, width, cell_size),
    }
}
