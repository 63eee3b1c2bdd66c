//! Warren Maze Engine
//!
//! Procedural maze generation layered onto a 2-D point grid. The grid's
//! concentric rings are partitioned into nested layers, slices and
//! fragments by proportional weights; each fragment selects "gate"
//! points on its boundaries, gates are stitched to neighbouring
//! fragments (with wraparound along the slice axis), and a per-fragment
//! carving algorithm grows traversal connections - all driven by one
//! seeded generator, so the same (grid, config, seed) triple always
//! produces the same maze.
//!
//! # Pipeline
//!
//! ```text
//! generate_outline -> select_gates -> resolve_adjacency -> carve_fragment*
//! ```
//!
//! [`generate_maze`] runs the whole pipeline and returns a
//! [`MazeResult`]; [`validate`] checks the result's graph invariants and
//! reports findings structurally.
//!
//! The engine is a pure, synchronous, single-threaded computation: no
//! I/O, no global state, no concurrency. Randomness is threaded
//! explicitly as a [`MazeRng`] value.

mod adjacency;
mod carve;
mod config;
mod direction;
mod error;
mod gates;
mod graph;
mod outline;
mod rng;
mod validate;

pub use adjacency::resolve_adjacency;
pub use carve::{carve_fragment, BRAID_LOOP_CHANCE, RUN_BIAS};
pub use config::{FragmentKind, FragmentSpec, LayerSpec, MazeConfig};
pub use direction::{Direction, DirectionMap};
pub use error::{MazeError, Result};
pub use gates::{select_gates, GATE_FRACTION};
pub use graph::{GraphNode, MazeGraph, NodeId};
pub use outline::{generate_outline, Fragment, Outline, OutlineLayer, OutlineSlice};
pub use rng::{random_seed, MazeRng, SEED_LEN};
pub use validate::{validate, ValidationReport, Violation};

use tracing::debug;
use warren_grid::{Grid, PointId};

/// The finished maze: everything a renderer or solver needs.
#[derive(Debug, Clone)]
pub struct MazeResult {
    /// The designated entry point.
    pub start: PointId,
    /// The fragment hierarchy the maze was carved through.
    pub outline: Outline,
    /// The traversal graph covering every carved point.
    pub graph: MazeGraph,
    /// Reserved for finish-point selection; currently always empty.
    pub finish_points: Vec<PointId>,
}

/// Generate a maze over `grid` according to `config`.
///
/// `start` is a (ring, index) position that must exist in the grid.
/// `end_candidates` is accepted for interface compatibility; finish
/// selection is reserved and [`MazeResult::finish_points`] stays empty.
///
/// The pipeline consumes the seeded draw stream in one fixed order -
/// gate selection for every fragment in outline order, then carving in
/// outline order - which makes generation fully deterministic.
pub fn generate_maze(
    grid: &Grid,
    start: (usize, usize),
    end_candidates: &[PointId],
    config: &MazeConfig,
) -> Result<MazeResult> {
    let start_id = grid
        .point_at(start.0, start.1)
        .ok_or(MazeError::StartOutOfBounds {
            row: start.0,
            col: start.1,
        })?;

    let mut outline = generate_outline(grid, config)?;
    let mut rng = MazeRng::from_seed(&config.seed);

    for fragment in outline.fragments_mut() {
        select_gates(fragment, &mut rng);
    }

    let mut graph = MazeGraph::new();
    resolve_adjacency(&mut outline, grid, &mut graph);

    for fragment in outline.fragments() {
        carve_fragment(fragment, grid, &mut graph, &mut rng);
    }

    // Finish-point selection is reserved; candidates are acknowledged
    // but not consumed.
    let _ = end_candidates;

    debug!(
        fragments = outline.num_fragments(),
        nodes = graph.len(),
        edges = graph.edge_count(),
        "maze generated"
    );

    Ok(MazeResult {
        start: start_id,
        outline,
        graph,
        finish_points: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use warren_grid::build_square;

    #[test]
    fn start_must_exist() {
        let grid = build_square(4.0, 4.0, 1.0).unwrap();
        let config = MazeConfig::single(FragmentKind::Ring, "AAAAAAAA");
        assert!(matches!(
            generate_maze(&grid, (9, 0), &[], &config),
            Err(MazeError::StartOutOfBounds { row: 9, col: 0 })
        ));
    }

    #[test]
    fn finish_points_stay_reserved() {
        let grid = build_square(4.0, 4.0, 1.0).unwrap();
        let config = MazeConfig::single(FragmentKind::Ring, "AAAAAAAA");
        let candidates = [PointId::new(3, 3)];
        let result = generate_maze(&grid, (0, 0), &candidates, &config).unwrap();
        assert!(result.finish_points.is_empty());
    }
}
