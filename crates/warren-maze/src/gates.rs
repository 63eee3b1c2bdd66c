//! Gate selection along fragment boundaries.
//!
//! Each declared direction of a fragment gets a handful of "gates" -
//! boundary points where the adjacency resolver may later stitch the
//! fragment to a neighbour. The boundary is cut into roughly-even
//! contiguous arcs and one uniformly-random point is drawn per arc, so
//! gates spread along the whole boundary instead of clustering.

use crate::direction::Direction;
use crate::outline::Fragment;
use crate::rng::MazeRng;

/// Fraction of boundary length that becomes arcs (one gate per arc).
pub const GATE_FRACTION: f64 = 0.25;

/// Select gate points for every declared direction of a fragment.
///
/// Directions are visited in canonical order and one draw happens per
/// arc, keeping the stream deterministic. Degenerate boundaries (empty,
/// or a single-point innermost ring for South) are skipped silently.
pub fn select_gates(fragment: &mut Fragment, rng: &mut MazeRng) {
    for direction in Direction::ALL {
        if !fragment.connections.contains(&direction) {
            continue;
        }

        let boundary = fragment.boundary(direction);
        if boundary.is_empty() {
            continue;
        }
        // A single-point centre ring cannot host an inward gate.
        if direction == Direction::South && boundary.len() <= 1 {
            continue;
        }

        let arc_count = (boundary.len() as f64 * GATE_FRACTION).ceil() as usize;
        let arc_len = boundary.len() / arc_count;

        let gates = &mut fragment.gates[direction];
        for arc in 0..arc_count {
            let start = arc * arc_len;
            // The final arc absorbs the division remainder.
            let end = if arc + 1 == arc_count {
                boundary.len()
            } else {
                start + arc_len
            };
            let pick = start + rng.index(end - start);
            gates.push(boundary[pick]);
        }
    }
}
