//! Concentric hexagonal lattice.
//!
//! Rings are regular hexagons around a single centre point: ring `n`
//! holds `6 * n` points, placed by walking each of the six edges between
//! consecutive hexagon vertices. Construction stops at the first ring
//! that would leave the `width / 2` x `height / 2` bounds.
//!
//! Neighbour wiring uses index arithmetic against the previous ring:
//! corner points (one per hexagon vertex) connect to the matching corner
//! one ring in, side points connect to the two nearest previous-ring
//! points, and every point connects to its ring successor.

use std::f64::consts::PI;

use crate::point::{Grid, Point, PointId};
use crate::GridError;

/// Build a hexagonal lattice with side length `side` inside
/// `height` x `width` bounds.
///
/// The grid always contains at least the centre point; a bound too tight
/// for ring 1 yields a single-point grid.
pub fn build_hex(height: f64, width: f64, side: f64) -> Result<Grid, GridError> {
    if !(side.is_finite() && side > 0.0) {
        return Err(GridError::BadCellSize(side));
    }

    let mut grid = Grid::new();
    grid.push_ring(vec![Point::new(PointId::new(0, 0), 0.0, 0.0)]);

    let mut ring_index = 1u32;
    while let Some(ring) = next_hexagon(ring_index, side, height, width) {
        grid.push_ring(ring);
        wire_ring(&mut grid, ring_index);
        ring_index += 1;
    }

    Ok(grid)
}

/// Place ring `n` geometrically, or `None` if any point leaves the
/// bounds.
fn next_hexagon(n: u32, side: f64, height: f64, width: f64) -> Option<Vec<Point>> {
    let radius = side * n as f64;
    let mut ring = Vec::with_capacity(6 * n as usize);

    for vertex in 0..6u32 {
        let angle = vertex as f64 * PI / 3.0;
        let next_angle = ((vertex + 1) % 6) as f64 * PI / 3.0;

        // Unit vector from this hexagon vertex toward the next.
        let dx = next_angle.cos() - angle.cos();
        let dy = next_angle.sin() - angle.sin();
        let len = dx.hypot(dy);
        let (ux, uy) = (dx / len, dy / len);

        for step in 0..n {
            let x = radius * angle.cos() + ux * step as f64 * side;
            let y = radius * angle.sin() + uy * step as f64 * side;

            if x.abs() > width / 2.0 || y.abs() > height / 2.0 {
                return None;
            }
            let index = vertex * n + step;
            ring.push(Point::new(PointId::new(n, index), x, y));
        }
    }

    Some(ring)
}

/// Wire ring `n` (already pushed) to itself and to ring `n - 1`.
fn wire_ring(grid: &mut Grid, n: u32) {
    let ring_len = 6 * n;
    let prev_len = if n == 1 { 1 } else { 6 * (n - 1) };

    for index in 0..ring_len {
        let here = PointId::new(n, index);

        // Ring successor; the cycle closes at the last point.
        grid.add_edge(here, PointId::new(n, (index + 1) % ring_len));

        if index % n == 0 {
            // Corner: matching corner of the smaller hexagon.
            let side_number = index / n;
            let inner = if n == 1 {
                PointId::new(0, 0)
            } else {
                PointId::new(n - 1, side_number * (n - 1))
            };
            grid.add_edge(here, inner);
        } else {
            // Side point: the two nearest previous-ring points, with
            // index wraparound on the smaller hexagon.
            let side_number = index / n;
            let side_index = index % n;
            let next = (side_number * (n - 1) + side_index) % prev_len;
            let prev = if next == 0 { prev_len - 1 } else { next - 1 };
            grid.add_edge(here, PointId::new(n - 1, prev));
            grid.add_edge(here, PointId::new(n - 1, next));
        }
    }
}
