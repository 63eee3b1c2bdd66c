//! Row/column lattice.
//!
//! The "rings" of a square grid are its rows, first row first. Points
//! are wired with a 4-neighbourhood (left/right within the row, up/down
//! across rows).

use crate::point::{Grid, Point, PointId};
use crate::GridError;

/// Build a square lattice filling `height` x `width` at `cell_size`
/// pitch.
///
/// Row and column counts floor to whole cells; bounds smaller than one
/// cell in either dimension are an error.
pub fn build_square(height: f64, width: f64, cell_size: f64) -> Result<Grid, GridError> {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(GridError::BadCellSize(cell_size));
    }

    let num_rows = (height / cell_size).floor() as usize;
    let num_cols = (width / cell_size).floor() as usize;
    if num_rows == 0 || num_cols == 0 {
        return Err(GridError::BoundsTooSmall {
            height,
            width,
            cell_size,
        });
    }

    let mut grid = Grid::new();
    for row in 0..num_rows {
        let ring = (0..num_cols)
            .map(|col| {
                Point::new(
                    PointId::new(row as u32, col as u32),
                    col as f64 * cell_size,
                    row as f64 * cell_size,
                )
            })
            .collect();
        grid.push_ring(ring);
    }

    for row in 0..num_rows {
        for col in 0..num_cols {
            let here = PointId::new(row as u32, col as u32);
            if col + 1 < num_cols {
                grid.add_edge(here, PointId::new(row as u32, col as u32 + 1));
            }
            if row + 1 < num_rows {
                grid.add_edge(here, PointId::new(row as u32 + 1, col as u32));
            }
        }
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_floor_to_cells() {
        let grid = build_square(4.5, 3.2, 1.0).unwrap();
        assert_eq!(grid.num_rings(), 4);
        assert_eq!(grid.ring(0).len(), 3);
        assert_eq!(grid.num_points(), 12);
    }

    #[test]
    fn interior_points_have_four_neighbours() {
        let grid = build_square(3.0, 3.0, 1.0).unwrap();
        let centre = PointId::new(1, 1);
        assert_eq!(grid.neighbours(centre).len(), 4);
    }

    #[test]
    fn corners_have_two_neighbours() {
        let grid = build_square(3.0, 3.0, 1.0).unwrap();
        for corner in [
            PointId::new(0, 0),
            PointId::new(0, 2),
            PointId::new(2, 0),
            PointId::new(2, 2),
        ] {
            assert_eq!(grid.neighbours(corner).len(), 2, "corner {corner}");
        }
    }

    #[test]
    fn adjacency_is_symmetric() {
        let grid = build_square(4.0, 4.0, 1.0).unwrap();
        for ring in grid.rings() {
            for point in ring {
                for &nb in &point.neighbours {
                    assert!(
                        grid.neighbours(nb).contains(&point.id),
                        "{} -> {} not reciprocated",
                        point.id,
                        nb
                    );
                }
            }
        }
    }

    #[test]
    fn positions_follow_cell_size() {
        let grid = build_square(2.0, 2.0, 0.5).unwrap();
        let p = grid.get(PointId::new(2, 3)).unwrap();
        assert_eq!(p.x, 1.5);
        assert_eq!(p.y, 1.0);
    }

    #[test]
    fn too_small_bounds_error() {
        assert!(matches!(
            build_square(0.5, 4.0, 1.0),
            Err(GridError::BoundsTooSmall { .. })
        ));
    }

    proptest::proptest! {
        #[test]
        fn every_edge_reciprocated(rows in 1usize..10, cols in 1usize..10) {
            let grid = build_square(rows as f64, cols as f64, 1.0).unwrap();
            proptest::prop_assert_eq!(grid.num_points(), rows * cols);
            for ring in grid.rings() {
                for point in ring {
                    for &nb in &point.neighbours {
                        proptest::prop_assert!(grid.neighbours(nb).contains(&point.id));
                    }
                }
            }
        }
    }
}
