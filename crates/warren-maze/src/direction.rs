//! Topological directions and a dense per-direction map.
//!
//! Compass names are roles on the ring structure, not geometry:
//! North = ring-outward, South = ring-inward, East = slice-forward,
//! West = slice-backward.

use serde::{Deserialize, Serialize};

/// A connection role on the layer/slice/fragment hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward the next ring outward.
    North,
    /// Toward the next slice forward (wrapping).
    East,
    /// Toward the next ring inward.
    South,
    /// Toward the previous slice (wrapping).
    West,
}

impl Direction {
    /// Canonical iteration order; every PRNG-consuming loop walks
    /// directions in this order so the draw stream stays deterministic.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The opposing role.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::North => write!(f, "North"),
            Direction::East => write!(f, "East"),
            Direction::South => write!(f, "South"),
            Direction::West => write!(f, "West"),
        }
    }
}

/// Dense map from [`Direction`] to `T`.
///
/// A fixed array rather than a hash map so iteration order is canonical.
#[derive(Debug, Clone, Default)]
pub struct DirectionMap<T> {
    slots: [T; 4],
}

impl<T> DirectionMap<T> {
    /// Visit every direction in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL
            .into_iter()
            .map(move |d| (d, &self.slots[d.slot()]))
    }
}

impl<T> std::ops::Index<Direction> for DirectionMap<T> {
    type Output = T;

    fn index(&self, direction: Direction) -> &T {
        &self.slots[direction.slot()]
    }
}

impl<T> std::ops::IndexMut<Direction> for DirectionMap<T> {
    fn index_mut(&mut self, direction: Direction) -> &mut T {
        &mut self.slots[direction.slot()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposites_pair_up() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
        }
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
    }

    #[test]
    fn map_indexes_by_direction() {
        let mut map: DirectionMap<u32> = DirectionMap::default();
        map[Direction::East] = 7;
        assert_eq!(map[Direction::East], 7);
        assert_eq!(map[Direction::West], 0);
    }

    #[test]
    fn iteration_follows_canonical_order() {
        let map: DirectionMap<u32> = DirectionMap::default();
        let order: Vec<Direction> = map.iter().map(|(d, _)| d).collect();
        assert_eq!(order, Direction::ALL);
    }

    #[test]
    fn serde_uses_variant_names() {
        let json = serde_json::to_string(&Direction::North).unwrap();
        assert_eq!(json, "\"North\"");
        let back: Direction = serde_json::from_str("\"West\"").unwrap();
        assert_eq!(back, Direction::West);
    }
}
