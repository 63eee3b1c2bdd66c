//! Grid points and the ring-ordered lattice container.

/// Stable identity of a lattice point: ring index plus position within
/// the ring.
///
/// Assigned once at grid construction and used as the sole equality key
/// throughout the engine. Ordering is ring-major, which makes it a
/// convenient deterministic tie-breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointId {
    /// Ring index, 0 = centre (or first row for square grids).
    pub ring: u32,
    /// Position within the ring.
    pub index: u32,
}

impl PointId {
    /// Create a new point key.
    pub const fn new(ring: u32, index: u32) -> Self {
        Self { ring, index }
    }
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.ring, self.index)
    }
}

/// A single lattice point with its physical position and undirected
/// neighbour list.
#[derive(Debug, Clone)]
pub struct Point {
    /// Stable identity key.
    pub id: PointId,
    /// Horizontal position, for rendering only.
    pub x: f64,
    /// Vertical position, for rendering only.
    pub y: f64,
    /// Undirected physical adjacency; only ever references points in the
    /// same grid.
    pub neighbours: Vec<PointId>,
}

impl Point {
    /// Create a point with no neighbours yet.
    pub fn new(id: PointId, x: f64, y: f64) -> Self {
        Self {
            id,
            x,
            y,
            neighbours: Vec::new(),
        }
    }
}

/// An ordered sequence of rings of points, centre (or first row) first.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rings: Vec<Vec<Point>>,
}

impl Grid {
    /// An empty grid; builders push rings into it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a ring. Point ids inside must already carry the correct
    /// ring index.
    pub(crate) fn push_ring(&mut self, ring: Vec<Point>) {
        self.rings.push(ring);
    }

    /// Number of rings.
    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    /// Total number of points across all rings.
    pub fn num_points(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    /// The ring at `index`, empty slice when out of range.
    pub fn ring(&self, index: usize) -> &[Point] {
        self.rings.get(index).map_or(&[], Vec::as_slice)
    }

    /// All rings in centre-outward order.
    pub fn rings(&self) -> &[Vec<Point>] {
        &self.rings
    }

    /// Look up a point by id.
    pub fn get(&self, id: PointId) -> Option<&Point> {
        self.rings
            .get(id.ring as usize)
            .and_then(|ring| ring.get(id.index as usize))
    }

    /// Neighbour ids of a point, empty slice when the id is unknown.
    pub fn neighbours(&self, id: PointId) -> &[PointId] {
        self.get(id).map_or(&[], |p| p.neighbours.as_slice())
    }

    /// Id of the point at (ring, index), if present.
    pub fn point_at(&self, ring: usize, index: usize) -> Option<PointId> {
        self.rings.get(ring).and_then(|r| r.get(index)).map(|p| p.id)
    }

    /// Wire an undirected edge between two points.
    ///
    /// Reciprocates automatically, ignores self-edges and duplicates, and
    /// is a no-op when either id is unknown.
    pub(crate) fn add_edge(&mut self, a: PointId, b: PointId) {
        if a == b || self.get(a).is_none() || self.get(b).is_none() {
            return;
        }
        self.push_neighbour(a, b);
        self.push_neighbour(b, a);
    }

    fn push_neighbour(&mut self, at: PointId, neighbour: PointId) {
        if let Some(ring) = self.rings.get_mut(at.ring as usize) {
            if let Some(point) = ring.get_mut(at.index as usize) {
                if !point.neighbours.contains(&neighbour) {
                    point.neighbours.push(neighbour);
                }
            }
        }
    }
}
