//! Outline partitioning: grid rings into layers, slices and fragments.
//!
//! The grid's concentric rings are consumed three times over by the same
//! proportional-weight algorithm, one dimension deeper each time:
//!
//! 1. **Layers** take consecutive whole rings, innermost first.
//! 2. **Slices** cut each of a layer's rings along its length; every
//!    ring keeps its own running cursor because rings differ in length.
//! 3. **Fragments** stack depth-wise within a slice, consuming the
//!    slice-local rows.
//!
//! The rounding rule is `ceil` everywhere, clamped to the unconsumed
//! remainder, so no point is ever dropped or double-counted. Whatever a
//! declaration level leaves unconsumed (including everything, when a
//! level declares nothing) is gathered into an implicit trailing
//! layer/slice/fragment of the relevant default kind, open on all four
//! sides.

use tracing::debug;

use warren_grid::{Grid, PointId};

use crate::config::{FragmentKind, FragmentSpec, MazeConfig};
use crate::direction::{Direction, DirectionMap};
use crate::error::{MazeError, Result};
use crate::graph::NodeId;

/// A carvable piece of the grid: a jagged sub-lattice plus its gate
/// state.
#[derive(Debug, Clone)]
pub struct Fragment {
    /// Carving algorithm to run.
    pub kind: FragmentKind,
    /// Sides on which this fragment may connect to neighbours.
    pub connections: Vec<Direction>,
    /// Rows of point ids, innermost row first; rows may be empty.
    pub subgraph: Vec<Vec<PointId>>,
    /// Selected gate points per direction.
    pub gates: DirectionMap<Vec<PointId>>,
    /// Gate points that resolved into actual inter-fragment edges.
    pub gate_nodes: DirectionMap<Vec<NodeId>>,
}

impl Fragment {
    fn new(kind: FragmentKind, connections: Vec<Direction>, subgraph: Vec<Vec<PointId>>) -> Self {
        Self {
            kind,
            connections,
            subgraph,
            gates: DirectionMap::default(),
            gate_nodes: DirectionMap::default(),
        }
    }

    /// Total points across all rows.
    pub fn num_points(&self) -> usize {
        self.subgraph.iter().map(Vec::len).sum()
    }

    /// Whether the fragment holds no points at all.
    pub fn is_empty(&self) -> bool {
        self.subgraph.iter().all(Vec::is_empty)
    }

    /// First point in row-major order, if any.
    pub fn first_point(&self) -> Option<PointId> {
        self.subgraph.iter().find_map(|row| row.first().copied())
    }

    /// The boundary sequence facing a direction.
    ///
    /// North is the outermost row, South the innermost, East the last
    /// column of every row, West the first column of every row.
    pub fn boundary(&self, direction: Direction) -> Vec<PointId> {
        match direction {
            Direction::North => self.subgraph.last().cloned().unwrap_or_default(),
            Direction::South => self.subgraph.first().cloned().unwrap_or_default(),
            Direction::East => self
                .subgraph
                .iter()
                .filter_map(|row| row.last().copied())
                .collect(),
            Direction::West => self
                .subgraph
                .iter()
                .filter_map(|row| row.first().copied())
                .collect(),
        }
    }
}

/// One slice of a layer: fragments stacked innermost-first.
#[derive(Debug, Clone)]
pub struct OutlineSlice {
    /// Fragments in depth order.
    pub fragments: Vec<Fragment>,
}

/// One layer of the outline: slices in ring order.
#[derive(Debug, Clone)]
pub struct OutlineLayer {
    /// Slices in the order they were cut from the rings.
    pub slices: Vec<OutlineSlice>,
}

/// The full fragment hierarchy.
#[derive(Debug, Clone)]
pub struct Outline {
    /// Layers, innermost first.
    pub layers: Vec<OutlineLayer>,
}

impl Outline {
    /// Fragments in canonical order (layer, then slice, then fragment).
    ///
    /// This order drives every PRNG-consuming pass, so it is the
    /// determinism contract of the whole engine.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.layers
            .iter()
            .flat_map(|layer| layer.slices.iter().flat_map(|slice| slice.fragments.iter()))
    }

    /// Mutable variant of [`Outline::fragments`], same order.
    pub fn fragments_mut(&mut self) -> impl Iterator<Item = &mut Fragment> {
        self.layers.iter_mut().flat_map(|layer| {
            layer
                .slices
                .iter_mut()
                .flat_map(|slice| slice.fragments.iter_mut())
        })
    }

    /// Total fragment count.
    pub fn num_fragments(&self) -> usize {
        self.fragments().count()
    }

    /// Total points across every fragment.
    pub fn num_points(&self) -> usize {
        self.fragments().map(Fragment::num_points).sum()
    }
}

/// Proportional share of `count`, rounded up.
fn proportional(count: usize, weight: f64, total: f64) -> usize {
    (count as f64 * weight / total).ceil() as usize
}

struct LayerPlan {
    slices: Vec<Vec<FragmentSpec>>,
    slice_weights: Vec<f64>,
    default_kind: FragmentKind,
    rings: Vec<Vec<PointId>>,
}

/// Partition a grid into the fragment hierarchy described by `config`.
///
/// Pure: same grid and config always yield the same outline. Gate and
/// node state on the returned fragments starts empty.
pub fn generate_outline(grid: &Grid, config: &MazeConfig) -> Result<Outline> {
    config.validate()?;
    if grid.num_points() == 0 {
        return Err(MazeError::EmptyGrid);
    }

    let ring_ids: Vec<Vec<PointId>> = grid
        .rings()
        .iter()
        .map(|ring| ring.iter().map(|p| p.id).collect())
        .collect();
    let num_rings = ring_ids.len();
    let layer_total: f64 = config.layers.iter().map(|l| l.weight).sum();

    let mut plans = Vec::with_capacity(config.layers.len() + 1);
    let mut cursor = 0usize;
    for layer in &config.layers {
        let width = proportional(num_rings, layer.weight, layer_total).min(num_rings - cursor);
        plans.push(LayerPlan {
            slices: layer.slices.clone(),
            slice_weights: layer.slice_weights.clone(),
            default_kind: layer.default_kind,
            rings: ring_ids[cursor..cursor + width].to_vec(),
        });
        cursor += width;
    }

    // Rings no declared layer consumed become one trailing default layer.
    if cursor < num_rings {
        debug!(leftover = num_rings - cursor, "implicit trailing layer");
        plans.push(LayerPlan {
            slices: vec![vec![FragmentSpec::open(config.default_kind, 1.0)]],
            slice_weights: vec![1.0],
            default_kind: config.default_kind,
            rings: ring_ids[cursor..].to_vec(),
        });
    }

    let layers = plans
        .into_iter()
        .enumerate()
        .map(|(index, plan)| partition_layer(index, plan))
        .collect();

    Ok(Outline { layers })
}

fn partition_layer(layer_index: usize, plan: LayerPlan) -> OutlineLayer {
    let slice_total: f64 = plan.slice_weights.iter().sum();
    let mut cursors = vec![0usize; plan.rings.len()];
    let mut slices = Vec::with_capacity(plan.slices.len() + 1);

    for (slice_index, specs) in plan.slices.iter().enumerate() {
        let weight = plan.slice_weights[slice_index];
        let mut slice_rings = Vec::with_capacity(plan.rings.len());
        for (ring_index, ring) in plan.rings.iter().enumerate() {
            let start = cursors[ring_index];
            let take = proportional(ring.len(), weight, slice_total).min(ring.len() - start);
            slice_rings.push(ring[start..start + take].to_vec());
            cursors[ring_index] += take;
        }
        slices.push(partition_slice(specs, plan.default_kind, slice_rings));
    }

    // Per-ring leftovers gather into one trailing default slice.
    let leftovers: Vec<Vec<PointId>> = plan
        .rings
        .iter()
        .enumerate()
        .map(|(ring_index, ring)| ring[cursors[ring_index]..].to_vec())
        .collect();
    if leftovers.iter().any(|row| !row.is_empty()) {
        debug!(layer = layer_index, "implicit trailing slice");
        let spec = [FragmentSpec::open(plan.default_kind, 1.0)];
        slices.push(partition_slice(&spec, plan.default_kind, leftovers));
    }

    debug!(
        layer = layer_index,
        slices = slices.len(),
        rings = plan.rings.len(),
        "layer partitioned"
    );
    OutlineLayer { slices }
}

fn partition_slice(
    specs: &[FragmentSpec],
    default_kind: FragmentKind,
    rings: Vec<Vec<PointId>>,
) -> OutlineSlice {
    let frag_total: f64 = specs.iter().map(|f| f.weight).sum();
    let row_count = rings.len();
    let mut cursor = 0usize;
    let mut fragments = Vec::with_capacity(specs.len() + 1);

    for spec in specs {
        // Minimum height of one row, clamped to what is left; a fragment
        // declared after the rows run out keeps its slot with an empty
        // subgraph.
        let height = proportional(row_count, spec.weight, frag_total)
            .max(1)
            .min(row_count - cursor);
        fragments.push(Fragment::new(
            spec.kind,
            spec.connections.clone(),
            rings[cursor..cursor + height].to_vec(),
        ));
        cursor += height;
    }

    if cursor < row_count {
        let rows = rings[cursor..].to_vec();
        if rows.iter().any(|row| !row.is_empty()) {
            fragments.push(Fragment::new(default_kind, Direction::ALL.to_vec(), rows));
        }
    }

    OutlineSlice { fragments }
}
