//! Inter-fragment adjacency resolution.
//!
//! Decides which neighbouring fragments each gate can actually reach and
//! turns those reaches into reciprocated graph edges. Candidate
//! neighbours come from an explicit lookup table keyed by
//! (layer, slice, fragment, direction) built once up front; a gate then
//! becomes a real connection only if one of its physical neighbours lies
//! on a candidate fragment's facing boundary. Because fragment seams do
//! not align across layers or slices, candidate sets are deliberately
//! generous (every facing fragment of the adjacent layer/slice) and the
//! physical-adjacency test does the narrowing.
//!
//! East/West wrap around the slice axis. A layer with two slices needs
//! no special case - both directions point at the other slice and the
//! seams sort themselves out physically - and a single-slice layer wraps
//! onto itself, stitching its own East and West boundaries together.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use warren_grid::{Grid, PointId};

use crate::direction::{Direction, DirectionMap};
use crate::graph::{MazeGraph, NodeId};
use crate::outline::Outline;

/// Position of a fragment within the outline hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FragCoord {
    layer: usize,
    slice: usize,
    fragment: usize,
}

/// Candidate neighbour fragments per direction, for one fragment.
type NeighbourEntry = DirectionMap<Vec<FragCoord>>;

/// Fragment counts per (layer, slice) - enough shape information to
/// answer every neighbour query.
fn outline_shape(outline: &Outline) -> Vec<Vec<usize>> {
    outline
        .layers
        .iter()
        .map(|layer| layer.slices.iter().map(|s| s.fragments.len()).collect())
        .collect()
}

fn neighbour_coords(shape: &[Vec<usize>], at: FragCoord, direction: Direction) -> Vec<FragCoord> {
    match direction {
        Direction::North => {
            if at.fragment + 1 < shape[at.layer][at.slice] {
                // Next fragment outward in the same slice.
                vec![FragCoord {
                    fragment: at.fragment + 1,
                    ..at
                }]
            } else if at.layer + 1 < shape.len() {
                // Innermost fragment of every slice one layer out.
                (0..shape[at.layer + 1].len())
                    .filter(|&slice| shape[at.layer + 1][slice] > 0)
                    .map(|slice| FragCoord {
                        layer: at.layer + 1,
                        slice,
                        fragment: 0,
                    })
                    .collect()
            } else {
                Vec::new()
            }
        }
        Direction::South => {
            if at.fragment > 0 {
                vec![FragCoord {
                    fragment: at.fragment - 1,
                    ..at
                }]
            } else if at.layer > 0 {
                // Outermost fragment of every slice one layer in.
                (0..shape[at.layer - 1].len())
                    .filter(|&slice| shape[at.layer - 1][slice] > 0)
                    .map(|slice| FragCoord {
                        layer: at.layer - 1,
                        slice,
                        fragment: shape[at.layer - 1][slice] - 1,
                    })
                    .collect()
            } else {
                Vec::new()
            }
        }
        Direction::East | Direction::West => {
            let slice_count = shape[at.layer].len();
            if slice_count == 0 {
                return Vec::new();
            }
            let slice = if direction == Direction::East {
                (at.slice + 1) % slice_count
            } else {
                (at.slice + slice_count - 1) % slice_count
            };
            (0..shape[at.layer][slice])
                .map(|fragment| FragCoord {
                    layer: at.layer,
                    slice,
                    fragment,
                })
                .collect()
        }
    }
}

/// Resolve every fragment's gates into inter-fragment graph edges.
///
/// Mutates each fragment's `gate_nodes` and writes reciprocated edges
/// into `graph`. Consumes no randomness - gate selection already fixed
/// the points - so it can run between the gate and carve passes without
/// disturbing the draw stream.
pub fn resolve_adjacency(outline: &mut Outline, grid: &Grid, graph: &mut MazeGraph) {
    let shape = outline_shape(outline);

    // Flat canonical order with coordinates, plus facing-boundary sets.
    let mut coords = Vec::new();
    let mut flat_of = HashMap::new();
    for (l, layer) in outline.layers.iter().enumerate() {
        for (s, slice) in layer.slices.iter().enumerate() {
            for f in 0..slice.fragments.len() {
                let coord = FragCoord {
                    layer: l,
                    slice: s,
                    fragment: f,
                };
                flat_of.insert(coord, coords.len());
                coords.push(coord);
            }
        }
    }

    let fragments: Vec<_> = outline.fragments().collect();
    let boundaries: Vec<DirectionMap<HashSet<PointId>>> = fragments
        .iter()
        .map(|fragment| {
            let mut map: DirectionMap<HashSet<PointId>> = DirectionMap::default();
            for direction in Direction::ALL {
                map[direction] = fragment.boundary(direction).into_iter().collect();
            }
            map
        })
        .collect();

    let table: Vec<NeighbourEntry> = coords
        .iter()
        .map(|&coord| {
            let mut entry: NeighbourEntry = DirectionMap::default();
            for direction in Direction::ALL {
                entry[direction] = neighbour_coords(&shape, coord, direction);
            }
            entry
        })
        .collect();

    // First pass: read-only resolution of gate -> partner point pairs.
    struct Resolved {
        flat: usize,
        direction: Direction,
        gate: PointId,
        partners: Vec<PointId>,
    }
    let mut resolved = Vec::new();

    for (flat, fragment) in fragments.iter().enumerate() {
        for direction in Direction::ALL {
            if !fragment.connections.contains(&direction) {
                continue;
            }
            let gates = &fragment.gates[direction];
            if gates.is_empty() {
                continue;
            }

            let facing = direction.opposite();
            let candidates = &table[flat][direction];
            if candidates.is_empty() {
                continue;
            }

            for &gate in gates {
                let partners: Vec<PointId> = grid
                    .neighbours(gate)
                    .iter()
                    .copied()
                    .filter(|nb| {
                        candidates.iter().any(|c| {
                            flat_of
                                .get(c)
                                .is_some_and(|&i| boundaries[i][facing].contains(nb))
                        })
                    })
                    .collect();
                if !partners.is_empty() {
                    trace!(%gate, %direction, partners = partners.len(), "gate resolved");
                    resolved.push(Resolved {
                        flat,
                        direction,
                        gate,
                        partners,
                    });
                }
            }
        }
    }

    debug!(edges = resolved.len(), "adjacency resolved");

    // Second pass: materialise nodes and reciprocated edges.
    let mut gate_nodes_by_flat: Vec<Vec<(Direction, NodeId)>> = vec![Vec::new(); coords.len()];
    for entry in resolved {
        let gate_node = graph.node_for(entry.gate);
        for partner in entry.partners {
            let partner_node = graph.node_for(partner);
            graph.connect(gate_node, partner_node);
        }
        gate_nodes_by_flat[entry.flat].push((entry.direction, gate_node));
    }
    for (fragment, nodes) in outline.fragments_mut().zip(gate_nodes_by_flat) {
        for (direction, node) in nodes {
            fragment.gate_nodes[direction].push(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FragmentKind, FragmentSpec, LayerSpec, MazeConfig};
    use crate::gates::select_gates;
    use crate::outline::generate_outline;
    use crate::rng::MazeRng;
    use warren_grid::{build_hex, build_square};

    fn gated_outline(grid: &Grid, config: &MazeConfig) -> Outline {
        let mut outline = generate_outline(grid, config).unwrap();
        let mut rng = MazeRng::from_seed(&config.seed);
        for fragment in outline.fragments_mut() {
            select_gates(fragment, &mut rng);
        }
        outline
    }

    #[test]
    fn north_south_layers_stitch() {
        let grid = build_square(4.0, 4.0, 1.0).unwrap();
        let config = MazeConfig {
            default_kind: FragmentKind::Ring,
            layers: vec![
                LayerSpec::single(FragmentKind::Ring, 1.0),
                LayerSpec::single(FragmentKind::Ring, 1.0),
            ],
            seed: "AAAAAAAA".into(),
        };

        let mut outline = gated_outline(&grid, &config);
        let mut graph = MazeGraph::new();
        resolve_adjacency(&mut outline, &grid, &mut graph);

        // The inner layer's North gates face the outer layer's South
        // boundary across the row 1 / row 2 seam.
        let inner = &outline.layers[0].slices[0].fragments[0];
        assert!(!inner.gate_nodes[Direction::North].is_empty());
        for &node in &inner.gate_nodes[Direction::North] {
            let gate = graph.node(node).point;
            assert_eq!(gate.ring, 1);
            // Every resolved gate carries at least one reciprocated edge.
            assert!(!graph.node(node).connections.is_empty());
            for &other in &graph.node(node).connections {
                assert!(graph.node(other).connections.contains(&node));
                assert_eq!(graph.node(other).point.ring, 2);
            }
        }
    }

    #[test]
    fn adjacent_slices_stitch_but_square_edges_do_not_wrap() {
        let grid = build_square(2.0, 8.0, 1.0).unwrap();
        let config = MazeConfig {
            default_kind: FragmentKind::Ring,
            layers: vec![LayerSpec {
                weight: 1.0,
                slices: vec![
                    vec![FragmentSpec::open(FragmentKind::Ring, 1.0)],
                    vec![FragmentSpec::open(FragmentKind::Ring, 1.0)],
                ],
                slice_weights: vec![1.0, 1.0],
                default_kind: FragmentKind::Ring,
            }],
            seed: "AAAAAAAA".into(),
        };

        let mut outline = gated_outline(&grid, &config);
        let mut graph = MazeGraph::new();
        resolve_adjacency(&mut outline, &grid, &mut graph);

        let left = &outline.layers[0].slices[0].fragments[0];
        let right = &outline.layers[0].slices[1].fragments[0];

        // The col 3 / col 4 seam is physically real.
        assert!(!left.gate_nodes[Direction::East].is_empty());
        assert!(!right.gate_nodes[Direction::West].is_empty());

        // Square rows are not cyclic: the wraparound candidates exist
        // but no physical edge backs them.
        assert!(left.gate_nodes[Direction::West].is_empty());
        assert!(right.gate_nodes[Direction::East].is_empty());
    }

    #[test]
    fn hex_slices_wrap_across_the_ring_seam() {
        let grid = build_hex(12.0, 12.0, 1.0).unwrap();
        let config = MazeConfig {
            default_kind: FragmentKind::Ring,
            layers: vec![LayerSpec {
                weight: 1.0,
                slices: vec![
                    vec![FragmentSpec::open(FragmentKind::Ring, 1.0)],
                    vec![FragmentSpec::open(FragmentKind::Ring, 1.0)],
                ],
                slice_weights: vec![1.0, 1.0],
                default_kind: FragmentKind::Ring,
            }],
            seed: "AAAAAAAA".into(),
        };

        let mut outline = gated_outline(&grid, &config);
        let mut graph = MazeGraph::new();
        resolve_adjacency(&mut outline, &grid, &mut graph);

        // Hex rings are cycles, so the first slice's West boundary really
        // does touch the last slice's East boundary.
        let first = &outline.layers[0].slices[0].fragments[0];
        let has_seam = !first.gate_nodes[Direction::West].is_empty()
            || !first.gate_nodes[Direction::East].is_empty();
        assert!(has_seam, "expected at least one wrapped seam edge");
    }

    #[test]
    fn all_edges_reciprocated() {
        let grid = build_square(6.0, 6.0, 1.0).unwrap();
        let config = MazeConfig {
            default_kind: FragmentKind::Ring,
            layers: vec![
                LayerSpec::single(FragmentKind::Ring, 1.0),
                LayerSpec::single(FragmentKind::Ring, 1.0),
                LayerSpec::single(FragmentKind::Ring, 1.0),
            ],
            seed: "SEEDSEED".into(),
        };

        let mut outline = gated_outline(&grid, &config);
        let mut graph = MazeGraph::new();
        resolve_adjacency(&mut outline, &grid, &mut graph);

        for (index, node) in graph.nodes().iter().enumerate() {
            for &other in &node.connections {
                assert!(graph
                    .node(other)
                    .connections
                    .contains(&crate::graph::NodeId(index)));
            }
        }
    }

    #[test]
    fn innermost_and_outermost_boundaries_stay_open() {
        let grid = build_square(4.0, 4.0, 1.0).unwrap();
        let config = MazeConfig::single(FragmentKind::Ring, "AAAAAAAA");

        let mut outline = gated_outline(&grid, &config);
        let mut graph = MazeGraph::new();
        resolve_adjacency(&mut outline, &grid, &mut graph);

        // A single fragment has no layer neighbours; its slice wraps to
        // itself but square rows give that no physical backing.
        let fragment = &outline.layers[0].slices[0].fragments[0];
        for direction in Direction::ALL {
            assert!(fragment.gate_nodes[direction].is_empty());
        }
        assert!(graph.is_empty());
    }
}
