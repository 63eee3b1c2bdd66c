//! Fragment maze carvers.
//!
//! Each fragment's sub-lattice is turned into traversal connections by
//! one of three algorithms:
//!
//! - **Ring**: randomized-weight frontier growth (a Prim variant) from a
//!   single root, producing a spanning tree over everything reachable.
//! - **Branch**: sidewinder-style runs grown layer by layer away from
//!   one wall, producing long corridors biased by wall orientation.
//! - **Braid**: a Ring tree whose dead-ends are looped back into the
//!   maze.
//!
//! Carving shares the engine-wide PRNG; fragments are processed in
//! outline order and every draw below happens in a fixed order, so the
//! whole pass is reproducible.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use warren_grid::{Grid, PointId};

use crate::config::FragmentKind;
use crate::direction::Direction;
use crate::graph::MazeGraph;
use crate::outline::Fragment;
use crate::rng::MazeRng;

/// Scale factor for the branch carver's run-closing threshold; a run
/// closes once its accumulated draws exceed `RUN_BIAS * sqrt(layer_len)`.
pub const RUN_BIAS: f64 = 0.5;

/// Probability that a braid dead-end is looped back into the maze.
pub const BRAID_LOOP_CHANCE: f64 = 0.5;

/// Carve one fragment into the shared graph.
pub fn carve_fragment(fragment: &Fragment, grid: &Grid, graph: &mut MazeGraph, rng: &mut MazeRng) {
    match fragment.kind {
        FragmentKind::Ring => carve_ring(fragment, grid, graph, rng),
        FragmentKind::Branch => carve_branch(fragment, grid, graph, rng),
        FragmentKind::Braid => carve_braid(fragment, grid, graph, rng),
    }
}

/// The point carving grows from: the first resolved gate in canonical
/// direction order, falling back to the fragment's first point.
fn root_point(fragment: &Fragment, graph: &MazeGraph) -> Option<PointId> {
    for direction in Direction::ALL {
        if let Some(&node) = fragment.gate_nodes[direction].first() {
            return Some(graph.node(node).point);
        }
    }
    fragment.first_point()
}

fn carve_ring(fragment: &Fragment, grid: &Grid, graph: &mut MazeGraph, rng: &mut MazeRng) {
    if fragment.is_empty() {
        return;
    }

    let members: HashSet<PointId> = fragment.subgraph.iter().flatten().copied().collect();

    // One weight draw per point, row-major, before any frontier work.
    let mut weights: HashMap<PointId, f64> = HashMap::with_capacity(members.len());
    for row in &fragment.subgraph {
        for &point in row {
            weights.insert(point, rng.next_f64());
        }
    }

    let Some(root) = root_point(fragment, graph) else {
        return;
    };
    graph.node_for(root);

    let mut visited: HashSet<PointId> = HashSet::new();
    visited.insert(root);

    let mut open: Vec<PointId> = Vec::new();
    for &nb in grid.neighbours(root) {
        if members.contains(&nb) {
            open.push(nb);
        }
    }

    while !open.is_empty() {
        // Lowest weight wins; ids break the (measure-zero) ties so the
        // choice never depends on frontier insertion order.
        let Some(slot) = open
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                weights[*a]
                    .partial_cmp(&weights[*b])
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.cmp(b))
            })
            .map(|(slot, _)| slot)
        else {
            break;
        };
        let point = open.swap_remove(slot);

        if let Some(&partner) = grid
            .neighbours(point)
            .iter()
            .find(|nb| visited.contains(*nb))
        {
            let a = graph.node_for(point);
            let b = graph.node_for(partner);
            graph.connect(a, b);
        }
        visited.insert(point);

        for &nb in grid.neighbours(point) {
            if members.contains(&nb) && !visited.contains(&nb) && !open.contains(&nb) {
                open.push(nb);
            }
        }
    }

    trace!(points = members.len(), carved = visited.len(), "ring carve");
}

fn carve_branch(fragment: &Fragment, grid: &Grid, graph: &mut MazeGraph, rng: &mut MazeRng) {
    if fragment.is_empty() {
        return;
    }

    let wall = fragment
        .connections
        .first()
        .copied()
        .unwrap_or(Direction::North);
    let layers = wall_layers(fragment, wall);
    let Some((first, rest)) = layers.split_first() else {
        return;
    };

    // The wall layer is one open corridor, merged with whatever gate
    // nodes already stand on it.
    for &point in first {
        graph.node_for(point);
    }
    chain_adjacent(first, grid, graph);

    let mut prev: Vec<PointId> = first.clone();
    for layer in rest {
        let threshold = RUN_BIAS * (layer.len() as f64).sqrt();
        let mut run: Vec<PointId> = Vec::new();
        let mut acc = 0.0;

        for (i, &point) in layer.iter().enumerate() {
            run.push(point);
            acc += rng.next_f64();
            if acc > threshold || i + 1 == layer.len() {
                close_run(&run, &prev, grid, graph, rng);
                run.clear();
                acc = 0.0;
            }
        }
        prev = layer.clone();
    }

    trace!(layers = layers.len(), %wall, "branch carve");
}

/// Layers of points parallel to the wall, wall side first.
///
/// North/South walls read rows directly; East/West walls gather the k-th
/// column from that side of every row, scanning the jagged row lengths.
fn wall_layers(fragment: &Fragment, wall: Direction) -> Vec<Vec<PointId>> {
    let rows = &fragment.subgraph;
    let layers: Vec<Vec<PointId>> = match wall {
        Direction::North => rows.iter().rev().cloned().collect(),
        Direction::South => rows.to_vec(),
        Direction::East | Direction::West => {
            let max_len = rows.iter().map(Vec::len).max().unwrap_or(0);
            (0..max_len)
                .map(|k| {
                    rows.iter()
                        .filter(|row| row.len() > k)
                        .map(|row| {
                            if wall == Direction::East {
                                row[row.len() - 1 - k]
                            } else {
                                row[k]
                            }
                        })
                        .collect()
                })
                .collect()
        }
    };
    layers.into_iter().filter(|layer| !layer.is_empty()).collect()
}

/// Chain consecutive physically-adjacent points into a corridor.
fn chain_adjacent(points: &[PointId], grid: &Grid, graph: &mut MazeGraph) {
    for pair in points.windows(2) {
        if grid.neighbours(pair[0]).contains(&pair[1]) {
            let a = graph.node_for(pair[0]);
            let b = graph.node_for(pair[1]);
            graph.connect(a, b);
        }
    }
}

/// Close a run: chain its points and connect it once to the previous
/// layer through a randomly chosen adjacent previous-layer point.
fn close_run(
    run: &[PointId],
    prev: &[PointId],
    grid: &Grid,
    graph: &mut MazeGraph,
    rng: &mut MazeRng,
) {
    for &point in run {
        graph.node_for(point);
    }
    chain_adjacent(run, grid, graph);

    let candidates: Vec<PointId> = prev
        .iter()
        .copied()
        .filter(|pp| run.iter().any(|rp| grid.neighbours(*pp).contains(rp)))
        .collect();
    if candidates.is_empty() {
        return;
    }

    let pick = candidates[rng.index(candidates.len())];
    if let Some(&into) = run.iter().find(|rp| grid.neighbours(pick).contains(*rp)) {
        let a = graph.node_for(pick);
        let b = graph.node_for(into);
        graph.connect(a, b);
    }
}

fn carve_braid(fragment: &Fragment, grid: &Grid, graph: &mut MazeGraph, rng: &mut MazeRng) {
    carve_ring(fragment, grid, graph, rng);

    let members: HashSet<PointId> = fragment.subgraph.iter().flatten().copied().collect();

    // Snapshot dead-ends first; loops added below must not re-qualify
    // other nodes mid-pass.
    let dead_ends: Vec<_> = fragment
        .subgraph
        .iter()
        .flatten()
        .filter_map(|&point| graph.lookup(point))
        .filter(|&node| graph.degree(node) == 1)
        .collect();

    let mut looped = 0usize;
    for node in dead_ends {
        // One draw per dead-end, whether or not a loop is possible.
        if rng.next_f64() >= BRAID_LOOP_CHANCE {
            continue;
        }
        let point = graph.node(node).point;
        let candidate = grid
            .neighbours(point)
            .iter()
            .copied()
            .filter(|nb| members.contains(nb))
            .filter_map(|nb| graph.lookup(nb))
            .find(|&other| other != node && !graph.are_connected(node, other));
        if let Some(other) = candidate {
            graph.connect(node, other);
            looped += 1;
        }
    }

    trace!(looped, "braid carve");
}
