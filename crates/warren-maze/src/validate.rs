//! Post-generation graph validation.
//!
//! Checks the three graph invariants - reciprocity, one node per point,
//! full reachability from the start - and returns the findings as a
//! structured report instead of logging or aborting. Callers and tests
//! decide what a violation means.

use std::collections::HashMap;

use tracing::debug;

use warren_grid::PointId;

use crate::graph::{MazeGraph, NodeId};
use crate::MazeResult;

/// A single graph-consistency violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// `from` lists `to` as a connection but not vice versa.
    Unreciprocated { from: NodeId, to: NodeId },
    /// Two nodes stand on the same lattice point.
    DuplicateNode {
        first: NodeId,
        second: NodeId,
        point: PointId,
    },
    /// The node cannot be reached from the start node.
    Unreachable { node: NodeId },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::Unreciprocated { from, to } => {
                write!(f, "connection {from} -> {to} is not reciprocated")
            }
            Violation::DuplicateNode {
                first,
                second,
                point,
            } => write!(f, "nodes {first} and {second} both stand on {point}"),
            Violation::Unreachable { node } => {
                write!(f, "node {node} is unreachable from the start")
            }
        }
    }
}

/// Everything the validation pass found.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Violations in detection order.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Whether the graph satisfied every invariant.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validate a generated maze.
pub fn validate(result: &MazeResult) -> ValidationReport {
    let graph = &result.graph;
    let mut report = ValidationReport::default();

    // Reciprocity.
    for (index, node) in graph.nodes().iter().enumerate() {
        let from = NodeId(index);
        for &to in &node.connections {
            if !graph.node(to).connections.contains(&from) {
                report.violations.push(Violation::Unreciprocated { from, to });
            }
        }
    }

    // One node per point.
    let mut seen: HashMap<PointId, NodeId> = HashMap::new();
    for (index, node) in graph.nodes().iter().enumerate() {
        let id = NodeId(index);
        if let Some(&first) = seen.get(&node.point) {
            report.violations.push(Violation::DuplicateNode {
                first,
                second: id,
                point: node.point,
            });
        } else {
            seen.insert(node.point, id);
        }
    }

    // Reachability from the start node.
    let reached = reachable_set(graph, graph.lookup(result.start));
    for index in 0..graph.len() {
        if !reached[index] {
            report
                .violations
                .push(Violation::Unreachable { node: NodeId(index) });
        }
    }

    debug!(violations = report.violations.len(), "validation complete");
    report
}

fn reachable_set(graph: &MazeGraph, start: Option<NodeId>) -> Vec<bool> {
    let mut reached = vec![false; graph.len()];
    let Some(start) = start else {
        return reached;
    };

    let mut queue = std::collections::VecDeque::new();
    reached[start.0] = true;
    queue.push_back(start);
    while let Some(node) = queue.pop_front() {
        for &next in &graph.node(node).connections {
            if !reached[next.0] {
                reached[next.0] = true;
                queue.push_back(next);
            }
        }
    }
    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FragmentKind, MazeConfig};
    use crate::generate_maze;
    use warren_grid::build_square;

    fn clean_result() -> MazeResult {
        let grid = build_square(4.0, 4.0, 1.0).unwrap();
        let config = MazeConfig::single(FragmentKind::Ring, "AAAAAAAA");
        generate_maze(&grid, (0, 0), &[], &config).unwrap()
    }

    #[test]
    fn clean_maze_passes() {
        let result = clean_result();
        let report = validate(&result);
        assert!(report.is_clean(), "violations: {:?}", report.violations);
    }

    #[test]
    fn unreachable_nodes_reported() {
        let mut result = clean_result();
        // An orphan node with no connections.
        result.graph.node_for(PointId::new(9, 9));

        let report = validate(&result);
        assert_eq!(report.violations.len(), 1);
        assert!(matches!(
            report.violations[0],
            Violation::Unreachable { .. }
        ));
    }

    #[test]
    fn missing_start_marks_everything_unreachable() {
        let mut result = clean_result();
        result.start = PointId::new(9, 9);

        let report = validate(&result);
        let unreachable = report
            .violations
            .iter()
            .filter(|v| matches!(v, Violation::Unreachable { .. }))
            .count();
        assert_eq!(unreachable, result.graph.len());
    }

    #[test]
    fn violations_render_readably() {
        let violation = Violation::Unreciprocated {
            from: NodeId(1),
            to: NodeId(2),
        };
        assert_eq!(violation.to_string(), "connection #1 -> #2 is not reciprocated");
    }
}
