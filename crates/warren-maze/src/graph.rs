//! The maze connectivity graph.
//!
//! An arena of nodes addressed by index handle, with adjacency stored as
//! index lists - no reference cycles to manage. One node exists per
//! distinct [`PointId`]; [`MazeGraph::node_for`] deduplicates, and
//! [`MazeGraph::connect`] always writes both directions, so reciprocity
//! holds by construction. Nodes are never removed mid-generation.

use std::collections::HashMap;

use warren_grid::PointId;

/// Handle to a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One carved point and its traversal connections.
#[derive(Debug, Clone)]
pub struct GraphNode {
    /// The lattice point this node stands on.
    pub point: PointId,
    /// Mutually-reciprocated traversal edges.
    pub connections: Vec<NodeId>,
}

/// Arena of [`GraphNode`]s indexed by [`NodeId`].
#[derive(Debug, Clone, Default)]
pub struct MazeGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<PointId, NodeId>,
}

impl MazeGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the node standing on `point`, creating it if absent.
    pub fn node_for(&mut self, point: PointId) -> NodeId {
        if let Some(&id) = self.index.get(&point) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(GraphNode {
            point,
            connections: Vec::new(),
        });
        self.index.insert(point, id);
        id
    }

    /// Look up the node standing on `point`, if any.
    pub fn lookup(&self, point: PointId) -> Option<NodeId> {
        self.index.get(&point).copied()
    }

    /// The node behind a handle.
    ///
    /// Handles are only ever minted by this arena, so indexing is safe
    /// for any id the caller did not fabricate.
    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id.0]
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.connections.len()).sum::<usize>() / 2
    }

    /// Degree of a node.
    pub fn degree(&self, id: NodeId) -> usize {
        self.nodes[id.0].connections.len()
    }

    /// Whether an edge exists between two nodes.
    pub fn are_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.nodes[a.0].connections.contains(&b)
    }

    /// Wire an undirected edge. Reciprocates, ignores self-edges, and is
    /// idempotent.
    pub fn connect(&mut self, a: NodeId, b: NodeId) {
        if a == b || self.are_connected(a, b) {
            return;
        }
        self.nodes[a.0].connections.push(b);
        self.nodes[b.0].connections.push(a);
    }
}
