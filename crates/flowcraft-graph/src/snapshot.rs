//! Immutable copies of a workflow graph.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::edge::Edge;
use crate::id::NodeId;
use crate::node::Node;

/// Owned copy of a graph's nodes and edges at one point in time.
///
/// Snapshots share nothing with the graph they were taken from. Nodes and
/// edges keep the order they were created in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl WorkflowSnapshot {
    /// Creates a snapshot from nodes and edges.
    ///
    /// No invariant is checked here; rebuild a [`WorkflowGraph`] from the
    /// snapshot to verify it.
    ///
    /// [`WorkflowGraph`]: crate::WorkflowGraph
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Returns an empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the nodes in creation order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the edges in creation order.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the snapshot has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Returns the distinct ids that appear as an edge target.
    pub fn distinct_targets(&self) -> HashSet<NodeId> {
        self.edges.iter().map(|edge| edge.target).collect()
    }

    /// Splits the snapshot into its nodes and edges.
    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }
}
