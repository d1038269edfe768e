//! Edge type for connecting nodes in a workflow graph.

use serde::{Deserialize, Serialize};

use crate::id::{EdgeId, NodeId};

/// A directed transition from one node to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Stable edge id, assigned when the edge is created.
    pub id: EdgeId,
    /// Source node ID.
    pub source: NodeId,
    /// Target node ID.
    pub target: NodeId,
}

impl Edge {
    /// Creates a new edge between two nodes.
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self { id, source, target }
    }

    /// Returns whether either endpoint is the given node.
    #[inline]
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}
