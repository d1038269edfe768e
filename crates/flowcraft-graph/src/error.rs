//! Graph error types.

use derive_more::Display;
use thiserror::Error;

use crate::id::{EdgeId, NodeId};
use crate::node::NodeKind;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// An id named by an operation, used to report what could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Reference {
    /// A node id.
    #[display("node {_0}")]
    Node(NodeId),
    /// An edge id.
    #[display("edge {_0}")]
    Edge(EdgeId),
}

/// Errors returned by graph mutations.
///
/// All of these are recoverable: the graph is left exactly as it was before
/// the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The operation named a node or edge that is not in the graph.
    #[error("invalid reference: {0} does not exist")]
    InvalidReference(Reference),

    /// An edge was requested from a node to itself.
    #[error("node {0} cannot be connected to itself")]
    SelfLoop(NodeId),

    /// A config of a different kind was supplied for an existing node.
    #[error("node {node_id} is a {expected} node, got a {found} config")]
    KindMismatch {
        /// ID of the node being updated.
        node_id: NodeId,
        /// Kind the node was created with.
        expected: NodeKind,
        /// Kind of the rejected config.
        found: NodeKind,
    },

    /// An id appeared twice while rebuilding a graph from a snapshot.
    #[error("duplicate id: {0} appears more than once")]
    DuplicateId(Reference),
}

impl GraphError {
    /// Creates an invalid reference error for a node.
    pub(crate) const fn unknown_node(id: NodeId) -> Self {
        Self::InvalidReference(Reference::Node(id))
    }

    /// Creates an invalid reference error for an edge.
    pub(crate) const fn unknown_edge(id: EdgeId) -> Self {
        Self::InvalidReference(Reference::Edge(id))
    }

    /// Returns whether this error is an invalid reference.
    pub const fn is_invalid_reference(&self) -> bool {
        matches!(self, Self::InvalidReference(_))
    }
}
