//! Live workflow graph being edited.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;

use crate::edge::Edge;
use crate::error::{GraphError, GraphResult, Reference};
use crate::id::{EdgeId, NodeId};
use crate::node::{Node, NodeConfig, Position};
use crate::selection::Selection;
use crate::snapshot::WorkflowSnapshot;

/// Tracing target for graph mutations.
const TRACING_TARGET: &str = "flowcraft_graph::graph";

/// The workflow graph currently being edited, plus its selection.
///
/// Every public mutation either applies completely or returns an error and
/// leaves the graph untouched. After each call:
/// - every edge's source and target are nodes of this graph,
/// - no edge goes from a node to itself,
/// - node ids and edge ids are unique,
/// - the selection, if any, names a node of this graph.
///
/// Internally uses petgraph's `StableDiGraph`, so removing a node never
/// invalidates the indices of the remaining ones.
#[derive(Debug, Clone, Default)]
pub struct WorkflowGraph {
    /// The underlying directed graph. Edge weights are the edge ids.
    graph: StableDiGraph<Node, EdgeId>,
    /// Mapping from NodeId to petgraph's NodeIndex.
    node_indices: HashMap<NodeId, NodeIndex>,
    /// Mapping from EdgeId to petgraph's EdgeIndex.
    edge_indices: HashMap<EdgeId, EdgeIndex>,
    /// Node ids in creation order.
    node_order: Vec<NodeId>,
    /// Edge ids in creation order.
    edge_order: Vec<EdgeId>,
    selection: Selection,
}

impl WorkflowGraph {
    /// Creates a new empty workflow graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a live graph from a snapshot.
    ///
    /// Node and edge ids are preserved. Fails if the snapshot repeats an id,
    /// has an edge with an unknown endpoint, or has a self-loop.
    pub fn from_snapshot(snapshot: &WorkflowSnapshot) -> GraphResult<Self> {
        let mut graph = Self::new();

        for node in snapshot.nodes() {
            if graph.contains_node(node.id) {
                return Err(GraphError::DuplicateId(Reference::Node(node.id)));
            }
            graph.insert_node(node.clone());
        }

        for edge in snapshot.edges() {
            if graph.contains_edge(edge.id) {
                return Err(GraphError::DuplicateId(Reference::Edge(edge.id)));
            }
            graph.insert_edge(edge.id, edge.source, edge.target)?;
        }

        tracing::debug!(
            target: TRACING_TARGET,
            node_count = graph.node_count(),
            edge_count = graph.edge_count(),
            "Graph restored from snapshot"
        );

        Ok(graph)
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns whether the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Adds a node and returns its freshly assigned id.
    pub fn add_node(&mut self, config: impl Into<NodeConfig>, position: Position) -> NodeId {
        let node = Node::new(NodeId::new(), config, position);
        let id = node.id;
        let kind = node.kind();
        self.insert_node(node);

        tracing::debug!(
            target: TRACING_TARGET,
            node_id = %id,
            kind = %kind,
            node_count = self.node_count(),
            "Node added"
        );

        id
    }

    /// Removes a node together with every edge that starts or ends at it.
    ///
    /// Clears the selection if it pointed at this node. Unknown ids are
    /// ignored and return `None`.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let index = self.node_indices.remove(&id)?;

        let incident: Vec<EdgeId> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .chain(self.graph.edges_directed(index, Direction::Incoming))
            .map(|edge_ref| *edge_ref.weight())
            .collect();

        for edge_id in &incident {
            self.edge_indices.remove(edge_id);
        }
        self.edge_order.retain(|edge_id| !incident.contains(edge_id));
        self.node_order.retain(|node_id| *node_id != id);

        let cleared = self.selection.release(id);
        let node = self.graph.remove_node(index);

        tracing::debug!(
            target: TRACING_TARGET,
            node_id = %id,
            removed_edges = incident.len(),
            selection_cleared = cleared,
            "Node removed"
        );

        node
    }

    /// Replaces the configuration of an existing node.
    ///
    /// The node keeps its kind: a config of another kind is rejected.
    pub fn update_node(&mut self, id: NodeId, config: impl Into<NodeConfig>) -> GraphResult<()> {
        let config = config.into();
        let node = self.node_mut(id)?;

        if node.kind() != config.kind() {
            return Err(GraphError::KindMismatch {
                node_id: id,
                expected: node.kind(),
                found: config.kind(),
            });
        }

        node.config = config;
        tracing::trace!(target: TRACING_TARGET, node_id = %id, "Node config updated");
        Ok(())
    }

    /// Stores a new canvas position for a node.
    pub fn move_node(&mut self, id: NodeId, position: Position) -> GraphResult<()> {
        self.node_mut(id)?.position = position;
        Ok(())
    }

    /// Creates an edge from `source` to `target` and returns its id.
    ///
    /// Parallel edges between the same pair are allowed and kept apart.
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> GraphResult<EdgeId> {
        let id = EdgeId::new();
        self.insert_edge(id, source, target).inspect_err(|error| {
            tracing::debug!(
                target: TRACING_TARGET,
                source = %source,
                target_node = %target,
                error = %error,
                "Connection rejected"
            );
        })?;

        tracing::debug!(
            target: TRACING_TARGET,
            edge_id = %id,
            source = %source,
            target_node = %target,
            "Nodes connected"
        );

        Ok(id)
    }

    /// Removes an edge. Unknown ids are ignored and return `None`.
    pub fn disconnect(&mut self, id: EdgeId) -> Option<Edge> {
        let index = self.edge_indices.remove(&id)?;
        let edge = self.edge_at(index);
        self.graph.remove_edge(index);
        self.edge_order.retain(|edge_id| *edge_id != id);

        tracing::debug!(target: TRACING_TARGET, edge_id = %id, "Edge removed");
        edge
    }

    /// Selects a node, or clears the selection with `None`.
    pub fn select(&mut self, node: Option<NodeId>) -> GraphResult<()> {
        if let Some(id) = node
            && !self.contains_node(id)
        {
            return Err(GraphError::unknown_node(id));
        }

        self.selection.set(node);
        tracing::trace!(target: TRACING_TARGET, selection = ?self.selection, "Selection changed");
        Ok(())
    }

    /// Returns the current selection.
    #[inline]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Returns the selected node, if any.
    pub fn selected_node(&self) -> Option<&Node> {
        self.selection.node_id().and_then(|id| self.node(id))
    }

    /// Returns an owned copy of the nodes and edges.
    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot::new(self.nodes().cloned().collect(), self.edges().collect())
    }

    /// Returns a reference to a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        let index = self.node_indices.get(&id)?;
        self.graph.node_weight(*index)
    }

    /// Returns an edge.
    pub fn edge(&self, id: EdgeId) -> Option<Edge> {
        let index = self.edge_indices.get(&id)?;
        self.edge_at(*index)
    }

    /// Returns whether a node exists.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_indices.contains_key(&id)
    }

    /// Returns whether an edge exists.
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge_indices.contains_key(&id)
    }

    /// Returns an iterator over all nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.node_order.iter().filter_map(|id| self.node(*id))
    }

    /// Returns an iterator over all edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edge_order.iter().filter_map(|id| self.edge(*id))
    }

    /// Returns edges originating from a node.
    pub fn outgoing(&self, id: NodeId) -> Vec<Edge> {
        self.edges_directed(id, Direction::Outgoing)
    }

    /// Returns edges targeting a node.
    pub fn incoming(&self, id: NodeId) -> Vec<Edge> {
        self.edges_directed(id, Direction::Incoming)
    }

    /// Returns the nodes without incoming edges, in creation order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.node_order
            .iter()
            .copied()
            .filter(|id| {
                self.node_indices.get(id).is_some_and(|index| {
                    self.graph
                        .edges_directed(*index, Direction::Incoming)
                        .next()
                        .is_none()
                })
            })
            .collect()
    }

    fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut Node> {
        let index = self
            .node_indices
            .get(&id)
            .ok_or(GraphError::unknown_node(id))?;
        self.graph
            .node_weight_mut(*index)
            .ok_or(GraphError::unknown_node(id))
    }

    fn insert_node(&mut self, node: Node) {
        let id = node.id;
        let index = self.graph.add_node(node);
        self.node_indices.insert(id, index);
        self.node_order.push(id);
    }

    fn insert_edge(&mut self, id: EdgeId, source: NodeId, target: NodeId) -> GraphResult<()> {
        let source_index = *self
            .node_indices
            .get(&source)
            .ok_or(GraphError::unknown_node(source))?;
        let target_index = *self
            .node_indices
            .get(&target)
            .ok_or(GraphError::unknown_node(target))?;

        if source == target {
            return Err(GraphError::SelfLoop(source));
        }

        let index = self.graph.add_edge(source_index, target_index, id);
        self.edge_indices.insert(id, index);
        self.edge_order.push(id);
        Ok(())
    }

    fn edge_at(&self, index: EdgeIndex) -> Option<Edge> {
        let id = *self.graph.edge_weight(index)?;
        let (source, target) = self.graph.edge_endpoints(index)?;
        Some(Edge::new(
            id,
            self.graph.node_weight(source)?.id,
            self.graph.node_weight(target)?.id,
        ))
    }

    fn edges_directed(&self, id: NodeId, direction: Direction) -> Vec<Edge> {
        let Some(index) = self.node_indices.get(&id) else {
            return Vec::new();
        };

        let mut edges: Vec<Edge> = self
            .graph
            .edges_directed(*index, direction)
            .filter_map(|edge_ref| self.edge_at(edge_ref.id()))
            .collect();
        edges.sort_by_key(|edge| self.edge_position(edge.id));
        edges
    }

    fn edge_position(&self, id: EdgeId) -> usize {
        self.edge_order
            .iter()
            .position(|edge_id| *edge_id == id)
            .unwrap_or(usize::MAX)
    }
}
