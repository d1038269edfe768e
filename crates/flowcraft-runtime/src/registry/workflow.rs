//! Persisted workflow record.

use std::str::FromStr;

use derive_more::{Debug, Display, From, Into};
use flowcraft_graph::{Edge, Node, WorkflowSnapshot};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a saved workflow.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Debug, Display, From, Into)]
#[debug("{_0}")]
#[display("{_0}")]
#[serde(transparent)]
pub struct WorkflowId(Uuid);

impl WorkflowId {
    /// Creates a new random workflow ID.
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a workflow ID from an existing UUID.
    #[inline]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[inline]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for WorkflowId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for WorkflowId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// A named, saved workflow.
///
/// Serialized with camelCase keys:
/// `{ id, name, createdAt, updatedAt, nodeCount, nodes, edges }`.
/// `nodeCount` is recomputed from `nodes` when a record is read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredWorkflow")]
pub struct Workflow {
    id: WorkflowId,
    name: String,
    created_at: Timestamp,
    updated_at: Timestamp,
    node_count: usize,
    #[serde(flatten)]
    graph: WorkflowSnapshot,
}

/// Wire form of a [`Workflow`] without the cached node count.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWorkflow {
    id: WorkflowId,
    name: String,
    created_at: Timestamp,
    updated_at: Timestamp,
    #[serde(flatten)]
    graph: WorkflowSnapshot,
}

impl From<StoredWorkflow> for Workflow {
    fn from(stored: StoredWorkflow) -> Self {
        Self {
            id: stored.id,
            name: stored.name,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            node_count: stored.graph.node_count(),
            graph: stored.graph,
        }
    }
}

impl Workflow {
    /// Creates an empty workflow stamped with `now`.
    pub(crate) fn new(name: String, now: Timestamp) -> Self {
        Self {
            id: WorkflowId::new(),
            name,
            created_at: now,
            updated_at: now,
            node_count: 0,
            graph: WorkflowSnapshot::empty(),
        }
    }

    /// Replaces the saved graph and bumps `updated_at`.
    pub(crate) fn replace_graph(&mut self, graph: WorkflowSnapshot, now: Timestamp) {
        self.node_count = graph.node_count();
        self.graph = graph;
        self.updated_at = now;
    }

    /// Renames the workflow and bumps `updated_at`.
    pub(crate) fn rename(&mut self, name: String, now: Timestamp) {
        self.name = name;
        self.updated_at = now;
    }

    /// Returns the workflow id.
    #[inline]
    pub fn id(&self) -> WorkflowId {
        self.id
    }

    /// Returns the display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns when the workflow was created.
    #[inline]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the workflow was last changed.
    #[inline]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns the number of nodes as of the last save.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the saved graph.
    #[inline]
    pub fn snapshot(&self) -> &WorkflowSnapshot {
        &self.graph
    }

    /// Returns the saved nodes.
    pub fn nodes(&self) -> &[Node] {
        self.graph.nodes()
    }

    /// Returns the saved edges.
    pub fn edges(&self) -> &[Edge] {
        self.graph.edges()
    }

    /// Returns the date of the last change as `YYYY-MM-DD` (UTC).
    pub fn updated_label(&self) -> String {
        self.updated_at.strftime("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use flowcraft_graph::{NodeConfig, WorkflowGraph};

    use super::*;

    fn timestamp(s: &str) -> Timestamp {
        s.parse().expect("valid timestamp")
    }

    #[test]
    fn test_new_workflow_is_empty() {
        let now = timestamp("2024-05-01T10:00:00Z");
        let workflow = Workflow::new("Demo".into(), now);

        assert_eq!(workflow.name(), "Demo");
        assert_eq!(workflow.node_count(), 0);
        assert!(workflow.nodes().is_empty());
        assert_eq!(workflow.created_at(), now);
        assert_eq!(workflow.updated_at(), now);
    }

    #[test]
    fn test_record_shape() {
        let now = timestamp("2024-05-01T10:00:00Z");
        let workflow = Workflow::new("Demo".into(), now);
        let json = serde_json::to_value(&workflow).expect("serialization failed");

        assert_eq!(json["id"], workflow.id().to_string());
        assert_eq!(json["name"], "Demo");
        assert_eq!(json["createdAt"], "2024-05-01T10:00:00Z");
        assert_eq!(json["updatedAt"], "2024-05-01T10:00:00Z");
        assert_eq!(json["nodeCount"], 0);
        assert!(json["nodes"].as_array().is_some_and(Vec::is_empty));
    }

    #[test]
    fn test_replace_graph_updates_count_and_timestamp() {
        let created = timestamp("2024-05-01T10:00:00Z");
        let saved = timestamp("2024-05-03T08:30:00Z");
        let mut workflow = Workflow::new("Demo".into(), created);

        let mut graph = WorkflowGraph::new();
        let a = graph.add_node(NodeConfig::message("a"), Default::default());
        let b = graph.add_node(NodeConfig::message("b"), Default::default());
        graph.connect(a, b).expect("valid edge");

        workflow.replace_graph(graph.snapshot(), saved);
        assert_eq!(workflow.node_count(), 2);
        assert_eq!(workflow.edges().len(), 1);
        assert_eq!(workflow.created_at(), created);
        assert_eq!(workflow.updated_at(), saved);
        assert_eq!(workflow.updated_label(), "2024-05-03");

        let json = serde_json::to_string(&workflow).expect("serialization failed");
        let back: Workflow = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(back, workflow);
    }

    #[test]
    fn test_node_count_is_derived_on_load() {
        let json = r#"{
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "name": "Corrupt",
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z",
            "nodeCount": 5,
            "nodes": [],
            "edges": []
        }"#;

        let workflow: Workflow = serde_json::from_str(json).expect("deserialization failed");
        assert_eq!(workflow.node_count(), 0);
        assert!(workflow.nodes().is_empty());
    }
}
