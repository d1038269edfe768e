//! Structural check run before a workflow is saved.
//!
//! A workflow is modeled as rooted: one start node without incoming edges,
//! every other node entered through at least one edge. The default
//! [`ValidationMode::Counting`] rule approximates this by counting distinct
//! edge targets. [`ValidationMode::Strict`] additionally walks the graph from
//! its root and requires every node to be reached.

use std::collections::HashSet;

use petgraph::Direction;
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Bfs;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

use crate::id::NodeId;
use crate::snapshot::WorkflowSnapshot;

/// Tracing target for save validation.
const TRACING_TARGET: &str = "flowcraft_graph::validation";

/// How thoroughly a snapshot is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ValidationMode {
    /// More than one node, and exactly `N - 1` distinct edge targets.
    #[default]
    Counting,
    /// The counting rule, plus a single root from which every node is reachable.
    Strict,
}

/// Why a snapshot is not fit to be saved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReason {
    /// Empty and single-node workflows are never saved.
    #[error("workflow needs at least 2 nodes, found {count}")]
    TooFewNodes {
        /// Number of nodes in the snapshot.
        count: usize,
    },

    /// The number of distinct edge targets is not one less than the node count.
    #[error("expected {expected} connected nodes, found {found}")]
    UnconnectedNodes {
        /// Required number of distinct targets (`N - 1`).
        expected: usize,
        /// Distinct targets actually present.
        found: usize,
    },

    /// Every node has an incoming edge.
    #[error("workflow has no start node")]
    NoRoot,

    /// More than one node lacks an incoming edge.
    #[error("workflow has {} start nodes", .roots.len())]
    MultipleRoots {
        /// Nodes without incoming edges.
        roots: Vec<NodeId>,
    },

    /// Some nodes cannot be reached from the start node.
    #[error("{count} nodes are not reachable from the start node")]
    Unreachable {
        /// Number of unreachable nodes.
        count: usize,
    },
}

/// Outcome of a save validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The snapshot may be persisted.
    Valid,
    /// The snapshot must not be persisted.
    Invalid(InvalidReason),
}

impl Validation {
    /// Returns whether the snapshot passed.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the failure reason, if any.
    pub const fn reason(&self) -> Option<&InvalidReason> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(reason),
        }
    }

    /// Converts the outcome into a `Result`.
    pub fn into_result(self) -> Result<(), InvalidReason> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(reason) => Err(reason),
        }
    }
}

/// Decides whether a snapshot is structurally fit to persist.
///
/// Validation is pure: it only reads the snapshot and keeps no state between
/// calls, so every save re-checks the whole graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveValidator {
    mode: ValidationMode,
}

impl SaveValidator {
    /// Creates a validator with the given mode.
    pub const fn new(mode: ValidationMode) -> Self {
        Self { mode }
    }

    /// Creates a validator using the strict reachability check.
    pub const fn strict() -> Self {
        Self::new(ValidationMode::Strict)
    }

    /// Returns the validation mode.
    #[inline]
    pub const fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Validates a snapshot.
    pub fn validate(&self, snapshot: &WorkflowSnapshot) -> Validation {
        let outcome = match self.mode {
            ValidationMode::Counting => check_counting(snapshot),
            ValidationMode::Strict => {
                check_counting(snapshot).and_then(|()| check_reachability(snapshot))
            }
        };

        match outcome {
            Ok(()) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    mode = %self.mode,
                    node_count = snapshot.node_count(),
                    "Snapshot passed validation"
                );
                Validation::Valid
            }
            Err(reason) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    mode = %self.mode,
                    node_count = snapshot.node_count(),
                    reason = %reason,
                    "Snapshot failed validation"
                );
                Validation::Invalid(reason)
            }
        }
    }
}

/// Requires `N > 1` and exactly `N - 1` distinct edge targets.
fn check_counting(snapshot: &WorkflowSnapshot) -> Result<(), InvalidReason> {
    let count = snapshot.node_count();
    if count <= 1 {
        return Err(InvalidReason::TooFewNodes { count });
    }

    let found = snapshot.distinct_targets().len();
    let expected = count - 1;
    if found != expected {
        return Err(InvalidReason::UnconnectedNodes { expected, found });
    }

    Ok(())
}

/// Requires a single root from which a breadth-first walk visits every node.
fn check_reachability(snapshot: &WorkflowSnapshot) -> Result<(), InvalidReason> {
    let mut graph = DiGraphMap::<NodeId, ()>::with_capacity(
        snapshot.node_count(),
        snapshot.edge_count(),
    );
    for node in snapshot.nodes() {
        graph.add_node(node.id);
    }
    for edge in snapshot.edges() {
        graph.add_edge(edge.source, edge.target, ());
    }

    let roots: Vec<NodeId> = snapshot
        .nodes()
        .iter()
        .map(|node| node.id)
        .filter(|id| {
            graph
                .neighbors_directed(*id, Direction::Incoming)
                .next()
                .is_none()
        })
        .collect();

    let root = match roots.as_slice() {
        [] => return Err(InvalidReason::NoRoot),
        [root] => *root,
        _ => return Err(InvalidReason::MultipleRoots { roots }),
    };

    let mut reached = HashSet::new();
    let mut bfs = Bfs::new(&graph, root);
    while let Some(id) = bfs.next(&graph) {
        reached.insert(id);
    }

    let count = snapshot
        .nodes()
        .iter()
        .filter(|node| !reached.contains(&node.id))
        .count();
    if count > 0 {
        return Err(InvalidReason::Unreachable { count });
    }

    Ok(())
}
