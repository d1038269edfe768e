//! Selection state of the editor.
//!
//! At most one node is selected at a time. The selection decides which
//! editing surface the host shows: the canvas when nothing is selected,
//! or the settings panel of the selected node.

use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// Which node, if any, is being edited.
///
/// Only [`WorkflowGraph`] changes the selection it owns; everything else gets
/// a copy through [`WorkflowGraph::selection`].
///
/// [`WorkflowGraph`]: crate::WorkflowGraph
/// [`WorkflowGraph::selection`]: crate::WorkflowGraph::selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "node_id", rename_all = "snake_case")]
pub enum Selection {
    /// No node selected.
    #[default]
    Idle,
    /// The settings of this node are being edited.
    Editing(NodeId),
}

/// Editing surface the host should present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// The workflow canvas with the message palette.
    Canvas,
    /// The settings panel of the given node.
    NodeSettings(NodeId),
}

impl Selection {
    /// Returns the selected node, if any.
    #[inline]
    pub const fn node_id(&self) -> Option<NodeId> {
        match self {
            Self::Idle => None,
            Self::Editing(id) => Some(*id),
        }
    }

    /// Returns whether no node is selected.
    #[inline]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns whether the given node is selected.
    #[inline]
    pub fn is_editing(&self, node: NodeId) -> bool {
        *self == Self::Editing(node)
    }

    /// Returns the surface the host should show for this selection.
    pub const fn surface(&self) -> Surface {
        match self {
            Self::Idle => Surface::Canvas,
            Self::Editing(id) => Surface::NodeSettings(*id),
        }
    }

    /// Moves to `Editing(id)` or back to `Idle`.
    pub(crate) fn set(&mut self, node: Option<NodeId>) {
        *self = match node {
            Some(id) => Self::Editing(id),
            None => Self::Idle,
        };
    }

    /// Falls back to `Idle` if the removed node was selected.
    ///
    /// Returns whether the selection changed.
    pub(crate) fn release(&mut self, removed: NodeId) -> bool {
        if self.is_editing(removed) {
            *self = Self::Idle;
            return true;
        }
        false
    }
}

impl From<Option<NodeId>> for Selection {
    fn from(node: Option<NodeId>) -> Self {
        let mut selection = Self::Idle;
        selection.set(node);
        selection
    }
}
