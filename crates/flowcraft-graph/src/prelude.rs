//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use flowcraft_graph::prelude::*;
//! ```

pub use crate::error::{GraphError, GraphResult};
pub use crate::{
    Edge, EdgeId, Node, NodeConfig, NodeId, NodeKind, Position, SaveValidator, Selection,
    Surface, Validation, ValidationMode, WorkflowGraph, WorkflowSnapshot,
};
