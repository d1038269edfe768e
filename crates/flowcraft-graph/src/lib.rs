#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod edge;
mod error;
mod graph;
mod id;
mod node;
mod selection;
mod snapshot;
mod validation;

#[doc(hidden)]
pub mod prelude;

pub use edge::Edge;
pub use error::{GraphError, GraphResult, Reference};
pub use graph::WorkflowGraph;
pub use id::{EdgeId, NodeId};
pub use node::{
    ActionConfig, ConditionConfig, MessageConfig, Node, NodeConfig, NodeKind, Position,
    PromptConfig,
};
pub use selection::{Selection, Surface};
pub use snapshot::WorkflowSnapshot;
pub use validation::{InvalidReason, SaveValidator, Validation, ValidationMode};

/// Tracing target for graph operations.
pub const TRACING_TARGET: &str = "flowcraft_graph";
