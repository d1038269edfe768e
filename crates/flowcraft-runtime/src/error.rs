//! Runtime error types.

use flowcraft_graph::{GraphError, InvalidReason};
use thiserror::Error;

use crate::registry::WorkflowId;

/// Result type for runtime operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the registry and the editor.
///
/// None of these are fatal: the failing call has no effect and the caller
/// can keep going.
#[derive(Debug, Error)]
pub enum Error {
    /// A graph mutation was rejected.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Save was attempted on a structurally incomplete graph.
    #[error("workflow failed validation: {0}")]
    ValidationFailed(InvalidReason),

    /// A workflow name was empty or only whitespace.
    #[error("workflow name must not be empty")]
    EmptyName,

    /// The registry has no workflow with this id.
    #[error("workflow {0} does not exist")]
    UnknownWorkflow(WorkflowId),

    /// The persistence medium failed.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A stored collection could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Editor configuration is invalid.
    #[error("invalid editor config: {0}")]
    InvalidConfig(String),
}
