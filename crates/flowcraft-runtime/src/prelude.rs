//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use flowcraft_runtime::prelude::*;
//! ```

pub use flowcraft_graph::prelude::*;
pub use flowcraft_notify::prelude::*;

pub use crate::editor::{Editor, EditorConfig};
pub use crate::error::{Error, Result};
pub use crate::registry::{
    JsonFileStore, MemoryStore, Workflow, WorkflowId, WorkflowRegistry, WorkflowStore,
};
