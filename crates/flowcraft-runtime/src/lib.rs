#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod editor;
mod error;
mod registry;

#[doc(hidden)]
pub mod prelude;

pub use editor::{
    DEFAULT_SUCCESS_MESSAGE, Editor, EditorConfig, EditorConfigBuilder, SAVE_FAILED_MESSAGE,
};
pub use error::{Error, Result};
pub use registry::{
    JsonFileStore, MemoryStore, Workflow, WorkflowId, WorkflowRegistry, WorkflowStore,
};

/// Tracing target for runtime operations.
pub const TRACING_TARGET: &str = "flowcraft_runtime";
