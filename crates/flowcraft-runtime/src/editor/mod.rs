//! Editing sessions.
//!
//! - [`Editor`]: one workflow's live graph, its toasts and the save flow
//! - [`EditorConfig`]: configuration options

mod config;
mod session;

pub use config::{DEFAULT_SUCCESS_MESSAGE, EditorConfig, EditorConfigBuilder, SAVE_FAILED_MESSAGE};
pub use session::Editor;
