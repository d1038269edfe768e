//! Persistence media for the workflow registry.
//!
//! A store reads and writes the whole collection at once, the same way the
//! editor keeps every workflow under a single `workflows` key.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::workflow::Workflow;
use crate::error::Result;

/// Tracing target for store operations.
const TRACING_TARGET: &str = "flowcraft_runtime::store";

/// File name used by [`JsonFileStore::in_dir`].
const DEFAULT_FILE_NAME: &str = "workflows.json";

/// Durable medium holding the workflow collection.
pub trait WorkflowStore: fmt::Debug {
    /// Reads the stored collection. A medium with nothing stored yields an
    /// empty list.
    fn load(&self) -> Result<Vec<Workflow>>;

    /// Replaces the stored collection.
    fn persist(&mut self, workflows: &[Workflow]) -> Result<()>;
}

/// Keeps the collection in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    workflows: Vec<Workflow>,
}

impl MemoryStore {
    /// Creates a store preloaded with workflows.
    pub fn with_workflows(workflows: Vec<Workflow>) -> Self {
        Self { workflows }
    }
}

impl WorkflowStore for MemoryStore {
    fn load(&self) -> Result<Vec<Workflow>> {
        Ok(self.workflows.clone())
    }

    fn persist(&mut self, workflows: &[Workflow]) -> Result<()> {
        self.workflows = workflows.to_vec();
        Ok(())
    }
}

/// Stores the collection as a JSON array in a single file.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a failed write leaves the previous contents in place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store backed by `workflows.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    /// Returns the backing file path.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl WorkflowStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Workflow>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    path = %self.path.display(),
                    "No stored workflows yet"
                );
                return Ok(Vec::new());
            }
            Err(error) => return Err(error.into()),
        };

        let workflows: Vec<Workflow> = serde_json::from_str(&contents)?;
        tracing::debug!(
            target: TRACING_TARGET,
            path = %self.path.display(),
            count = workflows.len(),
            "Workflows loaded"
        );
        Ok(workflows)
    }

    fn persist(&mut self, workflows: &[Workflow]) -> Result<()> {
        let contents = serde_json::to_string_pretty(workflows)?;
        let temp = self.temp_path();

        fs::write(&temp, contents)?;
        fs::rename(&temp, &self.path)?;

        tracing::trace!(
            target: TRACING_TARGET,
            path = %self.path.display(),
            count = workflows.len(),
            "Workflows persisted"
        );
        Ok(())
    }
}
