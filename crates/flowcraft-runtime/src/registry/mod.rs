//! Collection of saved workflows.

mod store;
mod workflow;

use std::sync::Arc;

use flowcraft_graph::WorkflowSnapshot;
use flowcraft_notify::{Clock, SystemClock};

pub use self::store::{JsonFileStore, MemoryStore, WorkflowStore};
pub use self::workflow::{Workflow, WorkflowId};
use crate::error::{Error, Result};

/// Tracing target for registry operations.
const TRACING_TARGET: &str = "flowcraft_runtime::registry";

/// Named workflows in creation order, written through to a [`WorkflowStore`].
///
/// Every mutation persists the complete collection before it takes effect in
/// memory. If the store fails, the registry keeps its previous contents.
#[derive(Debug)]
pub struct WorkflowRegistry<S = MemoryStore> {
    store: S,
    workflows: Vec<Workflow>,
    clock: Arc<dyn Clock>,
}

impl<S: WorkflowStore> WorkflowRegistry<S> {
    /// Loads the registry from a store, stamping changes with `clock`.
    pub fn open(store: S, clock: Arc<dyn Clock>) -> Result<Self> {
        let workflows = store.load()?;

        tracing::debug!(
            target: TRACING_TARGET,
            count = workflows.len(),
            "Workflow registry opened"
        );

        Ok(Self {
            store,
            workflows,
            clock,
        })
    }

    /// Loads the registry from a store using the system clock.
    pub fn with_store(store: S) -> Result<Self> {
        Self::open(store, Arc::new(SystemClock))
    }

    /// Creates an empty workflow and returns it.
    ///
    /// Leading and trailing whitespace is trimmed from the name; a name that
    /// is empty after trimming is rejected.
    pub fn create(&mut self, name: impl AsRef<str>) -> Result<Workflow> {
        let name = valid_name(name.as_ref())?;
        let workflow = Workflow::new(name, self.clock.now());

        let mut next = self.workflows.clone();
        next.push(workflow.clone());
        self.commit(next)?;

        tracing::info!(
            target: TRACING_TARGET,
            workflow_id = %workflow.id(),
            name = workflow.name(),
            "Workflow created"
        );

        Ok(workflow)
    }

    /// Returns all workflows in creation order.
    #[inline]
    pub fn list(&self) -> &[Workflow] {
        &self.workflows
    }

    /// Returns the workflow with the given id.
    pub fn get(&self, id: WorkflowId) -> Option<&Workflow> {
        self.workflows.iter().find(|workflow| workflow.id() == id)
    }

    /// Returns the number of workflows.
    #[inline]
    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    /// Returns whether the registry holds no workflows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    /// Deletes a workflow. Unknown ids are ignored and return `None`.
    pub fn delete(&mut self, id: WorkflowId) -> Result<Option<Workflow>> {
        let Some(position) = self.position(id) else {
            return Ok(None);
        };

        let mut next = self.workflows.clone();
        let removed = next.remove(position);
        self.commit(next)?;

        tracing::info!(target: TRACING_TARGET, workflow_id = %id, "Workflow deleted");
        Ok(Some(removed))
    }

    /// Renames a workflow.
    pub fn rename(&mut self, id: WorkflowId, name: impl AsRef<str>) -> Result<Workflow> {
        let name = valid_name(name.as_ref())?;
        let now = self.clock.now();
        self.update(id, |workflow| workflow.rename(name, now))
    }

    /// Overwrites the saved graph of a workflow and bumps its update time.
    ///
    /// Callers validate the snapshot first; the registry stores whatever
    /// it is given.
    pub fn save(&mut self, id: WorkflowId, snapshot: WorkflowSnapshot) -> Result<Workflow> {
        let now = self.clock.now();
        let node_count = snapshot.node_count();
        let workflow = self.update(id, |workflow| workflow.replace_graph(snapshot, now))?;

        tracing::info!(
            target: TRACING_TARGET,
            workflow_id = %id,
            node_count,
            "Workflow saved"
        );

        Ok(workflow)
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn update(&mut self, id: WorkflowId, apply: impl FnOnce(&mut Workflow)) -> Result<Workflow> {
        let position = self.position(id).ok_or(Error::UnknownWorkflow(id))?;

        let mut next = self.workflows.clone();
        apply(&mut next[position]);
        let workflow = next[position].clone();
        self.commit(next)?;

        Ok(workflow)
    }

    fn commit(&mut self, next: Vec<Workflow>) -> Result<()> {
        self.store.persist(&next).inspect_err(|error| {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                "Failed to persist workflows, keeping previous state"
            );
        })?;
        self.workflows = next;
        Ok(())
    }

    fn position(&self, id: WorkflowId) -> Option<usize> {
        self.workflows.iter().position(|workflow| workflow.id() == id)
    }
}

/// Trims a workflow name, rejecting blank ones.
fn valid_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        tracing::debug!(target: TRACING_TARGET, "Rejected blank workflow name");
        return Err(Error::EmptyName);
    }
    Ok(trimmed.to_owned())
}
