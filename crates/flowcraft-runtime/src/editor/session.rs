//! Editing session for a single workflow.

use std::sync::Arc;

use flowcraft_graph::{
    SaveValidator, Selection, Surface, Validation, WorkflowGraph, WorkflowSnapshot,
};
use flowcraft_notify::{Clock, NotificationQueue, Toast, ToastId};

use super::config::{EditorConfig, SAVE_FAILED_MESSAGE};
use crate::error::{Error, Result};
use crate::registry::{Workflow, WorkflowId, WorkflowRegistry, WorkflowStore};

/// Tracing target for editing sessions.
const TRACING_TARGET: &str = "flowcraft_runtime::editor";

/// An open workflow: its live graph, the selection, and the toasts raised
/// while editing it.
///
/// Graph edits go through [`graph_mut`](Self::graph_mut). Nothing reaches the
/// registry until [`save`](Self::save) succeeds.
#[derive(Debug)]
pub struct Editor {
    workflow_id: WorkflowId,
    graph: WorkflowGraph,
    notifications: NotificationQueue,
    validator: SaveValidator,
    config: EditorConfig,
}

impl Editor {
    /// Starts a blank session bound to a registry entry.
    pub fn new(
        config: EditorConfig,
        clock: Arc<dyn Clock>,
        workflow_id: WorkflowId,
    ) -> Result<Self> {
        Self::with_graph(config, clock, workflow_id, WorkflowGraph::new())
    }

    /// Opens a session on the saved graph of a registry entry.
    pub fn open<S: WorkflowStore>(
        config: EditorConfig,
        clock: Arc<dyn Clock>,
        registry: &WorkflowRegistry<S>,
        workflow_id: WorkflowId,
    ) -> Result<Self> {
        let workflow = registry
            .get(workflow_id)
            .ok_or(Error::UnknownWorkflow(workflow_id))?;
        let graph = WorkflowGraph::from_snapshot(workflow.snapshot())?;
        Self::with_graph(config, clock, workflow_id, graph)
    }

    fn with_graph(
        config: EditorConfig,
        clock: Arc<dyn Clock>,
        workflow_id: WorkflowId,
        graph: WorkflowGraph,
    ) -> Result<Self> {
        config.validate()?;

        tracing::debug!(
            target: TRACING_TARGET,
            workflow_id = %workflow_id,
            node_count = graph.node_count(),
            validation_mode = %config.validation_mode,
            "Editor opened"
        );

        Ok(Self {
            workflow_id,
            graph,
            notifications: NotificationQueue::with_ttl(clock, config.toast_ttl()),
            validator: SaveValidator::new(config.validation_mode),
            config,
        })
    }

    /// Returns the workflow this session edits.
    #[inline]
    pub fn workflow_id(&self) -> WorkflowId {
        self.workflow_id
    }

    /// Returns the live graph.
    #[inline]
    pub fn graph(&self) -> &WorkflowGraph {
        &self.graph
    }

    /// Returns the live graph for editing.
    #[inline]
    pub fn graph_mut(&mut self) -> &mut WorkflowGraph {
        &mut self.graph
    }

    /// Returns the current selection.
    #[inline]
    pub fn selection(&self) -> Selection {
        self.graph.selection()
    }

    /// Returns the surface the host should present.
    #[inline]
    pub fn surface(&self) -> Surface {
        self.graph.selection().surface()
    }

    /// Returns a detached copy of the live graph.
    pub fn snapshot(&self) -> WorkflowSnapshot {
        self.graph.snapshot()
    }

    /// Returns the visible toasts, oldest first.
    #[inline]
    pub fn notifications(&self) -> &[Toast] {
        self.notifications.toasts()
    }

    /// Returns the notification queue.
    #[inline]
    pub fn notification_queue(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Dismisses a toast before it expires.
    pub fn dismiss(&mut self, id: ToastId) -> Option<Toast> {
        self.notifications.dismiss(id)
    }

    /// Removes every toast.
    pub fn clear_notifications(&mut self) {
        self.notifications.clear_all();
    }

    /// Expires due toasts and returns their ids.
    pub fn tick(&mut self) -> Vec<ToastId> {
        self.notifications.tick()
    }

    /// Returns the session configuration.
    #[inline]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Validates the live graph and, if it passes, writes it to the registry.
    ///
    /// The outcome is always reported as a toast. A rejected graph leaves the
    /// registry untouched and returns [`Error::ValidationFailed`].
    pub fn save<S: WorkflowStore>(
        &mut self,
        registry: &mut WorkflowRegistry<S>,
    ) -> Result<Workflow> {
        let snapshot = self.graph.snapshot();

        if let Validation::Invalid(reason) = self.validator.validate(&snapshot) {
            tracing::info!(
                target: TRACING_TARGET,
                workflow_id = %self.workflow_id,
                reason = %reason,
                "Save rejected"
            );
            self.notifications.error(SAVE_FAILED_MESSAGE);
            return Err(Error::ValidationFailed(reason));
        }

        match registry.save(self.workflow_id, snapshot) {
            Ok(workflow) => {
                self.notifications.success(self.config.success_message.as_str());
                Ok(workflow)
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    workflow_id = %self.workflow_id,
                    error = %error,
                    "Save failed"
                );
                self.notifications.error(error.to_string());
                Err(error)
            }
        }
    }

    /// Ends the session and returns the final graph.
    ///
    /// Pending toast expiries are dropped with the queue.
    pub fn close(self) -> WorkflowSnapshot {
        tracing::debug!(
            target: TRACING_TARGET,
            workflow_id = %self.workflow_id,
            pending_toasts = self.notifications.len(),
            "Editor closed"
        );
        self.graph.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use flowcraft_graph::{GraphError, InvalidReason, NodeConfig, Position, ValidationMode};
    use flowcraft_notify::{ManualClock, Severity};
    use jiff::SignedDuration;

    use super::*;
    use crate::editor::EditorConfigBuilder;
    use crate::registry::MemoryStore;

    struct Fixture {
        clock: Arc<ManualClock>,
        registry: WorkflowRegistry,
        editor: Editor,
    }

    fn fixture(config: EditorConfig) -> Fixture {
        let clock = Arc::new(ManualClock::default());
        let mut registry = WorkflowRegistry::open(MemoryStore::default(), clock.clone()).unwrap();
        let workflow = registry.create("Demo").unwrap();
        let editor = Editor::new(config, clock.clone(), workflow.id()).unwrap();
        Fixture {
            clock,
            registry,
            editor,
        }
    }

    fn message(text: &str) -> NodeConfig {
        NodeConfig::message(text)
    }

    #[test]
    fn test_new_session_is_blank() {
        let Fixture { editor, .. } = fixture(EditorConfig::default());
        assert!(editor.graph().is_empty());
        assert_eq!(editor.selection(), Selection::Idle);
        assert_eq!(editor.surface(), Surface::Canvas);
        assert!(editor.notifications().is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let clock = Arc::new(ManualClock::default());
        let config = EditorConfig {
            toast_ttl_ms: 0,
            ..EditorConfig::default()
        };
        assert!(matches!(
            Editor::new(config, clock, WorkflowId::new()),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_save_single_node_is_rejected() {
        let Fixture {
            mut registry,
            mut editor,
            ..
        } = fixture(EditorConfig::default());
        editor.graph_mut().add_node(message("A"), Position::default());

        let result = editor.save(&mut registry);
        assert!(matches!(
            result,
            Err(Error::ValidationFailed(InvalidReason::TooFewNodes { count: 1 }))
        ));

        let toasts = editor.notifications();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Error);
        assert_eq!(
            toasts[0].message,
            "Cannot save flow. Ensure all nodes are connected."
        );

        let stored = &registry.list()[0];
        assert_eq!(stored.node_count(), 0);
        assert!(stored.nodes().is_empty());
    }

    #[test]
    fn test_save_unconnected_pair_is_rejected() {
        let Fixture {
            mut registry,
            mut editor,
            ..
        } = fixture(EditorConfig::default());
        editor.graph_mut().add_node(message("A"), Position::default());
        editor.graph_mut().add_node(message("B"), Position::default());

        assert!(matches!(
            editor.save(&mut registry),
            Err(Error::ValidationFailed(InvalidReason::UnconnectedNodes { .. }))
        ));
        assert_eq!(registry.list()[0].node_count(), 0);
    }

    #[test]
    fn test_save_connected_graph() {
        let Fixture {
            mut registry,
            mut editor,
            ..
        } = fixture(EditorConfig::default());
        let graph = editor.graph_mut();
        let a = graph.add_node(message("A"), Position::default());
        let b = graph.add_node(message("B"), Position::default());
        let c = graph.add_node(message("C"), Position::default());
        graph.connect(a, b).unwrap();
        graph.connect(a, c).unwrap();

        let saved = editor.save(&mut registry).unwrap();
        assert_eq!(saved.node_count(), 3);
        assert_eq!(saved.edges().len(), 2);
        assert_eq!(registry.list()[0].node_count(), 3);

        let toast = editor.notification_queue().latest().unwrap();
        assert_eq!(toast.severity, Severity::Success);
        assert_eq!(toast.message, "Flow saved successfully.");
    }

    #[test]
    fn test_save_uses_configured_success_message() {
        let config = EditorConfigBuilder::default()
            .success_message("All good")
            .build()
            .unwrap();
        let Fixture {
            mut registry,
            mut editor,
            ..
        } = fixture(config);
        let a = editor.graph_mut().add_node(message("A"), Position::default());
        let b = editor.graph_mut().add_node(message("B"), Position::default());
        editor.graph_mut().connect(a, b).unwrap();

        editor.save(&mut registry).unwrap();
        assert_eq!(editor.notifications()[0].message, "All good");
    }

    #[test]
    fn test_strict_mode_rejects_disjoint_cycle() {
        let config = EditorConfigBuilder::default()
            .validation_mode(ValidationMode::Strict)
            .build()
            .unwrap();
        let Fixture {
            mut registry,
            mut editor,
            ..
        } = fixture(config);

        // A -> B, C <-> D: three distinct targets for four nodes, but C and D
        // are unreachable from A.
        let graph = editor.graph_mut();
        let a = graph.add_node(message("A"), Position::default());
        let b = graph.add_node(message("B"), Position::default());
        let c = graph.add_node(message("C"), Position::default());
        let d = graph.add_node(message("D"), Position::default());
        graph.connect(a, b).unwrap();
        graph.connect(c, d).unwrap();
        graph.connect(d, c).unwrap();

        assert!(matches!(
            editor.save(&mut registry),
            Err(Error::ValidationFailed(InvalidReason::Unreachable { count: 2 }))
        ));
        assert_eq!(editor.notifications()[0].message, SAVE_FAILED_MESSAGE);
    }

    #[test]
    fn test_save_unknown_workflow_reports_error() {
        let clock = Arc::new(ManualClock::default());
        let mut registry = WorkflowRegistry::open(MemoryStore::default(), clock.clone()).unwrap();
        let ghost = WorkflowId::new();
        let mut editor = Editor::new(EditorConfig::default(), clock, ghost).unwrap();
        let a = editor.graph_mut().add_node(message("A"), Position::default());
        let b = editor.graph_mut().add_node(message("B"), Position::default());
        editor.graph_mut().connect(a, b).unwrap();

        assert!(matches!(
            editor.save(&mut registry),
            Err(Error::UnknownWorkflow(id)) if id == ghost
        ));
        let toast = editor.notification_queue().latest().unwrap();
        assert_eq!(toast.severity, Severity::Error);
        assert!(toast.message.contains(&ghost.to_string()));
    }

    #[test]
    fn test_open_restores_saved_graph() {
        let Fixture {
            clock,
            mut registry,
            mut editor,
        } = fixture(EditorConfig::default());
        let a = editor.graph_mut().add_node(message("A"), Position::default());
        let b = editor.graph_mut().add_node(message("B"), Position::default());
        let edge = editor.graph_mut().connect(a, b).unwrap();
        editor.save(&mut registry).unwrap();
        let id = editor.workflow_id();
        let closed = editor.close();

        let reopened = Editor::open(EditorConfig::default(), clock, &registry, id).unwrap();
        assert_eq!(reopened.snapshot(), closed);
        assert!(reopened.graph().contains_edge(edge));
        assert!(reopened.notifications().is_empty());
    }

    #[test]
    fn test_open_unknown_workflow() {
        let Fixture {
            clock, registry, ..
        } = fixture(EditorConfig::default());
        let ghost = WorkflowId::new();
        assert!(matches!(
            Editor::open(EditorConfig::default(), clock, &registry, ghost),
            Err(Error::UnknownWorkflow(id)) if id == ghost
        ));
    }

    #[test]
    fn test_toasts_expire_after_ttl() {
        let Fixture {
            clock,
            mut registry,
            mut editor,
        } = fixture(EditorConfig::default());
        editor.graph_mut().add_node(message("A"), Position::default());
        let _ = editor.save(&mut registry);

        clock.advance(SignedDuration::from_millis(2999));
        assert!(editor.tick().is_empty());
        assert_eq!(editor.notifications().len(), 1);

        clock.advance(SignedDuration::from_millis(1));
        assert_eq!(editor.tick().len(), 1);
        assert!(editor.notifications().is_empty());
    }

    #[test]
    fn test_dismiss_and_clear() {
        let Fixture {
            mut registry,
            mut editor,
            ..
        } = fixture(EditorConfig::default());
        let _ = editor.save(&mut registry);
        let _ = editor.save(&mut registry);
        let first = editor.notifications()[0].id;

        assert!(editor.dismiss(first).is_some());
        assert!(editor.dismiss(first).is_none());
        assert_eq!(editor.notifications().len(), 1);

        editor.clear_notifications();
        assert!(editor.notifications().is_empty());
        assert!(editor.tick().is_empty());
    }

    #[test]
    fn test_removing_selected_node_returns_to_canvas() {
        let Fixture { mut editor, .. } = fixture(EditorConfig::default());
        let a = editor.graph_mut().add_node(message("A"), Position::default());
        editor.graph_mut().select(Some(a)).unwrap();
        assert_eq!(editor.surface(), Surface::NodeSettings(a));

        editor.graph_mut().remove_node(a);
        assert_eq!(editor.selection(), Selection::Idle);
        assert_eq!(editor.surface(), Surface::Canvas);
    }

    #[test]
    fn test_graph_errors_convert() {
        let Fixture { mut editor, .. } = fixture(EditorConfig::default());
        let a = editor.graph_mut().add_node(message("A"), Position::default());

        let error: Error = editor.graph_mut().connect(a, a).unwrap_err().into();
        assert!(matches!(error, Error::Graph(GraphError::SelfLoop(id)) if id == a));
    }
}
