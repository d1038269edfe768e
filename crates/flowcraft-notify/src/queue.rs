//! Queue of auto-expiring toasts.

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};

use crate::clock::Clock;
use crate::scheduler::ExpiryScheduler;
use crate::toast::{Severity, Toast, ToastId};

/// Tracing target for the notification queue.
const TRACING_TARGET: &str = "flowcraft_notify::queue";

/// Default time a toast stays visible.
pub const DEFAULT_TOAST_TTL: SignedDuration = SignedDuration::from_millis(3000);

/// Ordered queue of toasts, oldest first.
///
/// Each push schedules exactly one expiry for the new toast. Expiries fire
/// when the host calls [`tick`](Self::tick). Dismissing a toast cancels its
/// own expiry and nothing else.
#[derive(Debug)]
pub struct NotificationQueue {
    toasts: Vec<Toast>,
    expiry: ExpiryScheduler<ToastId>,
    ttl: SignedDuration,
    clock: Arc<dyn Clock>,
}

impl NotificationQueue {
    /// Creates an empty queue using the default expiry delay.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, DEFAULT_TOAST_TTL)
    }

    /// Creates an empty queue with a custom expiry delay.
    pub fn with_ttl(clock: Arc<dyn Clock>, ttl: SignedDuration) -> Self {
        Self {
            toasts: Vec::new(),
            expiry: ExpiryScheduler::new(),
            ttl,
            clock,
        }
    }

    /// Returns the expiry delay.
    #[inline]
    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Appends a toast and schedules its expiry.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> ToastId {
        let now = self.clock.now();
        let toast = Toast::new(message, severity, now);
        let id = toast.id;

        let deadline = now.checked_add(self.ttl).unwrap_or(Timestamp::MAX);
        self.expiry.schedule(id, deadline);

        tracing::debug!(
            target: TRACING_TARGET,
            toast_id = %id,
            severity = %severity,
            message = %toast.message,
            "Toast pushed"
        );

        self.toasts.push(toast);
        id
    }

    /// Pushes a success toast.
    pub fn success(&mut self, message: impl Into<String>) -> ToastId {
        self.push(message, Severity::Success)
    }

    /// Pushes an error toast.
    pub fn error(&mut self, message: impl Into<String>) -> ToastId {
        self.push(message, Severity::Error)
    }

    /// Pushes a warning toast.
    pub fn warning(&mut self, message: impl Into<String>) -> ToastId {
        self.push(message, Severity::Warning)
    }

    /// Pushes an info toast.
    pub fn info(&mut self, message: impl Into<String>) -> ToastId {
        self.push(message, Severity::Info)
    }

    /// Removes a toast and cancels its pending expiry.
    ///
    /// Unknown ids are ignored and return `None`.
    pub fn dismiss(&mut self, id: ToastId) -> Option<Toast> {
        self.expiry.cancel(&id);
        let toast = self.take(id)?;

        tracing::debug!(target: TRACING_TARGET, toast_id = %id, "Toast dismissed");
        Some(toast)
    }

    /// Removes every toast and cancels every pending expiry.
    pub fn clear_all(&mut self) {
        let cleared = self.toasts.len();
        self.toasts.clear();
        self.expiry.clear();

        tracing::debug!(target: TRACING_TARGET, cleared, "Toasts cleared");
    }

    /// Runs every expiry that is due and returns the ids it removed.
    pub fn tick(&mut self) -> Vec<ToastId> {
        let now = self.clock.now();
        let expired: Vec<ToastId> = self
            .expiry
            .pop_due(now)
            .into_iter()
            .filter(|id| self.take(*id).is_some())
            .collect();

        if !expired.is_empty() {
            tracing::trace!(
                target: TRACING_TARGET,
                expired = expired.len(),
                remaining = self.toasts.len(),
                "Toasts expired"
            );
        }

        expired
    }

    /// Returns when the next expiry is due.
    pub fn next_expiry(&self) -> Option<Timestamp> {
        self.expiry.next_deadline()
    }

    /// Returns the toasts in insertion order.
    #[inline]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Returns the most recently pushed toast still in the queue.
    #[inline]
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    /// Returns the toast with the given id.
    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|toast| toast.id == id)
    }

    /// Returns whether a toast is still queued.
    pub fn contains(&self, id: ToastId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of queued toasts.
    #[inline]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Returns whether the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    fn take(&mut self, id: ToastId) -> Option<Toast> {
        let position = self.toasts.iter().position(|toast| toast.id == id)?;
        Some(self.toasts.remove(position))
    }
}
