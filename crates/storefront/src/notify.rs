//! User-facing notifications.
//!
//! The headless analog of the UI's snackbar queue: every user-visible
//! outcome (validation warnings, backend error messages, success toasts)
//! flows through the [`Notifier`] seam so an embedding UI can render them
//! however it likes.

use std::collections::VecDeque;
use std::sync::Mutex;

/// Severity of a notification, mirroring the snackbar variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A completed user action (e.g., "Logged in successfully").
    Success,
    /// A rejected user action that needs no retry (validation failures,
    /// duplicate adds, login prompts).
    Warning,
    /// A failed server round trip. Terminal for the action; the user must
    /// retry by hand.
    Error,
}

/// A single user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    /// Surface one notification to the user.
    fn notify(&self, severity: Severity, message: &str);
}

/// Notifier that emits notifications as `tracing` events.
///
/// The default sink for embedders that have no UI of their own.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success => tracing::info!(message),
            Severity::Warning => tracing::warn!(message),
            Severity::Error => tracing::error!(message),
        }
    }
}

/// Notifier that queues notifications in memory.
///
/// Embedding UIs drain the queue and render each entry, the way the browser
/// UI popped snackbars. Also convenient in tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    queue: Mutex<VecDeque<Notification>>,
}

impl MemoryNotifier {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the oldest queued notification.
    pub fn pop(&self) -> Option<Notification> {
        self.queue.lock().ok()?.pop_front()
    }

    /// Drain all queued notifications, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.queue
            .lock()
            .map(|mut q| q.drain(..).collect())
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(Notification {
                severity,
                message: message.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_fifo() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Severity::Warning, "first");
        notifier.notify(Severity::Error, "second");

        let first = notifier.pop().expect("queued");
        assert_eq!(first.severity, Severity::Warning);
        assert_eq!(first.message, "first");

        let rest = notifier.drain();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest.first().map(|n| n.message.as_str()), Some("second"));
        assert!(notifier.pop().is_none());
    }
}
