//! Debounced search scheduling.
//!
//! Rate-limits remote search calls triggered by keystroke input: each new
//! keystroke cancels the pending timer and re-arms it, so only the query
//! armed by the last keystroke of a burst ever fires. Superseded queries
//! are never sent at all - the timer task is aborted before it emits.
//!
//! The debouncer only schedules; it performs no I/O. Fired queries arrive
//! on the paired receiver and the app layer runs the actual request, which
//! keeps the timer logic testable with a paused clock.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Schedules at most one search query per quiet period.
///
/// Owns the pending timer as an abortable task handle; re-arming or
/// dropping the debouncer cancels it. There is no maximum-wait guarantee:
/// under continuous typing nothing fires until typing pauses.
pub struct SearchDebouncer {
    delay: Duration,
    tx: UnboundedSender<String>,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    /// Create a debouncer with the given quiet period, paired with the
    /// receiver that fired queries arrive on.
    #[must_use]
    pub fn new(delay: Duration) -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Record a keystroke: cancel any pending query and re-arm the timer
    /// with the new text.
    ///
    /// Must be called from within a tokio runtime.
    pub fn input(&mut self, text: impl Into<String>) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        let text = text.into();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down; nothing to do.
            let _ = tx.send(text);
        }));
    }

    /// Cancel the pending query, if any, without re-arming.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
