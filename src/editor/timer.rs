//! Cancellable scheduled task slot
//!
//! Holds at most one pending timer. Scheduling into an occupied slot cancels
//! the old task before the new one is spawned, so two timers for the same
//! slot are never live together.

use crate::persister::Event;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
pub struct ScheduledTask {
    cancel: Option<CancellationToken>,
}

impl ScheduledTask {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` on `tx` after `delay`, replacing any pending task
    pub fn replace(&mut self, delay: Duration, tx: mpsc::UnboundedSender<Event>, event: Event) {
        self.cancel();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = cancelled.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    let _ = tx.send(event);
                }
            }
        });
        self.cancel = Some(token);
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
