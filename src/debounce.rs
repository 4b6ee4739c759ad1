use crate::events::{AppEvent, EventSender};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time;

pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Owns the single pending search timer. Scheduling replaces (and aborts) any
/// timer that has not fired yet, so at most one exists at a time.
///
/// Each `SearchDue` carries the ticket of the timer that sent it. Scheduling and
/// cancelling both move the ticket on, so an event already queued by an older
/// timer fails `is_current` and must be ignored.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    ticket: u64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            ticket: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, tx: &EventSender) {
        self.cancel();
        let tx = tx.clone();
        let delay = self.delay;
        let ticket = self.ticket;
        self.pending = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            if tx.send(AppEvent::SearchDue { ticket }).is_err() {
                tracing::debug!("debounce fired after receiver closed");
            }
        }));
    }

    pub fn cancel(&mut self) {
        self.ticket += 1;
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a `SearchDue` with this ticket came from the latest scheduled timer.
    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.ticket
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
