use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::event::{AppEvent, EventSender};

/// One-shot timer that posts [`AppEvent::PlacementDue`] after a delay.
///
/// Dropping the guard aborts the timer, so a torn-down app never receives a
/// stale placement.
#[derive(Debug, Default)]
pub struct DeferredPlacement {
    handle: Option<JoinHandle<()>>,
}

impl DeferredPlacement {
    /// A guard with nothing scheduled
    pub fn idle() -> Self {
        Self { handle: None }
    }

    /// Schedule the placement; must be called inside a tokio runtime
    pub fn schedule(delay: Duration, tx: EventSender) -> Self {
        debug!(delay_ms = delay.as_millis() as u64, "deferring initial placement");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app already shut down
            let _ = tx.send(AppEvent::PlacementDue).await;
        });

        Self {
            handle: Some(handle),
        }
    }

    /// Replace any pending timer with a new one
    pub fn rearm(&mut self, delay: Duration, tx: EventSender) {
        self.cancel();
        *self = Self::schedule(delay, tx);
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for DeferredPlacement {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::create_event_queue;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (tx, mut rx) = create_event_queue();
        let deferred = DeferredPlacement::schedule(Duration::from_millis(100), tx);
        assert!(deferred.is_pending());

        assert_eq!(rx.recv().await, Some(AppEvent::PlacementDue));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_placement() {
        let (tx, mut rx) = create_event_queue();
        let deferred = DeferredPlacement::schedule(Duration::from_millis(100), tx);
        drop(deferred);

        // The aborted task releases the only sender without posting anything
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_posts_once() {
        let (tx, mut rx) = create_event_queue();
        let mut deferred = DeferredPlacement::schedule(Duration::from_millis(100), tx.clone());
        deferred.rearm(Duration::from_millis(50), tx);

        assert_eq!(rx.recv().await, Some(AppEvent::PlacementDue));
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_idle_is_not_pending() {
        let mut deferred = DeferredPlacement::idle();
        assert!(!deferred.is_pending());
        deferred.cancel();
    }
}
