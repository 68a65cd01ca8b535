//! Per-round completion notification
//!
//! Every settled round bumps a counter on a `watch` channel. Each waiter
//! subscribes fresh, which marks the current count as seen, so it only wakes
//! for the next round that finishes after it subscribed.

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::watch;

/// Future resolving once the next round's callback has returned
///
/// Yields the total number of completed rounds at the time it woke.
pub type Completion = BoxFuture<'static, u64>;

/// Owner side of the completion notification
#[derive(Debug)]
pub(crate) struct RoundNotifier {
    tx: watch::Sender<u64>,
}

impl RoundNotifier {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    /// Future for the next completion
    ///
    /// If the notifier is dropped first the future never resolves, the same
    /// as a round that never completes.
    pub(crate) fn subscribe(&self) -> Completion {
        let mut rx = self.tx.subscribe();
        async move {
            match rx.changed().await {
                Ok(()) => *rx.borrow_and_update(),
                Err(_) => std::future::pending().await,
            }
        }
        .boxed()
    }

    /// Wake every current waiter; returns the new completed-round count
    pub(crate) fn resolve(&self) -> u64 {
        let mut completed = 0;
        self.tx.send_modify(|count| {
            *count += 1;
            completed = *count;
        });
        completed
    }

    /// Number of rounds resolved so far
    pub(crate) fn completed(&self) -> u64 {
        *self.tx.borrow()
    }
}
