//! Countdown which releases once every generated person has arrived.

use tokio::sync::watch;

/// Completion barrier of a simulation run. Every person releases exactly one unit when it arrives;
/// [CompletionBarrier::wait] returns once all units are released.
#[derive(Debug)]
pub struct CompletionBarrier {
    remaining: watch::Sender<usize>
}

impl CompletionBarrier {
    pub fn new(count: usize) -> Self {
        let (remaining, _) = watch::channel(count);
        Self {
            remaining
        }
    }

    /// Releases one unit.
    pub fn arrive(&self) {
        self.remaining.send_modify(|remaining| {
            debug_assert!(*remaining > 0, "more arrivals than persons");
            *remaining = remaining.saturating_sub(1);
        });
    }

    /// Number of persons which have not arrived yet.
    pub fn remaining(&self) -> usize {
        *self.remaining.borrow()
    }

    /// Blocks until every unit has been released. Returns immediately for a count of zero.
    pub async fn wait(&self) {
        let mut rx = self.remaining.subscribe();
        // the sender lives in self, so the channel cannot close while we wait
        let _ = rx.wait_for(|remaining| *remaining == 0).await;
    }
}
