//! Stop signal shared by all tasks of a simulation run.

use tokio::sync::watch;

/// Creates a connected trigger/listener pair.
pub fn channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

/// Owned by the [Controller](crate::controller::Controller). Triggering it asks every task of the
/// run to stop.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        // send_replace never fails, even without listeners
        self.tx.send_replace(true);
    }
}

/// Cloneable listener half handed to every task.
#[derive(Clone, Debug)]
pub struct Shutdown {
    rx: watch::Receiver<bool>
}

impl Shutdown {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Completes once shutdown has been triggered or the trigger has been dropped. Cancel safe, so
    /// it can be used as a `tokio::select!` branch.
    pub async fn wait(&mut self) {
        let _ = self.rx.wait_for(|stop| *stop).await;
    }
}
