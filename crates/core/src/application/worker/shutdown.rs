// Cooperative cancellation for the worker pool.

use tokio::sync::watch;

/// Receiving half of the shutdown channel, one clone per worker.
///
/// Workers consult the token between claim attempts, so cancellation never
/// lands mid-commit: an event is either fully committed or released back to
/// the queue. A dropped sender counts as a shutdown request, so a worker
/// cannot outlive the process that spawned it.
#[derive(Clone)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

impl ShutdownToken {
    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once shutdown has been requested. Returns immediately when
    /// the signal already fired or the sender is gone.
    pub async fn wait(&mut self) {
        while !*self.rx.borrow() {
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Sending half, held by the daemon. A single call fans out to every
/// worker token.
pub struct ShutdownSender {
    tx: watch::Sender<bool>,
}

impl ShutdownSender {
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

pub fn shutdown_channel() -> (ShutdownSender, ShutdownToken) {
    let (tx, rx) = watch::channel(false);
    (ShutdownSender { tx }, ShutdownToken { rx })
}
