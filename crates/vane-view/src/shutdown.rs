//! Cancellation shared between the signal handler, the watch deadline, and
//! the watch loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

/// A one-way cancellation flag. Once triggered it stays triggered.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Trigger after `timeout`, unless something else triggers first.
    pub fn trigger_after(&self, timeout: Duration) -> JoinHandle<()> {
        let shutdown = self.clone();
        let mut rx = self.subscribe();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(timeout) => {
                    info!(timeout_secs = timeout.as_secs_f64(), "watch timeout reached");
                    shutdown.trigger();
                }
                _ = triggered(&mut rx) => {}
            }
        })
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once `rx` reads `true`, or once every sender is gone.
pub async fn triggered(rx: &mut watch::Receiver<bool>) {
    loop {
        let done = *rx.borrow_and_update();
        if done {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}

/// Whether `rx` has been cancelled, without waiting.
pub fn is_cancelled(rx: &watch::Receiver<bool>) -> bool {
    *rx.borrow() || rx.has_changed().is_err()
}
