//! Interrupt handling for watch sessions.
//!
//! The first Ctrl-C (or SIGTERM) stops the watch loop after its current
//! poll. A second one exits immediately.

use std::io;

use tracing::{info, warn};

use vane_view::Shutdown;

/// Exit status after a forced interrupt (128 + SIGINT).
const FORCED_EXIT_CODE: i32 = 130;

/// Ctrl-C, plus SIGTERM on Unix.
pub struct Interrupts {
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl Interrupts {
    pub fn new() -> io::Result<Self> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            Ok(Self {
                terminate: signal(SignalKind::terminate())?,
            })
        }
        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }

    /// Wait for the next interrupt or termination request.
    pub async fn recv(&mut self) -> io::Result<()> {
        #[cfg(unix)]
        {
            tokio::select! {
                res = tokio::signal::ctrl_c() => res,
                _ = self.terminate.recv() => Ok(()),
            }
        }
        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c().await
        }
    }
}

pub fn install(shutdown: Shutdown) {
    tokio::spawn(async move {
        let mut interrupts = match Interrupts::new() {
            Ok(interrupts) => interrupts,
            Err(e) => {
                warn!(error = %e, "failed to listen for termination signals");
                return;
            }
        };
        if let Err(e) = interrupts.recv().await {
            warn!(error = %e, "failed to listen for interrupts");
            return;
        }
        info!("interrupt received, stopping watch");
        shutdown.trigger();

        if interrupts.recv().await.is_ok() {
            std::process::exit(FORCED_EXIT_CODE);
        }
    });
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn sigterm_counts_as_an_interrupt() {
        let mut interrupts = Interrupts::new().unwrap();

        let status = std::process::Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        tokio::time::timeout(Duration::from_secs(5), interrupts.recv())
            .await
            .expect("SIGTERM was not delivered")
            .unwrap();
    }
}
