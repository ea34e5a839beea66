//! View controller — one-shot display and the live watch loop.
//!
//! The watch loop runs on its own task while the caller's task waits for
//! cancellation. Each cycle builds a fresh snapshot, and the terminal is
//! cleared and redrawn only when that snapshot differs from the one on
//! screen. A failed build pauses the loop for the error backoff before it
//! polls again.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use vane_core::DetailedRollout;
use vane_gateway::{GatewayError, GatewayResult, RolloutGateway};

use crate::builder::{SnapshotBuilder, StrategySource};
use crate::render::Renderer;
use crate::shutdown::{is_cancelled, triggered};

/// Pacing of the watch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    /// Delay between successful polls. Zero polls back to back.
    pub poll_interval: Duration,
    /// Pause after a failed build before polling again.
    pub error_backoff: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::ZERO,
            error_backoff: Duration::from_secs(1),
        }
    }
}

/// What a finished watch session did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchReport {
    /// Successful builds.
    pub polls: u64,
    pub redraws: u64,
    /// Failed builds.
    pub failures: u64,
}

/// Drives the view of one rollout onto `out`.
pub struct ViewController<W> {
    builder: SnapshotBuilder,
    renderer: Renderer,
    rollout_id: String,
    out: W,
    strategy: StrategySource,
    previous: Option<DetailedRollout>,
    report: WatchReport,
}

impl<W: Write + Send + 'static> ViewController<W> {
    pub fn new(
        gateway: Arc<dyn RolloutGateway>,
        rollout_id: impl Into<String>,
        renderer: Renderer,
        out: W,
    ) -> Self {
        Self {
            builder: SnapshotBuilder::new(gateway),
            renderer,
            rollout_id: rollout_id.into(),
            out,
            strategy: StrategySource::Fetch,
            previous: None,
            report: WatchReport::default(),
        }
    }

    /// Build a snapshot, retaining its strategy for later builds.
    pub async fn fetch(&mut self) -> GatewayResult<DetailedRollout> {
        let snapshot = self.builder.build(&self.rollout_id, &self.strategy).await?;
        if self.strategy == StrategySource::Fetch {
            self.strategy = StrategySource::Retain(snapshot.strategy.clone());
        }
        Ok(snapshot)
    }

    /// Fetch once and render without clearing the terminal.
    pub async fn show(&mut self) -> GatewayResult<()> {
        let snapshot = self.fetch().await?;
        let text = self.renderer.render(&snapshot);
        self.out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| GatewayError::Transport(format!("failed to write view: {e}")))
    }

    /// Redraw on every change until `shutdown` fires.
    ///
    /// Cancellation is checked between polls; a build in flight completes
    /// first.
    pub async fn watch(
        self,
        options: WatchOptions,
        mut shutdown: watch::Receiver<bool>,
    ) -> WatchReport {
        let rollout_id = self.rollout_id.clone();
        let poller = tokio::spawn(self.run(options, shutdown.clone()));

        triggered(&mut shutdown).await;
        debug!(rollout = %rollout_id, "watch cancelled");

        match poller.await {
            Ok(report) => {
                info!(
                    rollout = %rollout_id,
                    polls = report.polls,
                    redraws = report.redraws,
                    failures = report.failures,
                    "watch stopped"
                );
                report
            }
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                warn!(rollout = %rollout_id, error = %e, "watch task did not finish");
                WatchReport::default()
            }
        }
    }

    // ── Watch loop ─────────────────────────────────────────────────

    async fn run(mut self, options: WatchOptions, mut shutdown: watch::Receiver<bool>) -> WatchReport {
        'session: loop {
            loop {
                if is_cancelled(&shutdown) {
                    break 'session;
                }

                if let Err(e) = self.poll().await {
                    self.report.failures += 1;
                    warn!(rollout = %self.rollout_id, error = %e, "snapshot build failed, backing off");
                    self.write_error(&e);
                    break;
                }

                if options.poll_interval.is_zero() {
                    tokio::task::yield_now().await;
                } else {
                    tokio::select! {
                        _ = tokio::time::sleep(options.poll_interval) => {}
                        _ = triggered(&mut shutdown) => break 'session,
                    }
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(options.error_backoff) => {}
                _ = triggered(&mut shutdown) => break 'session,
            }
        }

        self.report
    }

    async fn poll(&mut self) -> GatewayResult<()> {
        let snapshot = self.fetch().await?;
        self.report.polls += 1;

        if self.previous.as_ref() == Some(&snapshot) {
            debug!(rollout = %self.rollout_id, "no change");
            return Ok(());
        }

        debug!(rollout = %self.rollout_id, status = snapshot.rollout.status.as_str(), "redraw");
        if let Err(e) = self.redraw(&snapshot) {
            warn!(rollout = %self.rollout_id, error = %e, "failed to write view");
        }
        self.report.redraws += 1;
        self.previous = Some(snapshot);
        Ok(())
    }

    fn redraw(&mut self, snapshot: &DetailedRollout) -> std::io::Result<()> {
        let text = self.renderer.render(snapshot);
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn write_error(&mut self, error: &GatewayError) {
        let written = writeln!(self.out, "{error}").and_then(|()| self.out.flush());
        if let Err(e) = written {
            warn!(rollout = %self.rollout_id, error = %e, "failed to write view");
        }
    }
}
