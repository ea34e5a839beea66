//! Snapshot builder — fans out the gateway reads of one rollout and joins
//! them into a [`DetailedRollout`].
//!
//! Every read runs on its own task. The build waits for all of them before
//! looking at any result, so a failed read never leaves another task
//! writing into a half-assembled snapshot. Each task owns its result slot,
//! so nothing blocks on reporting an error.

use std::sync::Arc;

use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

use vane_core::{DetailedRollout, Strategy};
use vane_gateway::{GatewayError, GatewayResult, RolloutGateway};

/// Where the snapshot's strategy comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StrategySource {
    /// Fetch and parse the definition as part of the build.
    #[default]
    Fetch,
    /// Skip the fetch and carry over a value from an earlier build.
    Retain(Option<Strategy>),
}

/// Builds rollout snapshots from a gateway.
#[derive(Clone)]
pub struct SnapshotBuilder {
    gateway: Arc<dyn RolloutGateway>,
}

impl SnapshotBuilder {
    pub fn new(gateway: Arc<dyn RolloutGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch everything about `rollout_id` concurrently.
    ///
    /// Fails if any read fails. When several fail, the error reported is
    /// the first in the order summary, phases, verifications, strategy.
    pub async fn build(
        &self,
        rollout_id: &str,
        strategy: &StrategySource,
    ) -> GatewayResult<DetailedRollout> {
        debug!(rollout = %rollout_id, fetch_strategy = matches!(strategy, StrategySource::Fetch), "building snapshot");

        let rollout_task = {
            let gateway = Arc::clone(&self.gateway);
            let id = rollout_id.to_string();
            tokio::spawn(async move { gateway.rollout(&id).await })
        };
        let phases_task = {
            let gateway = Arc::clone(&self.gateway);
            let id = rollout_id.to_string();
            tokio::spawn(async move { gateway.phases(&id).await })
        };
        let verifications_task = {
            let gateway = Arc::clone(&self.gateway);
            let id = rollout_id.to_string();
            tokio::spawn(async move { gateway.verifications(&id).await })
        };
        let strategy_task = match strategy {
            StrategySource::Fetch => {
                let gateway = Arc::clone(&self.gateway);
                let id = rollout_id.to_string();
                Some(tokio::spawn(async move { gateway.strategy(&id).await }))
            }
            StrategySource::Retain(_) => None,
        };

        // ── Join barrier ───────────────────────────────────────────
        let rollout = joined(rollout_task).await;
        let phases = joined(phases_task).await;
        let verifications = joined(verifications_task).await;
        let fetched_strategy = match strategy_task {
            Some(task) => Some(joined(task).await),
            None => None,
        };

        // ── Assembly ───────────────────────────────────────────────
        let failures = [
            rollout.as_ref().err(),
            phases.as_ref().err(),
            verifications.as_ref().err(),
            fetched_strategy.as_ref().and_then(|r| r.as_ref().err()),
        ];
        if let Some(first) = failures.iter().flatten().next() {
            for other in failures.iter().flatten().skip(1) {
                debug!(rollout = %rollout_id, error = %other, "discarding additional fetch error");
            }
            return Err((*first).clone());
        }

        let strategy = match (fetched_strategy, strategy) {
            (Some(fetched), _) => fetched?,
            (None, StrategySource::Retain(retained)) => retained.clone(),
            (None, StrategySource::Fetch) => None,
        };

        Ok(DetailedRollout {
            rollout: rollout?,
            phases: phases?,
            verifications: verifications?,
            strategy,
        })
    }
}

/// Await a fetch task. A panicking fetch is not a recoverable remote error,
/// so the panic is carried over to the caller.
async fn joined<T>(task: JoinHandle<GatewayResult<T>>) -> GatewayResult<T> {
    task.await.unwrap_or_else(|e: JoinError| {
        if e.is_panic() {
            std::panic::resume_unwind(e.into_panic());
        }
        Err(GatewayError::Transport(format!("fetch task cancelled: {e}")))
    })
}
