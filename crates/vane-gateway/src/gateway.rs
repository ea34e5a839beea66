//! The gateway boundary between the view layer and the control plane.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use vane_core::{Phase, Rollout, Strategy, Verification};

use crate::error::GatewayResult;

/// Read access to a rollout, plus the action triggers.
///
/// Each read is independent, so callers may issue them concurrently.
#[async_trait]
pub trait RolloutGateway: Send + Sync {
    /// Fetch the rollout summary.
    async fn rollout(&self, rollout_id: &str) -> GatewayResult<Rollout>;

    /// Fetch the phases, in progression order. Never empty on success.
    async fn phases(&self, rollout_id: &str) -> GatewayResult<Vec<Phase>>;

    /// Fetch all verifications of the rollout. May be empty.
    async fn verifications(&self, rollout_id: &str) -> GatewayResult<Vec<Verification>>;

    /// Fetch and parse the strategy definition.
    ///
    /// `None` when the definition declares neither a canary nor a rolling
    /// strategy.
    async fn strategy(&self, rollout_id: &str) -> GatewayResult<Option<Strategy>>;

    /// Trigger an action on the rollout.
    async fn send_action(&self, rollout_id: &str, action: RolloutAction) -> GatewayResult<()>;

    /// Trigger an action on a workload (a SpotDeployment) outside any
    /// single rollout.
    async fn send_workload_action(&self, request: &WorkloadRequest) -> GatewayResult<()>;
}

/// Operator actions on an in-flight rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RolloutAction {
    /// Pause the rollout; resuming restarts the phase where it left off.
    Pause,
    /// Promote one phase to the next.
    Promote,
    /// Promote to the end of the rollout, triggering a success.
    PromoteFull,
    /// Terminate the rollout and restore the stable version.
    Abort,
    /// Retry the last rolled-back rollout.
    Retry,
}

impl RolloutAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RolloutAction::Pause => "pause",
            RolloutAction::Promote => "promote",
            RolloutAction::PromoteFull => "promoteFull",
            RolloutAction::Abort => "abort",
            RolloutAction::Retry => "retry",
        }
    }

    /// Wording used when reporting a successful action.
    pub fn past_tense(&self) -> &'static str {
        match self {
            RolloutAction::Pause => "paused",
            RolloutAction::Promote => "promoted",
            RolloutAction::PromoteFull => "fully promoted",
            RolloutAction::Abort => "rolled back",
            RolloutAction::Retry => "retried",
        }
    }
}

impl fmt::Display for RolloutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator actions on a workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadAction {
    /// Restart the running pods of the live revision.
    Restart,
    /// Retry the latest rolled-back revision, starting a new rollout.
    Retry,
    /// Roll back to one of the recent non-live revisions, starting a new
    /// rollout.
    Rollback,
}

impl WorkloadAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadAction::Restart => "restart",
            WorkloadAction::Retry => "retry",
            WorkloadAction::Rollback => "rollback",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            WorkloadAction::Restart => "restarted",
            WorkloadAction::Retry => "retried",
            WorkloadAction::Rollback => "rolled back",
        }
    }

    /// Whether the action targets a specific revision.
    pub fn takes_revision(&self) -> bool {
        !matches!(self, WorkloadAction::Restart)
    }
}

impl fmt::Display for WorkloadAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A workload action addressed to one SpotDeployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadRequest {
    pub cluster_id: String,
    pub namespace: String,
    pub name: String,
    pub action: WorkloadAction,
    /// Set for retry and rollback.
    pub revision_id: Option<u64>,
}

/// Kind query parameter sent with every workload action.
pub(crate) const WORKLOAD_KIND: &str = "SpotDeployment";

/// Body of `PUT /rollout/{id}`.
#[derive(Debug, Serialize)]
pub(crate) struct ActionRequest {
    pub action: RolloutAction,
}
