//! Rollout summary as reported by the control plane.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RolloutStatus {
    #[default]
    Pending,
    InProgress,
    Paused,
    Failed,
    Aborted,
    Aborting,
    Finished,
    Canceled,
    ManualPaused,
    ManualPausing,
    InvalidSpec,
    Deallocating,
    Verifying,
    FailurePolicyPaused,
    FailurePolicyPausing,
    BackgroundVerifying,
    /// A status this client does not know about yet.
    #[serde(other)]
    Unknown,
}

impl RolloutStatus {
    /// Statuses a rollout never leaves once reached.
    pub const TERMINAL: [RolloutStatus; 4] = [
        RolloutStatus::Failed,
        RolloutStatus::Aborted,
        RolloutStatus::Finished,
        RolloutStatus::Canceled,
    ];

    pub fn is_terminal(&self) -> bool {
        Self::TERMINAL.contains(self)
    }

    /// The wire name of the status (camelCase).
    pub fn as_str(&self) -> &'static str {
        match self {
            RolloutStatus::Pending => "pending",
            RolloutStatus::InProgress => "inProgress",
            RolloutStatus::Paused => "paused",
            RolloutStatus::Failed => "failed",
            RolloutStatus::Aborted => "aborted",
            RolloutStatus::Aborting => "aborting",
            RolloutStatus::Finished => "finished",
            RolloutStatus::Canceled => "canceled",
            RolloutStatus::ManualPaused => "manualPaused",
            RolloutStatus::ManualPausing => "manualPausing",
            RolloutStatus::InvalidSpec => "invalidSpec",
            RolloutStatus::Deallocating => "deallocating",
            RolloutStatus::Verifying => "verifying",
            RolloutStatus::FailurePolicyPaused => "failurePolicyPaused",
            RolloutStatus::FailurePolicyPausing => "failurePolicyPausing",
            RolloutStatus::BackgroundVerifying => "backgroundVerifying",
            RolloutStatus::Unknown => "unknown",
        }
    }
}

/// Replica counts for one version of the workload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReplicasInfo {
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub desired: i32,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub ready: i32,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub in_progress: i32,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub failed: i32,
}

/// Status of one version (new or stable) taking part in a rollout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionStatus {
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub version: String,
    /// Kubernetes service fronting this version, if any.
    #[serde(rename = "k8sService", deserialize_with = "crate::wire::null_default")]
    pub service_name: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub traffic_percentage: i32,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub replicas: ReplicasInfo,
}

/// One rollout of a workload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rollout {
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub status: RolloutStatus,
    /// Name of the workload being rolled out.
    #[serde(rename = "spotDeployment", deserialize_with = "crate::wire::null_default")]
    pub workload: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub original_rollout_id: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub new_rollout_id: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub start_time: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub end_time: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub cluster_id: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub namespace: String,
    /// Strategy type label, e.g. "canary" or "rolling".
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub strategy: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub has_background_verification: bool,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub new_version_status: VersionStatus,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub stable_version_status: VersionStatus,
}
