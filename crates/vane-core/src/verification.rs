//! Metric verifications attached to phases or run in the background.

use serde::{Deserialize, Serialize};

/// Outcome of a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerificationStatus {
    #[default]
    Running,
    Successful,
    Failed,
    Error,
    #[serde(rename = "cancel")]
    Canceled,
    #[serde(other)]
    Unknown,
}

impl VerificationStatus {
    /// Upper-case label shown in the verification status column.
    pub fn label(&self) -> &'static str {
        match self {
            VerificationStatus::Running => "RUNNING",
            VerificationStatus::Successful => "SUCCESSFUL",
            VerificationStatus::Failed => "FAILED",
            VerificationStatus::Error => "ERROR",
            VerificationStatus::Canceled => "CANCELED",
            VerificationStatus::Unknown => "UNKNOWN",
        }
    }
}

/// A single measurement taken by a verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPoint {
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub timestamp: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub value: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub status: String,
}

/// One metric-based health check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Verification {
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub metric_name: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub start_time: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub status: VerificationStatus,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub failure_condition: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub query: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub failure_limit: i32,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub interval: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub count: i32,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub data_points: Vec<DataPoint>,
    /// Metrics provider label, e.g. "prometheus" or "datadog".
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub provider: String,
    /// Owning phase name, or the background marker.
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub step: String,
}
