//! Rollout phases — the ordered progression steps of a rollout.

use serde::{Deserialize, Serialize};

use crate::verification::Verification;

/// Status of a single phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhaseStatus {
    #[default]
    Pending,
    InProgress,
    Verifying,
    Promoting,
    Aborting,
    Paused,
    Aborted,
    Canceled,
    Dropped,
    Promoted,
    FullPromoted,
    Finished,
    #[serde(other)]
    Unknown,
}

impl PhaseStatus {
    /// Statuses of a phase that has not run to completion yet.
    pub const UNCOMPLETED: [PhaseStatus; 6] = [
        PhaseStatus::Promoting,
        PhaseStatus::Paused,
        PhaseStatus::InProgress,
        PhaseStatus::Pending,
        PhaseStatus::Verifying,
        PhaseStatus::Aborting,
    ];

    pub fn is_uncompleted(&self) -> bool {
        Self::UNCOMPLETED.contains(self)
    }

    /// The wire name of the status (camelCase).
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseStatus::Pending => "pending",
            PhaseStatus::InProgress => "inProgress",
            PhaseStatus::Verifying => "verifying",
            PhaseStatus::Promoting => "promoting",
            PhaseStatus::Aborting => "aborting",
            PhaseStatus::Paused => "paused",
            PhaseStatus::Aborted => "aborted",
            PhaseStatus::Canceled => "canceled",
            PhaseStatus::Dropped => "dropped",
            PhaseStatus::Promoted => "promoted",
            PhaseStatus::FullPromoted => "fullPromoted",
            PhaseStatus::Finished => "finished",
            PhaseStatus::Unknown => "unknown",
        }
    }
}

/// One phase of a rollout, with the verifications that gate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Phase {
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub status: PhaseStatus,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub start_time: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub paused_at: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub verified_at: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub end_time: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub traffic_percentage: i32,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub verifications: Vec<Verification>,
}

impl Phase {
    pub fn is_uncompleted(&self) -> bool {
        self.status.is_uncompleted()
    }
}
