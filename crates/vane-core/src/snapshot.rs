//! `DetailedRollout` — one consistent point-in-time view of a rollout.

use serde::{Deserialize, Serialize};

use crate::phase::Phase;
use crate::rollout::Rollout;
use crate::strategy::{Strategy, StrategyKind};
use crate::verification::Verification;

/// Step label carried by verifications that run for the whole rollout.
pub const BACKGROUND_STEP: &str = "backgroundVerification";

/// Rollout summary, ordered phases, verifications, and (optionally) the
/// strategy definition, fetched together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedRollout {
    pub rollout: Rollout,
    pub phases: Vec<Phase>,
    pub verifications: Vec<Verification>,
    /// Strategy is immutable for a rollout, so repeated polls carry over
    /// the first fetched value.
    pub strategy: Option<Strategy>,
}

impl DetailedRollout {
    /// Verifications not scoped to a single phase, in fetch order.
    pub fn background_verifications(&self) -> Vec<&Verification> {
        self.verifications
            .iter()
            .filter(|v| v.step == BACKGROUND_STEP)
            .collect()
    }

    pub fn is_terminal(&self) -> bool {
        self.rollout.status.is_terminal()
    }

    /// Strategy kind, from the fetched definition when present and from the
    /// rollout's strategy label otherwise.
    pub fn strategy_kind(&self) -> StrategyKind {
        match &self.strategy {
            Some(strategy) => strategy.kind(),
            None => StrategyKind::from_label(&self.rollout.strategy),
        }
    }
}
