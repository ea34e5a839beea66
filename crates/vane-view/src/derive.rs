//! Displayed phase statuses.
//!
//! The control plane reports each phase on its own terms. The view
//! overrides those statuses to reflect the rollout as a whole:
//!
//! - once a phase was fully promoted, every later phase is `Dropped`,
//!   except the last one, which is `Finished`;
//! - an `Aborted` rollout drops every phase that never completed;
//! - a `Canceled` rollout cancels every phase that never completed.
//!
//! Derivation always works on a copy; the fetched phases are untouched.

use vane_core::{Phase, PhaseStatus, RolloutStatus};

/// Derive the displayed phases of a rollout in `status`.
pub fn derive_phases(status: RolloutStatus, phases: &[Phase]) -> Vec<Phase> {
    let last = phases.len().saturating_sub(1);
    let mut fully_promoted = false;

    phases
        .iter()
        .enumerate()
        .map(|(index, phase)| {
            let original = phase.status;
            let derived = if fully_promoted {
                if index == last {
                    PhaseStatus::Finished
                } else {
                    PhaseStatus::Dropped
                }
            } else if original.is_uncompleted() && status == RolloutStatus::Aborted {
                PhaseStatus::Dropped
            } else if original.is_uncompleted() && status == RolloutStatus::Canceled {
                PhaseStatus::Canceled
            } else {
                original
            };

            // The cascade is keyed on what the server reported.
            if original == PhaseStatus::FullPromoted {
                fully_promoted = true;
            }

            Phase {
                status: derived,
                ..phase.clone()
            }
        })
        .collect()
}

/// One-based position of the first uncompleted phase, or the phase count
/// when every phase has completed.
pub fn active_phase_index(phases: &[Phase]) -> usize {
    phases
        .iter()
        .position(Phase::is_uncompleted)
        .map(|index| index + 1)
        .unwrap_or(phases.len())
}
