//! vane-core — shared types for the Vane rollout CLI.
//!
//! These types mirror the read-only state reported by the rollout control
//! plane. Nothing here talks to the network: the gateway crate fetches and
//! decodes them, the view crate derives and renders them.
//!
//! # Components
//!
//! - **`rollout`** — Rollout summary, status, and per-version status
//! - **`phase`** — Phase progression and its status
//! - **`verification`** — Metric verifications and their status
//! - **`strategy`** — Canary / rolling-update step definitions
//! - **`snapshot`** — `DetailedRollout`, the point-in-time aggregate
//! - **`config`** — Profile file and settings resolution
//! - **`wire`** — `null`-tolerant field decoding

pub mod config;
pub mod phase;
pub mod rollout;
pub mod snapshot;
pub mod strategy;
pub mod verification;
pub mod wire;

pub use config::{ConfigError, ConfigFile, ConfigResult, ENV_CONFIG, Overrides, Profile, Settings};
pub use phase::{Phase, PhaseStatus};
pub use rollout::{ReplicasInfo, Rollout, RolloutStatus, VersionStatus};
pub use snapshot::{BACKGROUND_STEP, DetailedRollout};
pub use strategy::{HeaderMatch, HeaderValue, SetHeaderRoute, Step, Strategy, StrategyKind, StrategySteps};
pub use verification::{DataPoint, Verification, VerificationStatus};
