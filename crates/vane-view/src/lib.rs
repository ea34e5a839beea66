//! vane-view — live rollout status view.
//!
//! Fetches a rollout snapshot from the gateway, derives the displayed
//! phase statuses, ranks verifications by severity, and renders the result
//! to a terminal, once or continuously.
//!
//! # Components
//!
//! - **`builder`** — Concurrent fan-out of gateway reads into one snapshot
//! - **`derive`** — Phase status cascade and active phase
//! - **`rank`** — Stable severity ordering of verifications
//! - **`style`** — Status icons and colors
//! - **`table`** — Display-width column alignment
//! - **`render`** — Textual layout of a snapshot
//! - **`controller`** — One-shot view and the watch loop
//! - **`shutdown`** — Cancellation shared by interrupt and timeout

pub mod builder;
pub mod controller;
pub mod derive;
pub mod rank;
pub mod render;
pub mod shutdown;
pub mod style;
pub mod table;

pub use builder::{SnapshotBuilder, StrategySource};
pub use controller::{ViewController, WatchOptions, WatchReport};
pub use derive::{active_phase_index, derive_phases};
pub use rank::{rank_verifications, severity};
pub use render::Renderer;
pub use shutdown::Shutdown;
pub use style::{Icon, Palette};
