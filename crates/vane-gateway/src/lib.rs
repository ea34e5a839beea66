//! vane-gateway — access to the rollout control plane.
//!
//! The [`RolloutGateway`] trait is the boundary the view layer depends on:
//! four independent reads keyed by rollout id, plus the rollout and
//! workload action triggers. [`HttpGateway`] implements it against the REST API with a
//! bearer token.
//!
//! # Components
//!
//! - **`gateway`** — The `RolloutGateway` trait, `RolloutAction` and `WorkloadAction`
//! - **`http`** — `HttpGateway`, the reqwest-backed implementation
//! - **`envelope`** — Response envelope and error body decoding
//! - **`error`** — `GatewayError` taxonomy

pub mod envelope;
pub mod error;
pub mod gateway;
pub mod http;

pub use error::{GatewayError, GatewayResult};
pub use gateway::{RolloutAction, RolloutGateway, WorkloadAction, WorkloadRequest};
pub use http::HttpGateway;
