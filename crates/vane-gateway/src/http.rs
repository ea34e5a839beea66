//! `HttpGateway` — the REST implementation of [`RolloutGateway`].
//!
//! Endpoints, relative to the configured base URL:
//!
//! ```text
//! GET /rollout/{id}/status        rollout summary (exactly one item)
//! GET /rollout/{id}/phase         ordered phases (at least one item)
//! GET /rollout/{id}/verification  verifications (any number)
//! GET /rollout/{id}/definition    raw definition holding the strategy
//! PUT /rollout/{id}               {"action": "..."}
//! PUT /workload/{namespace}/{name}/{action}[/{revision}]?clusterId=...&kind=SpotDeployment
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use vane_core::{Phase, Rollout, Settings, Strategy, Verification};

use crate::envelope::{decode_items, decode_single, not_found, server_message};
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{
    ActionRequest, RolloutAction, RolloutGateway, WORKLOAD_KIND, WorkloadRequest,
};

/// Rollout gateway over HTTP with bearer-token authentication.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    token: String,
}

impl HttpGateway {
    /// Build a gateway from resolved settings.
    pub fn new(settings: &Settings) -> GatewayResult<Self> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            GatewayError::Transport(format!("invalid base url '{}': {e}", settings.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::Transport(format!(
                "invalid base url '{}'",
                settings.base_url
            )));
        }

        let client = Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(concat!("vane/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: settings.token.clone(),
        })
    }

    /// `{base}/rollout/{id}[/{resource}]`, with the id percent-encoded.
    fn endpoint(&self, rollout_id: &str, resource: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("rollout").push(rollout_id);
            if let Some(resource) = resource {
                segments.push(resource);
            }
        }
        url
    }

    /// `{base}/workload/{namespace}/{name}/{action}[/{revision}]` with the
    /// cluster and kind as query parameters.
    fn workload_endpoint(&self, request: &WorkloadRequest) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("workload")
                .push(&request.namespace)
                .push(&request.name)
                .push(request.action.as_str());
            if let Some(revision_id) = request.revision_id {
                segments.push(&revision_id.to_string());
            }
        }
        url.query_pairs_mut()
            .append_pair("clusterId", &request.cluster_id)
            .append_pair("kind", WORKLOAD_KIND);
        url
    }

    /// GET a rollout sub-resource and return the raw success body.
    async fn get(&self, rollout_id: &str, resource: &str) -> GatewayResult<Vec<u8>> {
        let url = self.endpoint(rollout_id, Some(resource));
        debug!(rollout = %rollout_id, %url, "GET");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        check_status(status, &body, || not_found(rollout_id))?;
        Ok(body.to_vec())
    }
}

/// Map a non-success status to the error taxonomy. `missing` builds the
/// error for 400 and 404.
fn check_status<F>(status: StatusCode, body: &[u8], missing: F) -> GatewayResult<()>
where
    F: FnOnce() -> GatewayError,
{
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
        return Err(missing());
    }
    Err(GatewayError::Server {
        status: status.as_u16(),
        message: server_message(body),
    })
}

#[async_trait]
impl RolloutGateway for HttpGateway {
    async fn rollout(&self, rollout_id: &str) -> GatewayResult<Rollout> {
        let body = self.get(rollout_id, "status").await?;
        decode_single(&body, "rollout", rollout_id)
    }

    async fn phases(&self, rollout_id: &str) -> GatewayResult<Vec<Phase>> {
        let body = self.get(rollout_id, "phase").await?;
        let phases: Vec<Phase> = decode_items(&body, "phase")?;
        if phases.is_empty() {
            return Err(GatewayError::NotFound(format!(
                "no phases found for rollout {rollout_id}"
            )));
        }
        Ok(phases)
    }

    async fn verifications(&self, rollout_id: &str) -> GatewayResult<Vec<Verification>> {
        let body = self.get(rollout_id, "verification").await?;
        decode_items(&body, "verification")
    }

    async fn strategy(&self, rollout_id: &str) -> GatewayResult<Option<Strategy>> {
        let body = self.get(rollout_id, "definition").await?;
        let definitions: Vec<serde_json::Value> = decode_items(&body, "definition")?;
        let Some(definition) = definitions.first() else {
            return Err(not_found(rollout_id));
        };
        Strategy::from_definition(definition)
            .map_err(|e| GatewayError::Transport(format!("failed to decode strategy: {e}")))
    }

    async fn send_action(&self, rollout_id: &str, action: RolloutAction) -> GatewayResult<()> {
        let url = self.endpoint(rollout_id, None);
        debug!(rollout = %rollout_id, %action, %url, "PUT");

        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .json(&ActionRequest { action })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        check_status(status, &body, || not_found(rollout_id))
    }

    async fn send_workload_action(&self, request: &WorkloadRequest) -> GatewayResult<()> {
        let url = self.workload_endpoint(request);
        debug!(workload = %request.name, action = %request.action, %url, "PUT");

        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        check_status(status, &body, || {
            GatewayError::NotFound(format!(
                "workload {} does not exist in namespace {}",
                request.name, request.namespace
            ))
        })
    }
}
