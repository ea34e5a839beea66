use anyhow::{Context, anyhow, bail};
use tracing::debug;

use vane_core::Settings;
use vane_gateway::{HttpGateway, RolloutGateway, WorkloadAction, WorkloadRequest};

/// Send `action` to a SpotDeployment and report the outcome.
pub async fn run(
    settings: &Settings,
    name: &str,
    action: WorkloadAction,
    revision_id: Option<&str>,
) -> anyhow::Result<()> {
    let request = build_request(settings, name, action, revision_id)?;
    let gateway = HttpGateway::new(settings)?;
    let message = send(&gateway, &request).await?;
    println!("{message}");
    Ok(())
}

/// Validate the arguments and address the request with the configured
/// cluster and namespace.
pub fn build_request(
    settings: &Settings,
    name: &str,
    action: WorkloadAction,
    revision_id: Option<&str>,
) -> anyhow::Result<WorkloadRequest> {
    let revision_id = revision_id.map(parse_revision_id).transpose()?;
    if action.takes_revision() && revision_id.is_none() {
        bail!("You must specify SpotDeployment name and revision ID.");
    }

    let cluster_id = settings
        .cluster_id
        .clone()
        .context("no cluster id configured (set cluster_id in the profile, VANE_CLUSTER_ID, or --cluster-id)")?;
    let namespace = settings
        .namespace
        .clone()
        .context("no namespace configured (set namespace in the profile, VANE_NAMESPACE, or --namespace)")?;

    Ok(WorkloadRequest {
        cluster_id,
        namespace,
        name: name.to_string(),
        action,
        revision_id,
    })
}

/// Revision ids are plain numbers.
pub fn parse_revision_id(raw: &str) -> anyhow::Result<u64> {
    raw.parse()
        .map_err(|_| anyhow!("Revision ID must be a digit, got '{raw}'"))
}

/// Send the request and return the success line.
pub async fn send(gateway: &dyn RolloutGateway, request: &WorkloadRequest) -> anyhow::Result<String> {
    debug!(
        workload = %request.name,
        action = %request.action,
        revision = ?request.revision_id,
        "sending workload action"
    );

    match gateway.send_workload_action(request).await {
        Ok(()) => Ok(format!(
            "Successfully {} workload {}",
            request.action.past_tense(),
            request.name
        )),
        Err(e) => bail!("Failed to {} the workload {}: {e}", request.action, request.name),
    }
}
