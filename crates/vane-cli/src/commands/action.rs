use anyhow::bail;
use regex::Regex;
use tracing::debug;

use vane_core::Settings;
use vane_gateway::{HttpGateway, RolloutAction, RolloutGateway};

const ROLLOUT_ID_PREFIX: &str = "rol-";

/// Send `action` to a rollout and report the outcome.
pub async fn run(settings: &Settings, rollout_id: &str, action: RolloutAction) -> anyhow::Result<()> {
    validate_rollout_id(rollout_id)?;

    let gateway = HttpGateway::new(settings)?;
    debug!(rollout = %rollout_id, %action, "sending rollout action");

    match gateway.send_action(rollout_id, action).await {
        Ok(()) => {
            println!("Successfully {} rollout {rollout_id}", action.past_tense());
            Ok(())
        }
        Err(e) => bail!("Failed to {action} the rollout - {e}"),
    }
}

/// Rollout ids are `rol-` followed by ASCII letters and digits.
pub fn validate_rollout_id(rollout_id: &str) -> anyhow::Result<()> {
    let suffix_re = Regex::new(r"^[a-zA-Z\d]*$")?;
    match rollout_id.strip_prefix(ROLLOUT_ID_PREFIX) {
        Some(suffix) if suffix_re.is_match(suffix) => Ok(()),
        _ => bail!("{rollout_id} is not a valid rollout id"),
    }
}
