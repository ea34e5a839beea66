//! Response envelope decoding.
//!
//! Every read endpoint wraps its payload as
//! `{"request": {...}, "response": {"items": [...]}}`. Failed calls carry
//! `{"response": {"errors": [{"code": "...", "message": "..."}]}}`.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use vane_core::wire::null_default;

use crate::error::{GatewayError, GatewayResult};

/// Message used when an error body cannot be understood.
pub const UNKNOWN_SERVER_ERROR: &str = "unknown server error";

#[derive(Deserialize)]
struct Envelope<T> {
    response: ItemsBody<T>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ItemsBody<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_default")]
    items: Vec<T>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    response: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default, deserialize_with = "null_default")]
    errors: Vec<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default, deserialize_with = "null_default")]
    message: String,
}

/// Decode the `response.items` list of an envelope.
///
/// `what` names the payload in the error message.
pub fn decode_items<T: DeserializeOwned>(body: &[u8], what: &str) -> GatewayResult<Vec<T>> {
    serde_json::from_slice::<Envelope<T>>(body)
        .map(|envelope| envelope.response.items)
        .map_err(|e| GatewayError::Transport(format!("failed to decode {what}: {e}")))
}

/// Decode exactly one item.
///
/// No items means the rollout does not exist; more than one is ambiguous.
pub fn decode_single<T: DeserializeOwned>(
    body: &[u8],
    what: &str,
    rollout_id: &str,
) -> GatewayResult<T> {
    let mut items = decode_items::<T>(body, what)?;
    match items.len() {
        0 => Err(not_found(rollout_id)),
        1 => Ok(items.remove(0)),
        n => Err(GatewayError::Ambiguous(format!(
            "ambiguous rollout {rollout_id}: {n} {what} items returned"
        ))),
    }
}

/// Human message extracted from a structured error body.
pub fn server_message(body: &[u8]) -> String {
    let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) else {
        return UNKNOWN_SERVER_ERROR.to_string();
    };

    let messages: Vec<String> = envelope
        .response
        .errors
        .into_iter()
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .collect();

    if messages.is_empty() {
        UNKNOWN_SERVER_ERROR.to_string()
    } else {
        messages.join("; ")
    }
}

pub(crate) fn not_found(rollout_id: &str) -> GatewayError {
    GatewayError::NotFound(format!("rollout {rollout_id} does not exist"))
}
