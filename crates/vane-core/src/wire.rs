//! Decoding helpers for control-plane payloads.

use serde::{Deserialize, Deserializer};

/// Decode `null` the same as a missing field: as `T::default()`.
///
/// The control plane serializes empty lists and unset strings as `null`.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "null_default")]
        names: Vec<String>,
        #[serde(deserialize_with = "null_default")]
        label: String,
        #[serde(deserialize_with = "null_default")]
        count: i32,
    }

    #[test]
    fn null_becomes_default() {
        let sample: Sample =
            serde_json::from_str(r#"{"names": null, "label": null, "count": null}"#).unwrap();
        assert!(sample.names.is_empty());
        assert!(sample.label.is_empty());
        assert_eq!(sample.count, 0);
    }

    #[test]
    fn values_and_missing_fields_still_decode() {
        let sample: Sample = serde_json::from_str(r#"{"names": ["a"], "count": -1}"#).unwrap();
        assert_eq!(sample.names, ["a"]);
        assert!(sample.label.is_empty());
        assert_eq!(sample.count, -1);
    }
}
