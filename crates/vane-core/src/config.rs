//! Profile configuration (`~/.vane/config.toml`) and settings resolution.
//!
//! Every setting resolves in the same order: command-line flag, then
//! environment variable, then the selected profile, then the default.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_URL: &str = "https://api.spotinst.io/ocean/cd";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ENV_CONFIG: &str = "VANE_CONFIG";
pub const ENV_PROFILE: &str = "VANE_PROFILE";
pub const ENV_TOKEN: &str = "VANE_TOKEN";
pub const ENV_URL: &str = "VANE_URL";
pub const ENV_CLUSTER_ID: &str = "VANE_CLUSTER_ID";
pub const ENV_NAMESPACE: &str = "VANE_NAMESPACE";

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("profile '{0}' is not defined in the config file")]
    UnknownProfile(String),

    #[error("no access token configured for profile '{0}' (set it in the config file, VANE_TOKEN, or --token)")]
    MissingToken(String),
}

/// On-disk config file: a set of named profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub default_profile: Option<String>,
    pub profiles: BTreeMap<String, Profile>,
}

/// One named set of credentials and client preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub token: Option<String>,
    pub url: Option<String>,
    /// Delay between successful watch polls. Zero polls back-to-back.
    pub poll_interval_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    /// Cluster targeted by workload actions.
    pub cluster_id: Option<String>,
    /// Namespace targeted by workload actions.
    pub namespace: Option<String>,
}

/// Values supplied on the command line, taking precedence over everything.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub token: Option<String>,
    pub url: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub cluster_id: Option<String>,
    pub namespace: Option<String>,
}

/// Fully resolved client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub profile: String,
    pub token: String,
    pub base_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub cluster_id: Option<String>,
    pub namespace: Option<String>,
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load the file if it exists. A missing file is an empty config.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// `$HOME/.vane/config.toml`, if a home directory can be found.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".vane").join("config.toml"))
    }
}

impl Settings {
    /// Resolve settings from the config file, environment, and overrides.
    ///
    /// `env` looks up an environment variable; it is a parameter so callers
    /// (and tests) control where the environment comes from.
    pub fn resolve<F>(file: &ConfigFile, overrides: &Overrides, env: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let explicit_profile = overrides.profile.clone().or_else(|| env(ENV_PROFILE));
        let profile_name = explicit_profile
            .clone()
            .or_else(|| file.default_profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        let profile = match file.profiles.get(&profile_name) {
            Some(profile) => profile.clone(),
            None if explicit_profile.is_some() => {
                return Err(ConfigError::UnknownProfile(profile_name));
            }
            None => Profile::default(),
        };

        let token = overrides
            .token
            .clone()
            .or_else(|| env(ENV_TOKEN))
            .or(profile.token)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingToken(profile_name.clone()))?;

        let base_url = overrides
            .url
            .clone()
            .or_else(|| env(ENV_URL))
            .or(profile.url)
            .unwrap_or_else(|| DEFAULT_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let poll_interval_ms = overrides.poll_interval_ms.or(profile.poll_interval_ms).unwrap_or(0);
        let request_timeout_secs = profile
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let cluster_id = overrides
            .cluster_id
            .clone()
            .or_else(|| env(ENV_CLUSTER_ID))
            .or(profile.cluster_id)
            .filter(|c| !c.trim().is_empty());
        let namespace = overrides
            .namespace
            .clone()
            .or_else(|| env(ENV_NAMESPACE))
            .or(profile.namespace)
            .filter(|n| !n.trim().is_empty());

        Ok(Settings {
            profile: profile_name,
            token,
            base_url,
            poll_interval: Duration::from_millis(poll_interval_ms),
            request_timeout: Duration::from_secs(request_timeout_secs),
            cluster_id,
            namespace,
        })
    }
}
