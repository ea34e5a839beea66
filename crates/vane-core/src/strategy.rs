//! Rollout strategies — canary and rolling update step definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a rollout progresses from the stable to the new version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// Shift traffic to the new version step by step.
    Canary(StrategySteps),
    /// Replace replicas of the old version step by step.
    #[serde(rename = "rolling")]
    RollingUpdate(StrategySteps),
}

/// Coarse strategy kind, used to label version blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Canary,
    RollingUpdate,
}

impl StrategyKind {
    /// Infer the kind from the rollout's strategy label.
    ///
    /// Anything that does not mention "rolling" is treated as a canary.
    pub fn from_label(label: &str) -> Self {
        if label.to_ascii_lowercase().contains("rolling") {
            StrategyKind::RollingUpdate
        } else {
            StrategyKind::Canary
        }
    }
}

/// Ordered steps of a strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategySteps {
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub steps: Vec<Step>,
}

/// A single strategy step. Its name matches the phase it produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Step {
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub name: String,
    pub set_header_route: Option<SetHeaderRoute>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetHeaderRoute {
    #[serde(rename = "match", deserialize_with = "crate::wire::null_default")]
    pub matches: Vec<HeaderMatch>,
}

/// A header-based routing rule declared by a step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderMatch {
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub header_name: String,
    #[serde(deserialize_with = "crate::wire::null_default")]
    pub header_value: HeaderValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderValue {
    pub exact: Option<String>,
    pub prefix: Option<String>,
    pub regex: Option<String>,
}

impl fmt::Display for HeaderMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = &self.header_value;
        match (&value.exact, &value.prefix, &value.regex) {
            (Some(exact), _, _) => write!(f, "{}=exact:{}", self.header_name, exact),
            (None, Some(prefix), _) => write!(f, "{}=prefix:{}", self.header_name, prefix),
            (None, None, Some(regex)) => write!(f, "{}=regex:{}", self.header_name, regex),
            (None, None, None) => write!(f, "{}", self.header_name),
        }
    }
}

impl Strategy {
    /// Parse the strategy out of a raw rollout definition.
    ///
    /// The definition carries either `strategy.canary` or `strategy.rolling`;
    /// `rolling` wins when both are present. Returns `None` when neither is.
    pub fn from_definition(definition: &serde_json::Value) -> Result<Option<Self>, serde_json::Error> {
        let Some(strategy) = definition.get("strategy") else {
            return Ok(None);
        };

        if let Some(rolling) = strategy.get("rolling").filter(|v| v.is_object()) {
            let steps = StrategySteps::deserialize(rolling)?;
            return Ok(Some(Strategy::RollingUpdate(steps)));
        }
        if let Some(canary) = strategy.get("canary").filter(|v| v.is_object()) {
            let steps = StrategySteps::deserialize(canary)?;
            return Ok(Some(Strategy::Canary(steps)));
        }

        Ok(None)
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Canary(_) => StrategyKind::Canary,
            Strategy::RollingUpdate(_) => StrategyKind::RollingUpdate,
        }
    }

    pub fn steps(&self) -> &[Step] {
        match self {
            Strategy::Canary(s) | Strategy::RollingUpdate(s) => &s.steps,
        }
    }

    /// Header-route rules declared by the steps named `step_name`, in step
    /// order.
    pub fn header_matches_for(&self, step_name: &str) -> Vec<HeaderMatch> {
        self.steps()
            .iter()
            .filter(|step| step.name == step_name)
            .filter_map(|step| step.set_header_route.as_ref())
            .flat_map(|route| route.matches.iter().cloned())
            .collect()
    }
}
