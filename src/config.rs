//! Machine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of transition records a machine keeps.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Settings applied when a machine is created.
///
/// Missing fields take their defaults when deserializing, so a config file
/// only needs to name what it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsmConfig {
    /// Broadcast a state-change event on every transition.
    pub broadcast_state_changes: bool,

    /// Committed transitions kept in the history; `0` keeps only the count.
    pub history_limit: usize,
}

impl Default for FsmConfig {
    fn default() -> Self {
        Self {
            broadcast_state_changes: false,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl FsmConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid machine configuration: {0}")]
    Json(#[from] serde_json::Error),
}
