//! Bank parameters.
//!
//! Parameters are set at genesis (or by the hosting application's governance
//! layer) and consulted on every transfer.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::denom::validate_denom;
use crate::TypesError;

/// Per-denom override of whether transfers are allowed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEnabled {
    pub denom: String,
    pub enabled: bool,
}

/// Bank parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Overrides for individual denoms.
    #[serde(default)]
    pub send_enabled: Vec<SendEnabled>,
    /// Applies to every denom without an override.
    #[serde(default = "default_send_enabled")]
    pub default_send_enabled: bool,
}

fn default_send_enabled() -> bool {
    true
}

impl Default for Params {
    fn default() -> Self {
        Self {
            send_enabled: Vec::new(),
            default_send_enabled: default_send_enabled(),
        }
    }
}

impl Params {
    /// Whether transfers of `denom` are currently allowed.
    pub fn is_send_enabled(&self, denom: &str) -> bool {
        self.send_enabled
            .iter()
            .find(|s| s.denom == denom)
            .map(|s| s.enabled)
            .unwrap_or(self.default_send_enabled)
    }

    pub fn validate(&self) -> Result<(), TypesError> {
        let mut seen = HashSet::new();
        for entry in &self.send_enabled {
            validate_denom(&entry.denom).map_err(|e| TypesError::InvalidParams(e.to_string()))?;
            if !seen.insert(entry.denom.as_str()) {
                return Err(TypesError::InvalidParams(format!(
                    "duplicate send enabled entry for {}",
                    entry.denom
                )));
            }
        }
        Ok(())
    }
}
