//! Configuration for the Warden facade.

use serde::{Deserialize, Serialize};

use warden_core::HasherConfig;
use warden_perms::{CapabilityConfig, ScopeConfig};

use crate::error::Result;

/// How a bare target name is interpreted by [`Warden::authorize`](crate::Warden).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingMode {
    /// Targets are resources gated by requirement strings.
    #[default]
    Capabilities,
    /// Targets are scopes gated by shared secrets.
    Scopes,
}

/// Configuration for the Warden facade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WardenConfig {
    /// Credential hasher cost parameters.
    pub hasher: HasherConfig,
    /// Capability authorization settings.
    pub capabilities: CapabilityConfig,
    /// Scoped secret authorization settings.
    pub scopes: ScopeConfig,
    /// Routing for bare target names.
    pub routing: RoutingMode,
}

impl WardenConfig {
    /// Parse a JSON configuration document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set diagnostics for both subsystems.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.capabilities.diagnostics = enabled;
        self.scopes.diagnostics = enabled;
        self
    }
}
