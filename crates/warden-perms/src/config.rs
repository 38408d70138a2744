//! Configuration for the authorization subsystems.

use serde::{Deserialize, Serialize};

/// Configuration for [`CapabilityAuthority`](crate::CapabilityAuthority).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityConfig {
    /// Emit warnings for denied or invalid operations.
    pub diagnostics: bool,
    /// Initial value of the regenerate guard.
    pub allow_regenerate: bool,
}

impl Default for CapabilityConfig {
    fn default() -> Self {
        Self {
            diagnostics: true,
            allow_regenerate: false,
        }
    }
}

/// Configuration for [`ScopeAuthority`](crate::ScopeAuthority).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Emit warnings for denied or invalid operations.
    pub diagnostics: bool,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self { diagnostics: true }
    }
}
