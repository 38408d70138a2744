//! The Warden: unified authorization facade.
//!
//! The Warden owns one capability authority and one scope authority and
//! routes every decision to one of them. Outer layers (property storage,
//! type casting, state tagging) only ever see [`Authorizer::authorize`].

use serde_json::Value;
use tracing::debug;

use warden_core::{Authorizer, CredentialHasher, Credentials, Decision};
use warden_perms::{CapabilityAuthority, ScopeAuthority};

use crate::config::{RoutingMode, WardenConfig};
use crate::error::Result;

/// An explicitly typed authorization target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// A resource gated by a requirement string.
    Resource(&'a str),
    /// A scope gated by a shared secret.
    Scope(&'a str),
}

impl<'a> Target<'a> {
    /// The target's name.
    pub fn name(&self) -> &'a str {
        match self {
            Target::Resource(name) | Target::Scope(name) => name,
        }
    }
}

/// The main Warden struct.
///
/// Provides a unified API for:
/// - Deciding access to resources and scopes
/// - Reaching the capability authority (admin, users, requirements)
/// - Reaching the scope authority (scopes, scope admins, whitelists)
///
/// There is no internal locking. Share an instance across threads behind a
/// single mutex.
#[derive(Debug)]
pub struct Warden {
    /// Configuration.
    config: WardenConfig,
    /// Single-admin capability model.
    capabilities: CapabilityAuthority,
    /// Per-scope shared-secret model.
    scopes: ScopeAuthority,
}

impl Warden {
    /// Create a Warden with empty authorities.
    pub fn new(config: WardenConfig) -> Result<Self> {
        let hasher = CredentialHasher::new(config.hasher.clone())?;
        Ok(Self {
            capabilities: CapabilityAuthority::new(hasher.clone(), config.capabilities.clone()),
            scopes: ScopeAuthority::new(hasher, config.scopes.clone()),
            config,
        })
    }

    /// Create a Warden from a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(WardenConfig::from_json(json)?)
    }

    /// The configuration this Warden was built with.
    pub fn config(&self) -> &WardenConfig {
        &self.config
    }

    /// The routing mode for bare target names.
    pub fn routing(&self) -> RoutingMode {
        self.config.routing
    }

    /// The capability authority.
    pub fn capabilities(&self) -> &CapabilityAuthority {
        &self.capabilities
    }

    /// The capability authority, mutably.
    pub fn capabilities_mut(&mut self) -> &mut CapabilityAuthority {
        &mut self.capabilities
    }

    /// The scope authority.
    pub fn scopes(&self) -> &ScopeAuthority {
        &self.scopes
    }

    /// The scope authority, mutably.
    pub fn scopes_mut(&mut self) -> &mut ScopeAuthority {
        &mut self.scopes
    }

    /// Toggle diagnostics on both subsystems.
    pub fn set_diagnostics(&mut self, enabled: bool) {
        self.config = self.config.clone().with_diagnostics(enabled);
        self.capabilities.set_diagnostics(enabled);
        self.scopes.set_diagnostics(enabled);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Decisions
    // ─────────────────────────────────────────────────────────────────────────

    /// Decide access to a bare target name, routed by the configured mode.
    pub fn authorize(&self, target: &str, credentials: Credentials<'_>, args: &[Value]) -> Decision {
        let target = match self.config.routing {
            RoutingMode::Capabilities => Target::Resource(target),
            RoutingMode::Scopes => Target::Scope(target),
        };
        self.authorize_target(target, credentials, args)
    }

    /// Decide access to an explicitly typed target.
    pub fn authorize_target(
        &self,
        target: Target<'_>,
        credentials: Credentials<'_>,
        args: &[Value],
    ) -> Decision {
        let decision = match target {
            Target::Resource(resource) => self.capabilities.authorize(resource, credentials, args),
            Target::Scope(scope) => Authorizer::authorize(&self.scopes, scope, credentials, args),
        };
        debug!(?target, %decision, "authorization decided");
        decision
    }

    /// Invoke a user's callback capability outside of any resource.
    pub fn run_capability_callback(&self, credentials: Credentials<'_>, args: &[Value]) -> Decision {
        self.capabilities.run_capability_callback(credentials, args)
    }

    /// Discard all in-memory state of both authorities, consuming the Warden.
    pub fn teardown(self) {
        self.capabilities.teardown();
        self.scopes.teardown();
    }
}

impl Authorizer for Warden {
    fn authorize(&self, target: &str, credentials: Credentials<'_>, args: &[Value]) -> Decision {
        Warden::authorize(self, target, credentials, args)
    }
}
