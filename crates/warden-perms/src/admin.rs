//! Administrator identities.
//!
//! Both authorization models follow the bootstrap-open rule: while no
//! administrator is configured, every caller passes the admin check. The
//! first configured administrator closes that window.

use std::collections::BTreeMap;

use warden_core::{AuthError, CredentialHash, CredentialHasher, Credentials, Result};

/// A configured administrator.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    /// Administrator name, matched exactly.
    pub name: String,
    /// Hash of the administrator's password.
    pub credential_hash: CredentialHash,
}

impl AdminIdentity {
    /// Whether `credentials` name this admin and carry the right password.
    pub fn matches(&self, hasher: &CredentialHasher, credentials: Credentials<'_>) -> bool {
        credentials.name == Some(self.name.as_str())
            && hasher.verify_opt(credentials.secret, Some(&self.credential_hash))
    }
}

/// The single optional administrator of a capability authority, together
/// with its regenerate guard.
#[derive(Debug, Clone, Default)]
pub struct AdminSlot {
    identity: Option<AdminIdentity>,
    regenerate: bool,
}

impl AdminSlot {
    /// An empty slot with the given initial guard.
    pub fn new(regenerate: bool) -> Self {
        Self {
            identity: None,
            regenerate,
        }
    }

    /// Whether an administrator is configured.
    pub fn is_configured(&self) -> bool {
        self.identity.is_some()
    }

    /// The configured administrator's name.
    pub fn name(&self) -> Option<&str> {
        self.identity.as_ref().map(|id| id.name.as_str())
    }

    /// Whether the identity may currently be replaced or cleared.
    pub fn regenerate_allowed(&self) -> bool {
        self.regenerate
    }

    /// Admin check. Open while unconfigured.
    pub fn check(&self, hasher: &CredentialHasher, credentials: Credentials<'_>) -> bool {
        match &self.identity {
            None => true,
            Some(identity) => identity.matches(hasher, credentials),
        }
    }

    /// Set the regenerate guard. The caller has already passed [`check`](Self::check).
    pub fn set_regenerate(&mut self, allow: bool) {
        self.regenerate = allow;
    }

    /// Install a new identity unless the guard forbids replacing the current one.
    pub fn install(&mut self, hasher: &CredentialHasher, name: &str, pass: &str) -> Result<()> {
        if self.is_configured() && !self.regenerate {
            return Err(AuthError::Conflict(
                "administrator already set and regenerate is disabled".into(),
            ));
        }
        let credential_hash = hasher.hash(pass)?;
        self.identity = Some(AdminIdentity {
            name: name.to_string(),
            credential_hash,
        });
        Ok(())
    }

    /// Clear the identity unless the guard forbids it.
    pub fn reset(&mut self) -> Result<()> {
        if self.is_configured() && !self.regenerate {
            return Err(AuthError::Conflict(
                "administrator is locked and regenerate is disabled".into(),
            ));
        }
        self.identity = None;
        Ok(())
    }
}

/// A named set of administrators, as held by each access class.
#[derive(Debug, Clone, Default)]
pub struct AdminSet {
    admins: BTreeMap<String, CredentialHash>,
}

impl AdminSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether at least one administrator is registered.
    pub fn is_configured(&self) -> bool {
        !self.admins.is_empty()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.admins.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.admins.keys().cloned().collect()
    }

    /// Admin check. Open while empty.
    pub fn check(&self, hasher: &CredentialHasher, credentials: Credentials<'_>) -> bool {
        if !self.is_configured() {
            return true;
        }
        credentials
            .name
            .and_then(|name| self.admins.get(name))
            .map(|hash| hasher.verify_opt(credentials.secret, Some(hash)))
            .unwrap_or(false)
    }

    /// Register an administrator. Existing names are a conflict.
    pub fn insert(&mut self, hasher: &CredentialHasher, name: &str, pass: &str) -> Result<()> {
        if self.contains(name) {
            return Err(AuthError::Conflict(format!(
                "administrator {name} already registered"
            )));
        }
        let hash = hasher.hash(pass)?;
        self.admins.insert(name.to_string(), hash);
        Ok(())
    }
}
