//! Scoped secret authorization.
//!
//! Each access class (scope) is an independent namespace guarded by its own
//! shared secret, an optional set of administrators, and an optional user
//! whitelist. An empty whitelist admits every caller who knows the secret.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use warden_core::{
    AuthError, Authorizer, CredentialHash, CredentialHasher, Credentials, Decision, ErrorKind,
    Result,
};

use crate::admin::AdminSet;
use crate::config::ScopeConfig;

/// Lifecycle state of a scope name.
///
/// A removed access class is gone for good; its name returns to
/// `Uninitialized` and may be created again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    /// No access class exists under this name.
    Uninitialized,
    /// The access class exists.
    Active,
}

/// A single access class.
#[derive(Debug, Clone)]
pub struct AccessClass {
    secret_hash: CredentialHash,
    admins: AdminSet,
    whitelist: Vec<String>,
}

impl AccessClass {
    /// Whether `user` passes the whitelist.
    pub fn is_eligible(&self, user: Option<&str>) -> bool {
        if self.whitelist.is_empty() {
            return true;
        }
        user.map_or(false, |u| self.whitelist.iter().any(|w| w == u))
    }

    /// Registered administrator names.
    pub fn admin_names(&self) -> Vec<String> {
        self.admins.names()
    }

    /// Whitelisted user names, in insertion order.
    pub fn whitelist(&self) -> &[String] {
        &self.whitelist
    }
}

/// Authority over a set of independently secured scopes.
#[derive(Debug)]
pub struct ScopeAuthority {
    hasher: CredentialHasher,
    config: ScopeConfig,
    classes: BTreeMap<String, AccessClass>,
}

impl ScopeAuthority {
    /// Create an authority with no scopes.
    pub fn new(hasher: CredentialHasher, config: ScopeConfig) -> Self {
        Self {
            hasher,
            config,
            classes: BTreeMap::new(),
        }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &ScopeConfig {
        &self.config
    }

    /// Toggle diagnostics. Never affects decisions.
    pub fn set_diagnostics(&mut self, enabled: bool) {
        self.config.diagnostics = enabled;
    }

    /// Whether a scope exists.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.classes.contains_key(scope)
    }

    /// Lifecycle state of a scope name.
    pub fn scope_state(&self, scope: &str) -> ScopeState {
        if self.has_scope(scope) {
            ScopeState::Active
        } else {
            ScopeState::Uninitialized
        }
    }

    /// Existing scope names, sorted.
    pub fn scope_names(&self) -> Vec<String> {
        self.classes.keys().cloned().collect()
    }

    /// Borrow an access class.
    pub fn access_class(&self, scope: &str) -> Option<&AccessClass> {
        self.classes.get(scope)
    }

    /// Whitelisted users of a scope.
    pub fn scope_users(&self, scope: &str) -> Result<Vec<String>> {
        self.classes
            .get(scope)
            .map(|class| class.whitelist.clone())
            .ok_or_else(|| self.diagnose("scope_users", not_found_scope(scope)))
    }

    /// True if the scope is unknown or has no administrators, or if `admin`
    /// verifies against one of its administrators.
    pub fn scope_admin_check(&self, scope: &str, admin: Credentials<'_>) -> bool {
        match self.classes.get(scope) {
            None => true,
            Some(class) => {
                if !class.admins.is_configured() {
                    return true;
                }
                class.admins.check(&self.hasher, admin)
            }
        }
    }

    /// Create a scope guarded by `secret`.
    pub fn create_scope(&mut self, scope: &str, secret: &str, admin: Credentials<'_>) -> Result<()> {
        self.require_scope_admin("create_scope", scope, admin)?;
        if self.has_scope(scope) {
            return Err(self.diagnose(
                "create_scope",
                AuthError::Conflict(format!("scope {scope} already has a secret")),
            ));
        }
        let secret_hash = self.hasher.hash(secret)?;
        self.classes.insert(
            scope.to_string(),
            AccessClass {
                secret_hash,
                admins: AdminSet::new(),
                whitelist: Vec::new(),
            },
        );
        debug!(scope, "scope created");
        Ok(())
    }

    /// Whether `user` may enter `scope` with `secret`.
    pub fn check_access(&self, scope: &str, secret: &str, user: Option<&str>) -> bool {
        let class = match self.classes.get(scope) {
            Some(class) => class,
            None => {
                self.warn_denied(scope, "unknown scope");
                return false;
            }
        };
        let eligible = class.is_eligible(user);
        let allowed = eligible && self.hasher.verify(secret, &class.secret_hash);
        if !allowed {
            let reason = if eligible {
                "wrong secret"
            } else {
                "not whitelisted"
            };
            self.warn_denied(scope, reason);
        }
        allowed
    }

    /// Remove a scope. Needs scope admin rights and the secret.
    pub fn remove_scope(&mut self, scope: &str, secret: &str, admin: Credentials<'_>) -> Result<()> {
        let class = self
            .classes
            .get(scope)
            .ok_or_else(|| self.diagnose("remove_scope", not_found_scope(scope)))?;
        let secret_ok = self.hasher.verify(secret, &class.secret_hash);
        self.require_scope_admin("remove_scope", scope, admin)?;
        if !secret_ok {
            return Err(self.diagnose(
                "remove_scope",
                AuthError::AuthenticationFailure(format!("wrong secret for scope {scope}")),
            ));
        }
        self.classes.remove(scope);
        debug!(scope, "scope removed");
        Ok(())
    }

    /// Register a scope administrator.
    ///
    /// Knowing the secret stands in for prior admin authority. The new admin
    /// is also whitelisted.
    pub fn set_scope_admin(
        &mut self,
        scope: &str,
        secret: &str,
        admin_name: &str,
        admin_pass: &str,
    ) -> Result<()> {
        let class = match self.classes.get(scope) {
            Some(class) => class,
            None => return Err(self.diagnose("set_scope_admin", not_found_scope(scope))),
        };
        if class.admins.contains(admin_name) {
            return Err(self.diagnose(
                "set_scope_admin",
                AuthError::Conflict(format!("administrator {admin_name} already registered")),
            ));
        }
        if !self.hasher.verify(secret, &class.secret_hash) {
            return Err(self.diagnose(
                "set_scope_admin",
                AuthError::AuthenticationFailure(format!("wrong secret for scope {scope}")),
            ));
        }

        let hasher = &self.hasher;
        let class = self
            .classes
            .get_mut(scope)
            .ok_or_else(|| not_found_scope(scope))?;
        class.admins.insert(hasher, admin_name, admin_pass)?;
        if !class.whitelist.iter().any(|w| w == admin_name) {
            class.whitelist.push(admin_name.to_string());
        }
        debug!(scope, admin = admin_name, "scope administrator registered");
        Ok(())
    }

    /// Whitelist a user.
    pub fn add_user(&mut self, scope: &str, user: &str, admin: Credentials<'_>) -> Result<()> {
        let class = self.class_for_admin("add_user", scope, admin)?;
        if class.whitelist.iter().any(|w| w == user) {
            return Err(self.diagnose(
                "add_user",
                AuthError::Conflict(format!("user {user} already in scope {scope}")),
            ));
        }
        class.whitelist.push(user.to_string());
        debug!(scope, user, "user whitelisted");
        Ok(())
    }

    /// Remove every whitelist entry matching `user`.
    pub fn remove_user(&mut self, scope: &str, user: &str, admin: Credentials<'_>) -> Result<()> {
        let class = self.class_for_admin("remove_user", scope, admin)?;
        let before = class.whitelist.len();
        class.whitelist.retain(|w| w != user);
        if class.whitelist.len() == before {
            return Err(self.diagnose(
                "remove_user",
                AuthError::NotFound(format!("user {user} in scope {scope}")),
            ));
        }
        debug!(scope, user, "user removed from whitelist");
        Ok(())
    }

    /// Discard every scope.
    ///
    /// Consumes the authority; scopes guarded by administrators are only
    /// removable one at a time through [`remove_scope`](Self::remove_scope).
    pub fn teardown(self) {
        debug!(scopes = self.classes.len(), "scope authority torn down");
    }

    fn class_for_admin(
        &mut self,
        operation: &'static str,
        scope: &str,
        admin: Credentials<'_>,
    ) -> Result<&mut AccessClass> {
        if !self.has_scope(scope) {
            return Err(self.diagnose(operation, not_found_scope(scope)));
        }
        self.require_scope_admin(operation, scope, admin)?;
        self.classes
            .get_mut(scope)
            .ok_or_else(|| not_found_scope(scope))
    }

    fn require_scope_admin(
        &self,
        operation: &'static str,
        scope: &str,
        admin: Credentials<'_>,
    ) -> Result<()> {
        if self.scope_admin_check(scope, admin) {
            Ok(())
        } else {
            Err(self.diagnose(
                operation,
                AuthError::AuthenticationFailure(format!(
                    "administrator credentials rejected for scope {scope}"
                )),
            ))
        }
    }

    fn diagnose(&self, operation: &'static str, err: AuthError) -> AuthError {
        if self.config.diagnostics {
            warn!(operation, kind = %err.kind(), "{}", err.detail());
        }
        err
    }

    fn warn_denied(&self, scope: &str, reason: &str) {
        if self.config.diagnostics {
            warn!(scope, reason, "scope access denied");
        }
    }
}

/// Scope decisions: the credential name is the user, the proof is the scope
/// secret. Unknown scopes are reported as `NotFound` rather than denied.
impl Authorizer for ScopeAuthority {
    fn authorize(&self, target: &str, credentials: Credentials<'_>, _args: &[Value]) -> Decision {
        if !self.has_scope(target) {
            return Decision::Error(ErrorKind::NotFound);
        }
        let secret = credentials.secret.unwrap_or_default();
        Decision::from_bool(self.check_access(target, secret, credentials.name))
    }
}

fn not_found_scope(scope: &str) -> AuthError {
    AuthError::NotFound(format!("scope {scope}"))
}
