//! Capability authorization.
//!
//! A single optional administrator manages users, their capability strings,
//! and per-resource requirement strings. A user may access a resource when
//! their capability shares at least one character with the resource's
//! requirement.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use warden_core::{
    is_truthy, AuthError, Authorizer, Capability, CredentialHash, CredentialHasher, Credentials,
    Decision, ErrorKind, Result,
};

use crate::admin::AdminSlot;
use crate::charset;
use crate::config::CapabilityConfig;

/// A registered user.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// User name.
    pub name: String,
    /// Password hash. `None` for a passwordless user.
    pub credential_hash: Option<CredentialHash>,
    /// Granted capability, if any.
    pub capability: Option<Capability>,
}

impl UserRecord {
    /// Whether `pass` authenticates this user.
    ///
    /// A passwordless user authenticates only with an absent or empty pass.
    pub fn authenticates(&self, hasher: &CredentialHasher, pass: Option<&str>) -> bool {
        match &self.credential_hash {
            Some(hash) => hasher.verify_opt(pass, Some(hash)),
            None => pass.map_or(true, str::is_empty),
        }
    }
}

/// Single-administrator capability authority.
#[derive(Debug)]
pub struct CapabilityAuthority {
    hasher: CredentialHasher,
    config: CapabilityConfig,
    admin: AdminSlot,
    users: BTreeMap<String, UserRecord>,
    requirements: BTreeMap<String, String>,
}

impl CapabilityAuthority {
    /// Create an empty authority. No administrator is configured.
    pub fn new(hasher: CredentialHasher, config: CapabilityConfig) -> Self {
        let admin = AdminSlot::new(config.allow_regenerate);
        Self {
            hasher,
            config,
            admin,
            users: BTreeMap::new(),
            requirements: BTreeMap::new(),
        }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &CapabilityConfig {
        &self.config
    }

    /// Toggle diagnostics. Never affects decisions.
    pub fn set_diagnostics(&mut self, enabled: bool) {
        self.config.diagnostics = enabled;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Administrator
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether an administrator is configured.
    pub fn is_configured(&self) -> bool {
        self.admin.is_configured()
    }

    /// The administrator's name, if configured.
    pub fn admin_name(&self) -> Option<&str> {
        self.admin.name()
    }

    /// Whether the administrator may currently be replaced or reset.
    pub fn regenerate_allowed(&self) -> bool {
        self.admin.regenerate_allowed()
    }

    /// True when no administrator is configured, or when `admin` names the
    /// administrator and carries the right password.
    pub fn admin_check(&self, admin: Credentials<'_>) -> bool {
        if !self.is_configured() {
            return true;
        }
        self.admin.check(&self.hasher, admin)
    }

    /// Allow or forbid replacing the administrator.
    pub fn admin_regenerate_set(&mut self, allow: bool, admin: Credentials<'_>) -> Result<()> {
        self.require_admin("admin_regenerate_set", admin)?;
        self.admin.set_regenerate(allow);
        debug!(allow, "regenerate guard updated");
        Ok(())
    }

    /// Install the administrator.
    ///
    /// Fails with `Conflict` when an administrator exists and the regenerate
    /// guard is off.
    pub fn admin_set(&mut self, name: &str, pass: &str) -> Result<()> {
        self.admin
            .install(&self.hasher, name, pass)
            .map_err(|e| self.diagnose("admin_set", e))?;
        debug!(admin = name, "administrator installed");
        Ok(())
    }

    /// Clear the administrator, reopening the bootstrap window.
    pub fn admin_reset(&mut self) -> Result<()> {
        self.admin
            .reset()
            .map_err(|e| self.diagnose("admin_reset", e))?;
        debug!("administrator reset");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a user. The password is optional.
    pub fn user_add(&mut self, admin: Credentials<'_>, user: &str, pass: Option<&str>) -> Result<()> {
        self.require_admin("user_add", admin)?;
        if self.users.contains_key(user) {
            return Err(self.diagnose(
                "user_add",
                AuthError::Conflict(format!("user {user} already exists")),
            ));
        }
        let credential_hash = pass.map(|p| self.hasher.hash(p)).transpose()?;
        self.users.insert(
            user.to_string(),
            UserRecord {
                name: user.to_string(),
                credential_hash,
                capability: None,
            },
        );
        debug!(user, "user added");
        Ok(())
    }

    /// Remove a user and their capability.
    pub fn user_remove(&mut self, admin: Credentials<'_>, user: &str) -> Result<()> {
        self.require_admin("user_remove", admin)?;
        if self.users.remove(user).is_none() {
            return Err(self.diagnose("user_remove", not_found_user(user)));
        }
        debug!(user, "user removed");
        Ok(())
    }

    /// Whether a user is registered.
    pub fn user_has(&self, admin: Credentials<'_>, user: &str) -> Result<bool> {
        self.require_admin("user_has", admin)?;
        Ok(self.users.contains_key(user))
    }

    /// All registered user names, sorted.
    pub fn user_list(&self, admin: Credentials<'_>) -> Result<Vec<String>> {
        self.require_admin("user_list", admin)?;
        Ok(self.users.keys().cloned().collect())
    }

    /// Whether `user` exists and `pass` authenticates them.
    pub fn user_check(&self, user: Credentials<'_>) -> bool {
        user.name
            .and_then(|name| self.users.get(name))
            .map(|record| record.authenticates(&self.hasher, user.secret))
            .unwrap_or(false)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // User capabilities
    // ─────────────────────────────────────────────────────────────────────────

    /// A user's capability.
    pub fn user_capability(&self, admin: Credentials<'_>, user: &str) -> Result<Option<&Capability>> {
        self.require_admin("user_capability", admin)?;
        match self.users.get(user) {
            Some(record) => Ok(record.capability.as_ref()),
            None => Err(self.diagnose("user_capability", not_found_user(user))),
        }
    }

    /// Replace a user's capability wholesale.
    pub fn user_capability_set(
        &mut self,
        admin: Credentials<'_>,
        user: &str,
        capability: impl Into<Capability>,
    ) -> Result<()> {
        self.require_admin("user_capability_set", admin)?;
        let record = self.user_mut("user_capability_set", user)?;
        record.capability = Some(capability.into());
        Ok(())
    }

    /// Append characters to a user's literal capability.
    ///
    /// Raw concatenation; duplicates are kept.
    pub fn user_capability_add(&mut self, admin: Credentials<'_>, user: &str, chars: &str) -> Result<()> {
        self.require_admin("user_capability_add", admin)?;
        let record = self.user_mut("user_capability_add", user)?;
        let result = match &mut record.capability {
            Some(Capability::Literal(existing)) => {
                existing.push_str(chars);
                Ok(())
            }
            Some(Capability::Computed(_)) => Err(AuthError::InvalidArgument(format!(
                "user {user} has a computed capability"
            ))),
            slot @ None => {
                *slot = Some(Capability::literal(chars));
                Ok(())
            }
        };
        result.map_err(|e| self.diagnose("user_capability_add", e))
    }

    /// Remove every character of `pattern` from a user's literal capability.
    pub fn user_capability_remove(
        &mut self,
        admin: Credentials<'_>,
        user: &str,
        pattern: &str,
    ) -> Result<()> {
        self.require_admin("user_capability_remove", admin)?;
        let record = self.user_mut("user_capability_remove", user)?;
        let result = match &mut record.capability {
            None => Err(AuthError::NotFound(format!("user {user} has no capability"))),
            Some(Capability::Literal(existing)) => {
                charset::remove_chars(existing, pattern).map(|stripped| *existing = stripped)
            }
            Some(Capability::Computed(_)) => Err(AuthError::InvalidArgument(format!(
                "user {user} has a computed capability"
            ))),
        };
        result.map_err(|e| self.diagnose("user_capability_remove", e))
    }

    /// Remove a user's capability.
    pub fn user_capability_clear(&mut self, admin: Credentials<'_>, user: &str) -> Result<()> {
        self.require_admin("user_capability_clear", admin)?;
        let record = self.user_mut("user_capability_clear", user)?;
        if record.capability.take().is_none() {
            return Err(self.diagnose(
                "user_capability_clear",
                AuthError::NotFound(format!("user {user} has no capability")),
            ));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Resource requirements
    // ─────────────────────────────────────────────────────────────────────────

    /// The requirement string of a resource, if configured.
    pub fn resource_requirement(&self, resource: &str) -> Option<&str> {
        self.requirements.get(resource).map(String::as_str)
    }

    /// Resources that carry a requirement, sorted.
    pub fn resources(&self) -> Vec<String> {
        self.requirements.keys().cloned().collect()
    }

    /// Replace a resource's requirement.
    pub fn resource_requirement_set(
        &mut self,
        admin: Credentials<'_>,
        resource: &str,
        requirement: &str,
    ) -> Result<()> {
        self.require_admin("resource_requirement_set", admin)?;
        self.requirements
            .insert(resource.to_string(), requirement.to_string());
        debug!(resource, "requirement set");
        Ok(())
    }

    /// Append characters to a resource's requirement, creating it if absent.
    pub fn resource_requirement_add(
        &mut self,
        admin: Credentials<'_>,
        resource: &str,
        requirement: &str,
    ) -> Result<()> {
        self.require_admin("resource_requirement_add", admin)?;
        self.requirements
            .entry(resource.to_string())
            .or_default()
            .push_str(requirement);
        Ok(())
    }

    /// Remove every character of `pattern` from a resource's requirement.
    pub fn resource_requirement_remove(
        &mut self,
        admin: Credentials<'_>,
        resource: &str,
        pattern: &str,
    ) -> Result<()> {
        self.require_admin("resource_requirement_remove", admin)?;
        let result = match self.requirements.get_mut(resource) {
            None => Err(not_found_resource(resource)),
            Some(existing) => {
                charset::remove_chars(existing, pattern).map(|stripped| *existing = stripped)
            }
        };
        result.map_err(|e| self.diagnose("resource_requirement_remove", e))
    }

    /// Drop a resource's requirement, opening it to everyone.
    pub fn resource_requirement_clear(&mut self, admin: Credentials<'_>, resource: &str) -> Result<()> {
        self.require_admin("resource_requirement_clear", admin)?;
        if self.requirements.remove(resource).is_none() {
            return Err(self.diagnose(
                "resource_requirement_clear",
                not_found_resource(resource),
            ));
        }
        debug!(resource, "requirement cleared");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Decisions
    // ─────────────────────────────────────────────────────────────────────────

    /// Decide access to `resource`.
    ///
    /// Open by default: a resource without a (non-empty) requirement allows
    /// everyone. Otherwise the administrator is always allowed, and a user is
    /// allowed when their capability shares a character with the requirement.
    pub fn authorize(&self, resource: &str, user: Credentials<'_>, args: &[Value]) -> Decision {
        let requirement = match self.requirements.get(resource) {
            Some(requirement) if !requirement.is_empty() => requirement,
            _ => return Decision::Allow,
        };

        if self.admin_check(user) {
            debug!(resource, "allowed by admin bypass");
            return Decision::Allow;
        }

        if !self.user_check(user) {
            self.warn_denied(resource, "unknown user or bad password");
            return Decision::Deny;
        }

        let capability = user
            .name
            .and_then(|name| self.users.get(name))
            .and_then(|record| record.capability.as_ref());
        let held = match capability.map(|c| c.evaluate(args)) {
            None => String::new(),
            Some(Ok(held)) => held,
            Some(Err(e)) => {
                let kind = e.kind();
                self.diagnose("authorize", e);
                return Decision::Error(kind);
            }
        };

        if charset::intersects(&held, requirement) {
            debug!(resource, user = ?user.name, "allowed by capability");
            Decision::Allow
        } else {
            self.warn_denied(resource, "insufficient capability");
            Decision::Deny
        }
    }

    /// Invoke a user's callback capability and interpret its truthiness.
    pub fn run_capability_callback(&self, user: Credentials<'_>, args: &[Value]) -> Decision {
        if !self.user_check(user) {
            self.warn_denied("<callback>", "unknown user or bad password");
            return Decision::Deny;
        }
        let capability = user
            .name
            .and_then(|name| self.users.get(name))
            .and_then(|record| record.capability.as_ref());
        match capability {
            Some(Capability::Computed(f)) => Decision::from_bool(is_truthy(&f(args))),
            _ => {
                if self.config.diagnostics {
                    warn!(user = ?user.name, "capability is not callable");
                }
                Decision::Error(ErrorKind::NotCallable)
            }
        }
    }

    /// Discard all users, requirements and the administrator.
    ///
    /// Consumes the authority. A locked administrator can only be replaced
    /// through [`admin_set`](Self::admin_set) under the regenerate guard, never
    /// by tearing the instance down and reusing it:
    ///
    /// ```rust,compile_fail
    /// use warden_core::{CredentialHasher, Credentials};
    /// use warden_perms::{CapabilityAuthority, CapabilityConfig};
    ///
    /// let mut auth = CapabilityAuthority::new(CredentialHasher::default(), CapabilityConfig::default());
    /// auth.admin_set("root", "rootpw").unwrap();
    /// auth.teardown();
    /// auth.admin_set("evil", "x").unwrap();
    /// ```
    pub fn teardown(self) {
        debug!(
            users = self.users.len(),
            resources = self.requirements.len(),
            configured = self.is_configured(),
            "capability authority torn down"
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn require_admin(&self, operation: &'static str, admin: Credentials<'_>) -> Result<()> {
        if self.admin_check(admin) {
            Ok(())
        } else {
            Err(self.diagnose(
                operation,
                AuthError::AuthenticationFailure("administrator credentials rejected".into()),
            ))
        }
    }

    fn user_mut(&mut self, operation: &'static str, user: &str) -> Result<&mut UserRecord> {
        if !self.users.contains_key(user) {
            return Err(self.diagnose(operation, not_found_user(user)));
        }
        self.users
            .get_mut(user)
            .ok_or_else(|| not_found_user(user))
    }

    fn diagnose(&self, operation: &'static str, err: AuthError) -> AuthError {
        if self.config.diagnostics {
            warn!(operation, kind = %err.kind(), "{}", err.detail());
        }
        err
    }

    fn warn_denied(&self, resource: &str, reason: &str) {
        if self.config.diagnostics {
            warn!(resource, reason, "access denied");
        }
    }
}

impl Authorizer for CapabilityAuthority {
    fn authorize(&self, target: &str, credentials: Credentials<'_>, args: &[Value]) -> Decision {
        CapabilityAuthority::authorize(self, target, credentials, args)
    }
}

fn not_found_user(user: &str) -> AuthError {
    AuthError::NotFound(format!("user {user}"))
}

fn not_found_resource(resource: &str) -> AuthError {
    AuthError::NotFound(format!("resource {resource}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use warden_core::HasherConfig;

    const ROOT: Credentials<'static> = Credentials::new("root", "rootpw");

    fn authority() -> CapabilityAuthority {
        let hasher = CredentialHasher::new(HasherConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        CapabilityAuthority::new(hasher, CapabilityConfig::default())
    }

    fn locked() -> CapabilityAuthority {
        let mut auth = authority();
        auth.admin_set("root", "rootpw").unwrap();
        auth
    }

    #[test]
    fn test_bootstrap_open_admin() {
        let auth = authority();
        assert!(!auth.is_configured());
        assert!(auth.admin_check(Credentials::anonymous()));
        assert!(auth.admin_check(Credentials::new("x", "y")));
    }

    #[test]
    fn test_admin_set_locks_without_regenerate() {
        let mut auth = locked();
        assert!(auth.admin_check(ROOT));
        assert!(!auth.admin_check(Credentials::anonymous()));

        let err = auth.admin_set("evil", "pw").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(auth.admin_name(), Some("root"));
        assert_eq!(auth.admin_reset().unwrap_err().kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_regenerate_requires_admin() {
        let mut auth = locked();
        let err = auth
            .admin_regenerate_set(true, Credentials::new("root", "wrong"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuthenticationFailure);
        assert!(!auth.regenerate_allowed());

        auth.admin_regenerate_set(true, ROOT).unwrap();
        auth.admin_set("root2", "pw2").unwrap();
        assert!(auth.admin_check(Credentials::new("root2", "pw2")));

        auth.admin_reset().unwrap();
        assert!(!auth.is_configured());
    }

    #[test]
    fn test_user_management_gated() {
        let mut auth = locked();
        let anon = Credentials::anonymous();

        assert_eq!(
            auth.user_add(anon, "alice", Some("pw")).unwrap_err().kind(),
            ErrorKind::AuthenticationFailure
        );
        auth.user_add(ROOT, "alice", Some("pw")).unwrap();
        auth.user_add(ROOT, "bob", None).unwrap();
        assert_eq!(
            auth.user_add(ROOT, "alice", None).unwrap_err().kind(),
            ErrorKind::Conflict
        );

        assert!(auth.user_has(ROOT, "alice").unwrap());
        assert_eq!(auth.user_list(ROOT).unwrap(), vec!["alice", "bob"]);
        assert!(auth.user_list(anon).is_err());

        auth.user_remove(ROOT, "bob").unwrap();
        assert_eq!(
            auth.user_remove(ROOT, "bob").unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(auth.user_list(ROOT).unwrap(), vec!["alice"]);
    }

    #[test]
    fn test_passwordless_user() {
        let mut auth = locked();
        auth.user_add(ROOT, "guest", None).unwrap();

        assert!(auth.user_check(Credentials::from_parts(Some("guest"), None)));
        assert!(auth.user_check(Credentials::new("guest", "")));
        assert!(!auth.user_check(Credentials::new("guest", "something")));
    }

    #[test]
    fn test_capability_add_remove_clear() {
        let mut auth = locked();
        auth.user_add(ROOT, "alice", Some("pw")).unwrap();

        auth.user_capability_add(ROOT, "alice", "r").unwrap();
        auth.user_capability_add(ROOT, "alice", "wr").unwrap();
        assert_eq!(
            auth.user_capability(ROOT, "alice").unwrap().and_then(Capability::as_literal),
            Some("rwr")
        );

        auth.user_capability_remove(ROOT, "alice", "r").unwrap();
        assert_eq!(
            auth.user_capability(ROOT, "alice").unwrap().and_then(Capability::as_literal),
            Some("w")
        );
        assert_eq!(
            auth.user_capability_remove(ROOT, "alice", "").unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );

        auth.user_capability_clear(ROOT, "alice").unwrap();
        assert!(auth.user_capability(ROOT, "alice").unwrap().is_none());
        assert_eq!(
            auth.user_capability_clear(ROOT, "alice").unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            auth.user_capability_set(ROOT, "nobody", "r").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_set_replaces_other_form() {
        let mut auth = locked();
        auth.user_add(ROOT, "alice", Some("pw")).unwrap();
        auth.user_capability_set(ROOT, "alice", Capability::computed(|_| json!("r")))
            .unwrap();
        assert_eq!(
            auth.user_capability_add(ROOT, "alice", "w").unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );

        auth.user_capability_set(ROOT, "alice", "w").unwrap();
        let cap = auth.user_capability(ROOT, "alice").unwrap().unwrap();
        assert!(!cap.is_callable());
    }

    #[test]
    fn test_intersection_law() {
        let mut auth = locked();
        auth.user_add(ROOT, "reader", Some("pw")).unwrap();
        auth.user_add(ROOT, "exec", Some("pw")).unwrap();
        auth.user_capability_set(ROOT, "reader", "r").unwrap();
        auth.user_capability_set(ROOT, "exec", "x").unwrap();
        auth.resource_requirement_set(ROOT, "doc", "rw").unwrap();
        auth.resource_requirement_set(ROOT, "open", "").unwrap();

        let reader = Credentials::new("reader", "pw");
        let exec = Credentials::new("exec", "pw");
        assert_eq!(auth.authorize("doc", reader, &[]), Decision::Allow);
        assert_eq!(auth.authorize("doc", exec, &[]), Decision::Deny);
        assert_eq!(auth.authorize("open", exec, &[]), Decision::Allow);
        assert_eq!(auth.authorize("unconfigured", Credentials::anonymous(), &[]), Decision::Allow);
        assert_eq!(
            auth.authorize("doc", Credentials::new("reader", "bad"), &[]),
            Decision::Deny
        );
    }

    #[test]
    fn test_admin_bypass() {
        let mut auth = locked();
        auth.resource_requirement_set(ROOT, "vault", "z").unwrap();
        assert_eq!(auth.authorize("vault", ROOT, &[]), Decision::Allow);
        assert_eq!(auth.authorize("vault", Credentials::anonymous(), &[]), Decision::Deny);
    }

    #[test]
    fn test_open_admin_allows_everything() {
        let mut auth = authority();
        auth.resource_requirement_set(Credentials::anonymous(), "vault", "z")
            .unwrap();
        assert_eq!(
            auth.authorize("vault", Credentials::anonymous(), &[]),
            Decision::Allow
        );
    }

    #[test]
    fn test_computed_capability_uses_args() {
        let mut auth = locked();
        auth.user_add(ROOT, "alice", Some("pw")).unwrap();
        auth.user_capability_set(
            ROOT,
            "alice",
            Capability::computed(|args| match args.first() {
                Some(Value::String(owner)) if owner == "alice" => json!("w"),
                _ => json!(null),
            }),
        )
        .unwrap();
        auth.resource_requirement_set(ROOT, "profile", "w").unwrap();

        let alice = Credentials::new("alice", "pw");
        assert_eq!(auth.authorize("profile", alice, &[json!("alice")]), Decision::Allow);
        assert_eq!(auth.authorize("profile", alice, &[json!("bob")]), Decision::Deny);
    }

    #[test]
    fn test_computed_capability_bad_type_is_error() {
        let mut auth = locked();
        auth.user_add(ROOT, "alice", Some("pw")).unwrap();
        auth.user_capability_set(ROOT, "alice", Capability::computed(|_| json!(["w"])))
            .unwrap();
        auth.resource_requirement_set(ROOT, "profile", "w").unwrap();

        assert_eq!(
            auth.authorize("profile", Credentials::new("alice", "pw"), &[]),
            Decision::Error(ErrorKind::InvalidArgument)
        );
    }

    #[test]
    fn test_run_capability_callback() {
        let mut auth = locked();
        auth.user_add(ROOT, "alice", Some("pw")).unwrap();
        auth.user_add(ROOT, "bob", Some("pw")).unwrap();
        auth.user_capability_set(
            ROOT,
            "alice",
            Capability::computed(|args| json!(args.len())),
        )
        .unwrap();
        auth.user_capability_set(ROOT, "bob", "rw").unwrap();

        let alice = Credentials::new("alice", "pw");
        assert_eq!(auth.run_capability_callback(alice, &[json!(1)]), Decision::Allow);
        assert_eq!(auth.run_capability_callback(alice, &[]), Decision::Deny);
        assert_eq!(
            auth.run_capability_callback(Credentials::new("bob", "pw"), &[]),
            Decision::Error(ErrorKind::NotCallable)
        );
        assert_eq!(
            auth.run_capability_callback(Credentials::new("alice", "bad"), &[]),
            Decision::Deny
        );
    }

    #[test]
    fn test_requirement_add_remove_clear() {
        let mut auth = locked();
        auth.resource_requirement_add(ROOT, "doc", "r").unwrap();
        auth.resource_requirement_add(ROOT, "doc", "w").unwrap();
        assert_eq!(auth.resource_requirement("doc"), Some("rw"));

        auth.resource_requirement_remove(ROOT, "doc", "r").unwrap();
        assert_eq!(auth.resource_requirement("doc"), Some("w"));

        assert_eq!(
            auth.resource_requirement_remove(ROOT, "missing", "r").unwrap_err().kind(),
            ErrorKind::NotFound
        );
        auth.resource_requirement_clear(ROOT, "doc").unwrap();
        assert_eq!(
            auth.resource_requirement_clear(ROOT, "doc").unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert!(auth.resources().is_empty());
    }

    #[test]
    fn test_diagnostics_do_not_change_decisions() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();

        let mut auth = locked();
        auth.resource_requirement_set(ROOT, "doc", "r").unwrap();
        let loud = auth.authorize("doc", Credentials::anonymous(), &[]);
        auth.set_diagnostics(false);
        let quiet = auth.authorize("doc", Credentials::anonymous(), &[]);
        assert_eq!(loud, quiet);
    }

    #[test]
    fn test_locked_admin_survives_until_teardown() {
        let mut auth = locked();
        auth.user_add(ROOT, "alice", None).unwrap();
        auth.resource_requirement_set(ROOT, "doc", "r").unwrap();

        assert_eq!(auth.admin_reset().unwrap_err().kind(), ErrorKind::Conflict);
        assert_eq!(auth.admin_set("evil", "x").unwrap_err().kind(), ErrorKind::Conflict);
        assert!(auth.is_configured());
        assert!(!auth.admin_check(Credentials::anonymous()));
        assert_eq!(auth.authorize("doc", Credentials::anonymous(), &[]), Decision::Deny);

        auth.teardown();

        // A fresh instance starts bootstrap-open; the old one is gone.
        let fresh = authority();
        assert!(!fresh.is_configured());
        assert!(fresh.resources().is_empty());
    }

    #[test]
    fn test_regenerate_reachable_while_open() {
        let mut auth = authority();
        auth.admin_regenerate_set(true, Credentials::anonymous()).unwrap();
        assert!(auth.regenerate_allowed());

        auth.admin_set("root", "rootpw").unwrap();
        auth.admin_set("root2", "pw2").unwrap();
        assert_eq!(auth.admin_name(), Some("root2"));
    }

    #[test]
    fn test_capability_remove_edge_cases() {
        let mut auth = locked();
        auth.user_add(ROOT, "alice", Some("pw")).unwrap();
        assert_eq!(
            auth.user_capability_remove(ROOT, "alice", "r").unwrap_err().kind(),
            ErrorKind::NotFound
        );

        auth.user_capability_set(ROOT, "alice", Capability::computed(|_| json!("r")))
            .unwrap();
        assert_eq!(
            auth.user_capability_remove(ROOT, "alice", "r").unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert!(auth.user_capability(ROOT, "alice").unwrap().unwrap().is_callable());
    }

    #[test]
    fn test_requirement_remove_empty_pattern() {
        let mut auth = locked();
        auth.resource_requirement_set(ROOT, "doc", "rw").unwrap();
        assert_eq!(
            auth.resource_requirement_remove(ROOT, "doc", "").unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(auth.resource_requirement("doc"), Some("rw"));
    }
}
