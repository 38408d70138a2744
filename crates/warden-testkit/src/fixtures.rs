//! Test fixtures and helpers.
//!
//! Common setup code for unit and integration tests.

use warden::{RoutingMode, Warden, WardenConfig};
use warden_core::{Capability, CredentialHasher, Credentials, HasherConfig};
use warden_perms::{CapabilityAuthority, CapabilityConfig, ScopeAuthority, ScopeConfig};

/// Administrator name used by fixtures.
pub const ADMIN_NAME: &str = "root";

/// Administrator password used by fixtures.
pub const ADMIN_PASS: &str = "root-pass";

/// The cheapest Argon2 parameters the backend accepts.
pub fn fast_hasher_config() -> HasherConfig {
    HasherConfig {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    }
}

/// A hasher built from [`fast_hasher_config`].
pub fn fast_hasher() -> CredentialHasher {
    CredentialHasher::new(fast_hasher_config()).expect("minimal argon2 params are valid")
}

/// A facade with a cheap hasher and the given routing.
pub fn fast_warden(routing: RoutingMode) -> Warden {
    let config = WardenConfig {
        hasher: fast_hasher_config(),
        routing,
        ..WardenConfig::default()
    };
    Warden::new(config).expect("fixture config is valid")
}

/// Install a test subscriber once. Later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

/// A capability authority with a cheap hasher.
pub struct CapabilityFixture {
    pub authority: CapabilityAuthority,
}

impl CapabilityFixture {
    /// No administrator configured (bootstrap-open).
    pub fn new() -> Self {
        Self {
            authority: CapabilityAuthority::new(fast_hasher(), CapabilityConfig::default()),
        }
    }

    /// With [`ADMIN_NAME`] installed as administrator.
    pub fn with_admin() -> Self {
        let mut fixture = Self::new();
        fixture
            .authority
            .admin_set(ADMIN_NAME, ADMIN_PASS)
            .expect("fresh authority accepts an admin");
        fixture
    }

    /// The fixture administrator's credentials.
    pub fn admin() -> Credentials<'static> {
        Credentials::new(ADMIN_NAME, ADMIN_PASS)
    }

    /// Register a user with a literal or computed capability.
    pub fn with_user(mut self, name: &str, pass: &str, capability: impl Into<Capability>) -> Self {
        let admin = Self::admin();
        self.authority
            .user_add(admin, name, Some(pass))
            .expect("fixture admin may add users");
        self.authority
            .user_capability_set(admin, name, capability)
            .expect("fixture user exists");
        self
    }

    /// Put a requirement on a resource.
    pub fn with_requirement(mut self, resource: &str, requirement: &str) -> Self {
        self.authority
            .resource_requirement_set(Self::admin(), resource, requirement)
            .expect("fixture admin may set requirements");
        self
    }
}

impl Default for CapabilityFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A scope authority with a cheap hasher.
pub struct ScopeFixture {
    pub authority: ScopeAuthority,
}

impl ScopeFixture {
    /// No scopes.
    pub fn new() -> Self {
        Self {
            authority: ScopeAuthority::new(fast_hasher(), ScopeConfig::default()),
        }
    }

    /// Create an open scope (no admins, empty whitelist).
    pub fn with_scope(mut self, scope: &str, secret: &str) -> Self {
        self.authority
            .create_scope(scope, secret, Credentials::anonymous())
            .expect("fresh scope name");
        self
    }
}

impl Default for ScopeFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::Decision;

    #[test]
    fn test_capability_fixture() {
        let fixture = CapabilityFixture::with_admin()
            .with_user("alice", "pw", "r")
            .with_requirement("doc", "rw");

        assert!(fixture.authority.is_configured());
        assert_eq!(
            fixture
                .authority
                .authorize("doc", Credentials::new("alice", "pw"), &[]),
            Decision::Allow
        );
    }

    #[test]
    fn test_scope_fixture() {
        let fixture = ScopeFixture::new().with_scope("db", "s3cr3t");
        assert!(fixture.authority.check_access("db", "s3cr3t", None));
    }

    #[test]
    fn test_fast_warden() {
        let warden = fast_warden(RoutingMode::Scopes);
        assert_eq!(warden.routing(), RoutingMode::Scopes);
        assert_eq!(warden.config().hasher, fast_hasher_config());
    }
}
