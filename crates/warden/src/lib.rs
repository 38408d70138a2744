//! # Warden
//!
//! The unified API for Warden - in-process authorization for named data
//! items, for runtimes where callers cannot be fully trusted.
//!
//! ## Overview
//!
//! Warden is a local decision oracle. It provides:
//!
//! - **Capability authorization**: one optional administrator, users with
//!   capability strings or callbacks, and per-resource requirement strings
//! - **Scoped secret authorization**: independent scopes, each with a shared
//!   secret, optional administrators, and an optional whitelist
//! - **A single decision surface**: [`Authorizer::authorize`] returning
//!   Allow, Deny, or Error(kind)
//!
//! ## Key Concepts
//!
//! - **Open by default**: a resource without a requirement is open to all.
//! - **Bootstrap-open**: until an administrator is configured, every caller
//!   passes administrative checks.
//! - **Any-overlap matching**: a capability grants access when it shares any
//!   single character with the requirement.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use warden::{Credentials, Decision, Warden, WardenConfig};
//!
//! let mut warden = Warden::new(WardenConfig::default()).unwrap();
//!
//! // Close the bootstrap window first.
//! warden.capabilities_mut().admin_set("root", "rootpw").unwrap();
//! let root = Credentials::new("root", "rootpw");
//!
//! let caps = warden.capabilities_mut();
//! caps.user_add(root, "alice", Some("pw")).unwrap();
//! caps.user_capability_set(root, "alice", "r").unwrap();
//! caps.resource_requirement_set(root, "salary", "rw").unwrap();
//!
//! let decision = warden.authorize("salary", Credentials::new("alice", "pw"), &[]);
//! assert_eq!(decision, Decision::Allow);
//! ```
//!
//! ## Re-exports
//!
//! - `warden::core` - Hashing, decisions, capability values
//! - `warden::perms` - The two authorization models

pub mod config;
pub mod error;
pub mod warden;

// Re-export component crates
pub use warden_core as core;
pub use warden_perms as perms;

// Re-export main types for convenience
pub use crate::warden::{Target, Warden};
pub use config::{RoutingMode, WardenConfig};
pub use error::{Result, WardenError};

// Re-export commonly used core types
pub use warden_core::{
    AuthError, Authorizer, Capability, CredentialHasher, Credentials, Decision, ErrorKind,
    HasherConfig,
};
pub use warden_perms::{CapabilityAuthority, ScopeAuthority, ScopeState};
