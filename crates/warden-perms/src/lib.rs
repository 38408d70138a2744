//! # Warden Permissions
//!
//! The two authorization models of Warden.
//!
//! ## Overview
//!
//! - **Capability authorization** ([`CapabilityAuthority`]): one optional
//!   administrator, users with capability strings (or callbacks), and
//!   per-resource requirement strings. Access is granted when the user's
//!   capability and the resource's requirement share any character.
//! - **Scoped secret authorization** ([`ScopeAuthority`]): independent access
//!   classes, each with a shared secret, optional administrators, and an
//!   optional user whitelist.
//!
//! ## Bootstrap-open administration
//!
//! Both models treat "no administrator configured" as "every caller is an
//! administrator". This is how an instance is set up in the first place, and
//! it is a deliberate, security-sensitive default: configure an administrator
//! before exposing an instance to untrusted code.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use warden_core::{CredentialHasher, Credentials, Decision};
//! use warden_perms::{CapabilityAuthority, CapabilityConfig};
//!
//! let mut auth = CapabilityAuthority::new(CredentialHasher::default(), CapabilityConfig::default());
//! auth.admin_set("root", "rootpw").unwrap();
//!
//! let root = Credentials::new("root", "rootpw");
//! auth.user_add(root, "alice", Some("pw")).unwrap();
//! auth.user_capability_set(root, "alice", "r").unwrap();
//! auth.resource_requirement_set(root, "report", "rw").unwrap();
//!
//! let decision = auth.authorize("report", Credentials::new("alice", "pw"), &[]);
//! assert_eq!(decision, Decision::Allow);
//! ```

pub mod admin;
pub mod capability;
pub mod charset;
pub mod config;
pub mod scope;

pub use admin::{AdminIdentity, AdminSet, AdminSlot};
pub use capability::{CapabilityAuthority, UserRecord};
pub use config::{CapabilityConfig, ScopeConfig};
pub use scope::{AccessClass, ScopeAuthority, ScopeState};
