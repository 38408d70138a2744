//! # Warden Testkit
//!
//! Testing utilities for Warden.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: authorities and facades pre-wired with a deliberately
//!   cheap hasher, so credential-heavy tests stay fast
//! - **Generators**: Proptest strategies for names, secrets, and capability
//!   strings
//!
//! ## Test Fixtures
//!
//! ```rust
//! use warden_testkit::fixtures::CapabilityFixture;
//! use warden_core::Decision;
//!
//! let mut fixture = CapabilityFixture::with_admin();
//! let admin = CapabilityFixture::admin();
//! fixture.authority.resource_requirement_set(admin, "doc", "r").unwrap();
//! assert_eq!(fixture.authority.authorize("doc", admin, &[]), Decision::Allow);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use warden_testkit::generators::capability_string;
//!
//! proptest! {
//!     #[test]
//!     fn any_overlap_allows(cap in capability_string()) {
//!         // ...
//!     }
//! }
//! ```
//!
//! Production hashing costs are intentionally high. Never use
//! [`fast_hasher`](fixtures::fast_hasher) outside of tests.

pub mod fixtures;
pub mod generators;

pub use fixtures::{
    fast_hasher, fast_hasher_config, fast_warden, init_tracing, CapabilityFixture, ScopeFixture,
    ADMIN_NAME, ADMIN_PASS,
};
pub use generators::{capability_string, disjoint_capability_pair, name, secret};
