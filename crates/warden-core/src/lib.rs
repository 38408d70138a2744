//! # Warden Core
//!
//! Pure primitives for Warden: credential hashing, decisions, and capability
//! values.
//!
//! This crate contains no I/O and no authority state. It is shared by both
//! authorization models in `warden-perms`.
//!
//! ## Key Types
//!
//! - [`CredentialHasher`] - Argon2id hashing with a constant-time verifier
//! - [`CredentialHash`] - Opaque, salted PHC string
//! - [`Decision`] - Allow, Deny, or Error(kind)
//! - [`Capability`] - Literal capability string or a call-time callback
//! - [`Credentials`] - Borrowed name/secret pair
//! - [`Authorizer`] - The single decision interface

pub mod authorizer;
pub mod crypto;
pub mod decision;
pub mod error;
pub mod types;

pub use authorizer::Authorizer;
pub use crypto::{CredentialHash, CredentialHasher, HasherConfig};
pub use decision::Decision;
pub use error::{AuthError, ErrorKind, Result};
pub use types::{coerce_to_string, is_truthy, Capability, CapabilityFn, Credentials};
