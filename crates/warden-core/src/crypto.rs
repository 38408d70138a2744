//! Credential hashing for Warden.
//!
//! Wraps Argon2id with strong types. Every hash carries its own random salt
//! and parameters in PHC string form, so verification never needs the
//! configuration that produced it.

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, Result};

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// An opaque, salted credential hash (PHC string).
///
/// The cleartext secret is never retained.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Wrap an existing PHC string, e.g. one restored by an outer layer.
    ///
    /// No validation happens here; a malformed string simply never verifies.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// The PHC string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this hash is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CredentialHash(<redacted>)")
    }
}

/// Cost parameters for the credential hasher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Slow, salted, adaptive password hasher with a constant-time verifier.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
    config: HasherConfig,
}

impl CredentialHasher {
    /// Create a hasher from cost parameters.
    pub fn new(config: HasherConfig) -> Result<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            config,
        })
    }

    /// The parameters this hasher was built with.
    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    /// Hash a secret with a fresh salt.
    pub fn hash(&self, secret: &str) -> Result<CredentialHash> {
        let mut salt_bytes = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hashing(e.to_string()))?;

        let hash = self
            .argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        Ok(CredentialHash(hash.to_string()))
    }

    /// Verify a secret against a stored hash.
    ///
    /// Returns `false` for empty or malformed hashes.
    pub fn verify(&self, secret: &str, hash: &CredentialHash) -> bool {
        if hash.is_empty() {
            return false;
        }
        let parsed = match PasswordHash::new(hash.as_str()) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };
        self.argon2
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok()
    }

    /// Verify an optional secret against an optional hash.
    ///
    /// A missing secret or a missing hash never verifies.
    pub fn verify_opt(&self, secret: Option<&str>, hash: Option<&CredentialHash>) -> bool {
        match (secret, hash) {
            (Some(secret), Some(hash)) => self.verify(secret, hash),
            _ => false,
        }
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        // Argon2::default() is Argon2id v0x13 with the recommended costs.
        Self {
            argon2: Argon2::default(),
            config: HasherConfig::default(),
        }
    }
}

impl fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("config", &self.config)
            .finish()
    }
}
