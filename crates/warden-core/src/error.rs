//! Error types for Warden.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coarse classification of every failure the engine can report.
///
/// Denial is a normal outcome: these kinds travel inside
/// [`Decision::Error`](crate::Decision::Error) as well as inside [`AuthError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Identity or credential mismatch.
    AuthenticationFailure,
    /// Valid identity, insufficient capability or eligibility.
    AuthorizationDenied,
    /// Unknown resource, scope or user.
    NotFound,
    /// Non-string capability value, malformed pattern, bad parameters.
    InvalidArgument,
    /// Secret or admin already set, regenerate disabled, duplicate user.
    Conflict,
    /// A callback capability was expected.
    NotCallable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::AuthenticationFailure => "authentication failure",
            ErrorKind::AuthorizationDenied => "authorization denied",
            ErrorKind::NotFound => "not found",
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::Conflict => "conflict",
            ErrorKind::NotCallable => "not callable",
        };
        f.write_str(s)
    }
}

/// Errors returned by credential-gated operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Identity or credential mismatch.
    #[error("authentication failure: {0}")]
    AuthenticationFailure(String),

    /// Valid identity with insufficient capability or eligibility.
    #[error("authorization denied: {0}")]
    AuthorizationDenied(String),

    /// Unknown resource, scope, or user.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed pattern or a capability value that is not a string.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Secret or admin already set, regenerate disabled, or duplicate entry.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A callback capability was expected but the user holds none.
    #[error("not callable: {0}")]
    NotCallable(String),

    /// The password hash backend rejected its input or parameters.
    #[error("hashing error: {0}")]
    Hashing(String),
}

impl AuthError {
    /// The taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::AuthenticationFailure(_) => ErrorKind::AuthenticationFailure,
            AuthError::AuthorizationDenied(_) => ErrorKind::AuthorizationDenied,
            AuthError::NotFound(_) => ErrorKind::NotFound,
            AuthError::InvalidArgument(_) | AuthError::Hashing(_) => ErrorKind::InvalidArgument,
            AuthError::Conflict(_) => ErrorKind::Conflict,
            AuthError::NotCallable(_) => ErrorKind::NotCallable,
        }
    }

    /// The human-readable detail, without the kind prefix.
    pub fn detail(&self) -> &str {
        match self {
            AuthError::AuthenticationFailure(d)
            | AuthError::AuthorizationDenied(d)
            | AuthError::NotFound(d)
            | AuthError::InvalidArgument(d)
            | AuthError::Conflict(d)
            | AuthError::NotCallable(d)
            | AuthError::Hashing(d) => d,
        }
    }
}

/// Result type for Warden operations.
pub type Result<T> = std::result::Result<T, AuthError>;
