//! The tri-state authorization outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, ErrorKind};

/// Result of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Access granted.
    Allow,
    /// Access refused. A normal outcome, not a failure.
    Deny,
    /// The check itself could not be carried out.
    Error(ErrorKind),
}

impl Decision {
    /// Build a decision from a boolean check.
    pub fn from_bool(allowed: bool) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }

    /// Whether access was granted.
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Whether access was refused outright.
    pub fn is_deny(&self) -> bool {
        matches!(self, Decision::Deny)
    }

    /// The error kind, if the check failed.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Decision::Error(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<std::result::Result<(), AuthError>> for Decision {
    fn from(result: std::result::Result<(), AuthError>) -> Self {
        match result {
            Ok(()) => Decision::Allow,
            Err(e) => Decision::Error(e.kind()),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allow => f.write_str("allow"),
            Decision::Deny => f.write_str("deny"),
            Decision::Error(kind) => write!(f, "error({kind})"),
        }
    }
}
