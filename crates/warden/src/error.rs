//! Error types for the Warden facade.

use thiserror::Error;
use warden_core::{AuthError, ErrorKind};

/// Errors that can occur while building or driving a [`Warden`](crate::Warden).
#[derive(Debug, Error)]
pub enum WardenError {
    /// An authorization operation failed.
    #[error("authorization error: {0}")]
    Auth(#[from] AuthError),

    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl WardenError {
    /// The taxonomy kind of this error. Configuration errors are invalid arguments.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WardenError::Auth(e) => e.kind(),
            WardenError::Config(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// Result type for Warden operations.
pub type Result<T> = std::result::Result<T, WardenError>;
