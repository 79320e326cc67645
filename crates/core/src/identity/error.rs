//! Identity store errors.

use thiserror::Error;
use uuid::Uuid;

use crate::auth::PasswordError;

/// Errors returned by an identity store.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The store refused the operation. Holds one message per reason.
    #[error("identity operation rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),

    /// No identity user with this ID.
    #[error("identity user not found: {0}")]
    NotFound(Uuid),

    /// The store itself failed.
    #[error("identity store failure: {0}")]
    Store(String),
}

impl IdentityError {
    /// Creates a rejection with a single message.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(vec![message.into()])
    }

    /// Creates a store failure.
    #[must_use]
    pub fn store(err: impl std::fmt::Display) -> Self {
        Self::Store(err.to_string())
    }

    /// Returns the messages to show to the caller.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Rejected(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl From<PasswordError> for IdentityError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Policy(messages) => Self::Rejected(messages),
            other => Self::Store(other.to_string()),
        }
    }
}
