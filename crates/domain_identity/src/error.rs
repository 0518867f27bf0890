//! Identity domain errors

use thiserror::Error;

use core_kernel::{ErrorKind, PortError};

/// Errors that can occur in the identity domain and at the authorization gate
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Invalid registration: {0}")]
    Validation(String),

    #[error("An account with email {0} already exists")]
    EmailTaken(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Unknown email and wrong password share one message
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    /// Authenticated caller lacks access. `redirect` points somewhere the
    /// caller is allowed to go instead.
    #[error("Forbidden: {message}")]
    Forbidden {
        message: String,
        redirect: Option<String>,
    },

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl IdentityError {
    /// Creates a Forbidden error without a redirect hint
    pub fn forbidden(message: impl Into<String>) -> Self {
        IdentityError::Forbidden {
            message: message.into(),
            redirect: None,
        }
    }

    /// Classifies the error into the shared taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::Validation(_) => ErrorKind::Validation,
            IdentityError::EmailTaken(_) => ErrorKind::Conflict,
            IdentityError::UserNotFound(_) => ErrorKind::NotFound,
            IdentityError::InvalidCredentials | IdentityError::Unauthenticated => {
                ErrorKind::Unauthorized
            }
            IdentityError::Forbidden { .. } => ErrorKind::Forbidden,
            IdentityError::Hashing(_) => ErrorKind::Internal,
            IdentityError::Port(e) => e.kind(),
        }
    }

    /// Redirect hint carried by a Forbidden error
    pub fn redirect(&self) -> Option<&str> {
        match self {
            IdentityError::Forbidden { redirect, .. } => redirect.as_deref(),
            _ => None,
        }
    }
}
