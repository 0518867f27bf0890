//! Error taxonomy shared by every domain
//!
//! Domain errors stay specific (`ClaimError`, `IdentityError`, ...) but each
//! one classifies itself into an [`ErrorKind`]. The HTTP boundary maps kinds,
//! never concrete variants, to status codes.

use serde::Serialize;
use std::fmt;

/// Coarse classification of a failure, as seen by the boundary layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or missing input, correctable by the caller
    Validation,
    /// A referenced entity does not exist
    NotFound,
    /// State or uniqueness violation
    Conflict,
    /// Authenticated but not allowed
    Forbidden,
    /// Not authenticated
    Unauthorized,
    /// Storage failure that may succeed if the caller retries
    Transient,
    /// Anything unexpected; details must not reach the caller
    Internal,
}

impl ErrorKind {
    /// Returns true when the caller may retry the same request unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Transient)
    }

    /// Returns true when the error detail is safe to show to the caller
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, ErrorKind::Transient | ErrorKind::Internal)
    }

    /// Stable snake_case code used in error bodies
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Transient => "service_unavailable",
            ErrorKind::Internal => "internal_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
