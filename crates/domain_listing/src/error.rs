//! Listing domain errors

use thiserror::Error;

use core_kernel::{ErrorKind, PortError};
use domain_identity::IdentityError;

/// Errors that can occur in the listing domain
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Listing not found: {0}")]
    ListingNotFound(String),

    #[error("Invalid listing query: {0}")]
    InvalidQuery(String),

    #[error(transparent)]
    Access(#[from] IdentityError),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl ListingError {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        ListingError::ListingNotFound(id.to_string())
    }

    /// Classifies the error into the shared taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            ListingError::ListingNotFound(_) => ErrorKind::NotFound,
            ListingError::InvalidQuery(_) => ErrorKind::Validation,
            ListingError::Access(e) => e.kind(),
            ListingError::Port(e) => e.kind(),
        }
    }

    /// Redirect hint for gate denials
    pub fn redirect(&self) -> Option<&str> {
        match self {
            ListingError::Access(e) => e.redirect(),
            _ => None,
        }
    }
}
