//! Claims domain errors

use thiserror::Error;

use core_kernel::{ErrorKind, PortError};
use domain_identity::IdentityError;

use crate::claim::ClaimStatus;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Invalid claim: {0}")]
    Validation(String),

    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Listing not found: {0}")]
    ListingNotFound(String),

    #[error("A claim for this listing has already been submitted")]
    DuplicateClaim,

    #[error("Claim {claim_id} is already {status}")]
    NotPending { claim_id: String, status: ClaimStatus },

    #[error(transparent)]
    Access(#[from] IdentityError),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl ClaimError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClaimError::Validation(message.into())
    }

    /// Classifies the error into the shared taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClaimError::Validation(_) => ErrorKind::Validation,
            ClaimError::ClaimNotFound(_) | ClaimError::ListingNotFound(_) => ErrorKind::NotFound,
            ClaimError::DuplicateClaim | ClaimError::NotPending { .. } => ErrorKind::Conflict,
            ClaimError::Access(e) => e.kind(),
            ClaimError::Port(e) => e.kind(),
        }
    }

    /// Redirect hint for gate denials
    pub fn redirect(&self) -> Option<&str> {
        match self {
            ClaimError::Access(e) => e.redirect(),
            _ => None,
        }
    }
}
