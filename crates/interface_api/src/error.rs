//! API error handling
//!
//! Domain errors are mapped by their `ErrorKind`, never by variant, so a
//! new domain error cannot land on the wrong status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use core_kernel::ErrorKind;
use domain_claims::ClaimError;
use domain_identity::IdentityError;
use domain_listing::ListingError;

use crate::auth::AuthError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Option<Vec<String>>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {message}")]
    Forbidden {
        message: String,
        redirect: Option<String>,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ApiError {
    /// Builds the error for a classified domain failure
    pub fn from_kind(kind: ErrorKind, message: String, redirect: Option<&str>) -> Self {
        match kind {
            ErrorKind::Validation => ApiError::Validation { message, details: None },
            ErrorKind::NotFound => ApiError::NotFound(message),
            ErrorKind::Conflict => ApiError::Conflict(message),
            ErrorKind::Forbidden => ApiError::Forbidden {
                message,
                redirect: redirect.map(str::to_string),
            },
            ErrorKind::Unauthorized => ApiError::Unauthorized(message),
            ErrorKind::Transient => ApiError::Unavailable(message),
            ErrorKind::Internal => ApiError::Internal(message),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation { .. } => ErrorKind::Validation,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::Conflict(_) => ErrorKind::Conflict,
            ApiError::Forbidden { .. } => ErrorKind::Forbidden,
            ApiError::Unauthorized(_) => ErrorKind::Unauthorized,
            ApiError::Unavailable(_) => ErrorKind::Transient,
            ApiError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Transient => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        let (message, redirect, details) = match self {
            ApiError::Validation { message, details } => (message, None, details),
            ApiError::Forbidden { message, redirect } => (message, redirect, None),
            ApiError::Unavailable(detail) => {
                warn!(%detail, "storage unavailable");
                ("Service temporarily unavailable, please retry".to_string(), None, None)
            }
            ApiError::Internal(detail) => {
                error!(%detail, "internal error");
                ("An internal error occurred".to_string(), None, None)
            }
            ApiError::NotFound(message)
            | ApiError::Conflict(message)
            | ApiError::Unauthorized(message) => (message, None, None),
        };

        let body = ErrorResponse {
            error: kind.code().to_string(),
            message,
            redirect,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        ApiError::from_kind(err.kind(), err.to_string(), err.redirect())
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        ApiError::from_kind(err.kind(), err.to_string(), err.redirect())
    }
}

impl From<ListingError> for ApiError {
    fn from(err: ListingError) -> Self {
        ApiError::from_kind(err.kind(), err.to_string(), err.redirect())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Signing(detail) => ApiError::Internal(detail),
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        details.sort();

        ApiError::Validation {
            message: "Request validation failed".to_string(),
            details: Some(details),
        }
    }
}
