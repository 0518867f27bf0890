//! Request extractors that reject with the API error body
//!
//! Axum's stock extractors answer malformed input with a plain-text body.
//! These wrap them so every rejection goes through `ApiError`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);

/// Query string parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation {
            message: "Invalid request body".to_string(),
            details: Some(vec![rejection.body_text()]),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation {
            message: "Invalid path parameter".to_string(),
            details: Some(vec![rejection.body_text()]),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation {
            message: "Invalid query string".to_string(),
            details: Some(vec![rejection.body_text()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_json_rejection_is_validation() {
        let request = axum::http::Request::builder()
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();

        let rejection = match JsonBody::<serde_json::Value>::from_request(request, &()).await {
            Err(rejection) => rejection,
            Ok(_) => panic!("malformed body was accepted"),
        };
        assert_eq!(rejection.status(), StatusCode::UNPROCESSABLE_ENTITY);
        match rejection {
            ApiError::Validation { details: Some(details), .. } => assert_eq!(details.len(), 1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_content_type_is_validation() {
        let request = axum::http::Request::builder()
            .body(axum::body::Body::from("{}"))
            .unwrap();

        let result = JsonBody::<serde_json::Value>::from_request(request, &()).await;
        assert!(matches!(result, Err(ApiError::Validation { .. })));
    }
}
