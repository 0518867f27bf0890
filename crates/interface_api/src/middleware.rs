//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{info, warn};

use domain_identity::{AccessScope, Caller};

use crate::error::ApiError;
use crate::AppState;

/// Session middleware
///
/// Resolves the request's [`Caller`] and stores it in the request
/// extensions. A missing Authorization header means an anonymous caller;
/// a present but invalid token is rejected outright.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let caller = match auth_header {
        None => Caller::Anonymous,
        Some(header) => {
            let token = header.strip_prefix("Bearer ").ok_or_else(|| {
                warn!("Malformed Authorization header");
                ApiError::Unauthorized("Expected a Bearer token".to_string())
            })?;
            crate::auth::validate_token(token, &state.config.jwt_secret).map_err(|e| {
                warn!(error = %e, "Token validation failed");
                ApiError::from(e)
            })?
        }
    };

    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}

/// Enforces a route group's access scope before any handler runs
pub async fn require_scope(scope: AccessScope, request: Request<Body>, next: Next) -> Response {
    let caller = request.extensions().get::<Caller>().copied().unwrap_or_default();

    match scope.authorize(&caller) {
        Ok(_) => next.run(request).await,
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn require_dashboard(request: Request<Body>, next: Next) -> Response {
    require_scope(AccessScope::Dashboard, request, next).await
}

pub async fn require_admin(request: Request<Body>, next: Next) -> Response {
    require_scope(AccessScope::Admin, request, next).await
}

/// Audit logging middleware
///
/// Logs every API request with the resolved caller
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user_id = request
        .extensions()
        .get::<Caller>()
        .and_then(Caller::user_id)
        .map(|id| id.to_string())
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user_id,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
