//! Registration and login handlers

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;
use validator::Validate;

use domain_identity::User;

use crate::auth::create_token;
use crate::dto::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::extract::JsonBody;
use crate::{error::ApiError, AppState};

/// Registers an account and opens a session
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;
    let user = state.identity.register(request.into()).await?;
    info!(user_id = %user.id, role = %user.role, "user registered");
    Ok((StatusCode::CREATED, Json(session(&state, user)?)))
}

/// Checks credentials and opens a session
///
/// The token carries the role after any allow-list promotion.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;
    let user = state.identity.login(request.into()).await?;
    Ok(Json(session(&state, user)?))
}

fn session(state: &AppState, user: User) -> Result<AuthResponse, ApiError> {
    let expires_in = state.config.jwt_expiration_secs;
    let token = create_token(user.id, user.role, &state.config.jwt_secret, expires_in)?;
    Ok(AuthResponse {
        token,
        expires_in,
        user: user.into(),
    })
}
