//! Owner dashboard handlers

use axum::{extract::State, Extension, Json};

use domain_claims::ClaimDetail;
use domain_identity::Caller;
use domain_listing::Listing;

use crate::dto::auth::UserResponse;
use crate::{error::ApiError, AppState};

/// The caller's profile
pub async fn me(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.identity.current_user(&caller).await?;
    Ok(Json(user.into()))
}

/// Listings the caller owns
pub async fn my_listings(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<Listing>>, ApiError> {
    Ok(Json(state.directory.owned_listings(&caller).await?))
}

/// The caller's claims, any status, with listing details
pub async fn my_claims(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<Vec<ClaimDetail>>, ApiError> {
    let claims = state.claims.list_by_user(&caller).await?;
    Ok(Json(state.claims.describe(claims).await?))
}
