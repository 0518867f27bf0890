//! Claim handlers for shop owners

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::ClaimId;
use domain_claims::Claim;
use domain_identity::Caller;

use crate::dto::claims::SubmitClaimRequest;
use crate::extract::{JsonBody, PathParam};
use crate::{error::ApiError, AppState};

/// Submits a claim on a listing
pub async fn submit_claim(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    JsonBody(request): JsonBody<SubmitClaimRequest>,
) -> Result<(StatusCode, Json<Claim>), ApiError> {
    request.validate()?;
    let claim = state.claims.submit(&caller, request.into()).await?;
    Ok((StatusCode::CREATED, Json(claim)))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<ClaimId>,
) -> Result<Json<Claim>, ApiError> {
    Ok(Json(state.claims.get(&caller, id).await?))
}

/// Withdraws a pending claim
pub async fn withdraw_claim(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<ClaimId>,
) -> Result<StatusCode, ApiError> {
    state.claims.withdraw(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
