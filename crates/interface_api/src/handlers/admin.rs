//! Admin review handlers

use axum::{
    extract::State,
    Extension, Json,
};
use validator::Validate;

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimDetail, ReviewDecision};
use domain_identity::Caller;

use crate::dto::claims::{AdminClaimsQuery, ReviewClaimRequest};
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::{error::ApiError, AppState};

/// The review queue: pending, processed, or all claims
pub async fn list_claims(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    QueryParams(query): QueryParams<AdminClaimsQuery>,
) -> Result<Json<Vec<ClaimDetail>>, ApiError> {
    Ok(Json(state.claims.admin_queue(&caller, query.view).await?))
}

/// Approves or denies a claim
pub async fn review_claim(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(id): PathParam<ClaimId>,
    JsonBody(request): JsonBody<ReviewClaimRequest>,
) -> Result<Json<Claim>, ApiError> {
    request.validate()?;
    let decision: ReviewDecision = request.status.parse()?;
    let claim = state
        .claims
        .review(&caller, id, decision, request.admin_notes)
        .await?;
    Ok(Json(claim))
}
