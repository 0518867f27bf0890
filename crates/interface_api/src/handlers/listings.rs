//! Public directory handlers

use axum::{
    extract::State,
    Extension, Json,
};

use domain_identity::Caller;
use domain_listing::{CitySummary, Listing, ListingQuery, StateSummary, StyleSummary};

use crate::dto::listings::ListingPage;
use crate::extract::{PathParam, QueryParams};
use crate::{error::ApiError, AppState};

/// Browse and search active listings
pub async fn browse(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListingQuery>,
) -> Result<Json<ListingPage>, ApiError> {
    let query = query.normalized();
    let listings = state.directory.browse(&query).await?;
    Ok(Json(ListingPage {
        listings,
        limit: query.limit(),
        offset: query.offset(),
    }))
}

/// A single listing by slug
pub async fn get_listing(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    PathParam(slug): PathParam<String>,
) -> Result<Json<Listing>, ApiError> {
    Ok(Json(state.directory.get_listing(&slug, &caller).await?))
}

pub async fn list_states(State(state): State<AppState>) -> Result<Json<Vec<StateSummary>>, ApiError> {
    Ok(Json(state.directory.states().await?))
}

pub async fn list_cities(
    State(state): State<AppState>,
    PathParam(state_slug): PathParam<String>,
) -> Result<Json<Vec<CitySummary>>, ApiError> {
    Ok(Json(state.directory.cities(&state_slug).await?))
}

pub async fn list_styles(State(state): State<AppState>) -> Result<Json<Vec<StyleSummary>>, ApiError> {
    Ok(Json(state.directory.styles().await?))
}
