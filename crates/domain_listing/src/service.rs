//! Directory read service

use std::sync::Arc;

use tracing::{debug, instrument};

use domain_identity::Caller;

use crate::error::ListingError;
use crate::listing::Listing;
use crate::ports::ListingPort;
use crate::query::{CitySummary, ListingQuery, StateSummary, StyleSummary};
use crate::slug::slugify;

/// Public browsing plus the owner's dashboard listings
#[derive(Clone)]
pub struct DirectoryService {
    listings: Arc<dyn ListingPort>,
}

impl DirectoryService {
    pub fn new(listings: Arc<dyn ListingPort>) -> Self {
        Self { listings }
    }

    /// Browse or search active listings
    ///
    /// A city filter is only meaningful within a state.
    #[instrument(skip(self))]
    pub async fn browse(&self, query: &ListingQuery) -> Result<Vec<Listing>, ListingError> {
        let query = query.normalized();
        if query.city.is_some() && query.state.is_none() {
            return Err(ListingError::InvalidQuery(
                "city filter requires a state".to_string(),
            ));
        }

        let results = self.listings.search(&query).await?;
        debug!(count = results.len(), "listing search");
        Ok(results)
    }

    /// Listing page by slug
    ///
    /// Pending listings are visible only to their owner and to admins;
    /// everyone else gets NotFound.
    pub async fn get_listing(&self, slug: &str, caller: &Caller) -> Result<Listing, ListingError> {
        let listing = self
            .listings
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| ListingError::not_found(slug))?;

        if listing.is_active() {
            return Ok(listing);
        }

        match caller.principal() {
            Some(p) if p.is_admin() || listing.is_owned_by(p.user_id) => Ok(listing),
            _ => Err(ListingError::not_found(slug)),
        }
    }

    pub async fn states(&self) -> Result<Vec<StateSummary>, ListingError> {
        Ok(self.listings.list_states().await?)
    }

    pub async fn cities(&self, state: &str) -> Result<Vec<CitySummary>, ListingError> {
        Ok(self.listings.list_cities(&slugify(state)).await?)
    }

    pub async fn styles(&self) -> Result<Vec<StyleSummary>, ListingError> {
        Ok(self.listings.list_styles().await?)
    }

    /// Listings owned by the authenticated caller
    pub async fn owned_listings(&self, caller: &Caller) -> Result<Vec<Listing>, ListingError> {
        let principal = caller.require_authenticated()?;
        Ok(self.listings.list_by_owner(principal.user_id).await?)
    }
}
