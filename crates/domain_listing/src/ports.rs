//! Listing Domain Ports
//!
//! `ListingPort` is the listing store contract. `update_owner` is the only
//! write path for ownership and is called only as part of a claim approval,
//! from inside the claim store's atomic review.

use async_trait::async_trait;

use core_kernel::{DomainPort, ListingId, PortError, UserId};

use crate::listing::{Listing, NewListing};
use crate::query::{CitySummary, ListingQuery, StateSummary, StyleSummary};

/// Port for listing storage and directory reads
#[async_trait]
pub trait ListingPort: DomainPort {
    /// Retrieves a listing by id
    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, PortError>;

    /// Retrieves a listing by its URL slug
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Listing>, PortError>;

    /// Sets the owner of a listing, overwriting any previous owner
    async fn update_owner(&self, id: ListingId, owner_id: UserId) -> Result<Listing, PortError>;

    /// Active listings matching a normalized query, ordered by name
    async fn search(&self, query: &ListingQuery) -> Result<Vec<Listing>, PortError>;

    /// All listings owned by a user, any status
    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Listing>, PortError>;

    /// States with active listings, ordered by name
    async fn list_states(&self) -> Result<Vec<StateSummary>, PortError>;

    /// Cities of a state with active listings, ordered by name
    async fn list_cities(&self, state_slug: &str) -> Result<Vec<CitySummary>, PortError>;

    /// Styles used by active listings, ordered by style
    async fn list_styles(&self) -> Result<Vec<StyleSummary>, PortError>;

    /// Creates an unclaimed listing
    ///
    /// Fails with `PortError::Conflict` when the slug is taken.
    async fn create_listing(&self, listing: NewListing) -> Result<Listing, PortError>;
}

/// Mock implementation of ListingPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult, HealthCheckable};

    /// In-memory mock implementation of ListingPort
    #[derive(Debug, Default, Clone)]
    pub struct MockListingPort {
        listings: Arc<RwLock<HashMap<ListingId, Listing>>>,
    }

    impl MockListingPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with listings for testing
        pub async fn with_listings(listings: Vec<Listing>) -> Self {
            let port = Self::new();
            {
                let mut table = port.listings.write().await;
                for listing in listings {
                    table.insert(listing.id, listing);
                }
            }
            port
        }
    }

    impl DomainPort for MockListingPort {}

    #[async_trait]
    impl HealthCheckable for MockListingPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-listing-port".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ListingPort for MockListingPort {
        async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, PortError> {
            Ok(self.listings.read().await.get(&id).cloned())
        }

        async fn find_by_slug(&self, slug: &str) -> Result<Option<Listing>, PortError> {
            Ok(self
                .listings
                .read()
                .await
                .values()
                .find(|l| l.slug == slug)
                .cloned())
        }

        async fn update_owner(&self, id: ListingId, owner_id: UserId) -> Result<Listing, PortError> {
            let mut listings = self.listings.write().await;
            let listing = listings
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Listing", id))?;
            listing.owner_id = Some(owner_id);
            listing.updated_at = Utc::now();
            Ok(listing.clone())
        }

        async fn search(&self, query: &ListingQuery) -> Result<Vec<Listing>, PortError> {
            let query = query.normalized();
            let listings = self.listings.read().await;
            let mut results: Vec<_> = listings
                .values()
                .filter(|l| query.matches(l))
                .cloned()
                .collect();
            results.sort_by(|a, b| a.name.cmp(&b.name).then(a.slug.cmp(&b.slug)));

            Ok(results
                .into_iter()
                .skip(query.offset() as usize)
                .take(query.limit() as usize)
                .collect())
        }

        async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Listing>, PortError> {
            let listings = self.listings.read().await;
            let mut owned: Vec<_> = listings
                .values()
                .filter(|l| l.is_owned_by(owner_id))
                .cloned()
                .collect();
            owned.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(owned)
        }

        async fn list_states(&self) -> Result<Vec<StateSummary>, PortError> {
            let listings = self.listings.read().await;
            let mut states: BTreeMap<String, StateSummary> = BTreeMap::new();
            for listing in listings.values().filter(|l| l.is_active()) {
                states
                    .entry(listing.state.clone())
                    .or_insert_with(|| StateSummary {
                        state: listing.state.clone(),
                        state_slug: listing.state_slug.clone(),
                        listing_count: 0,
                    })
                    .listing_count += 1;
            }
            Ok(states.into_values().collect())
        }

        async fn list_cities(&self, state_slug: &str) -> Result<Vec<CitySummary>, PortError> {
            let listings = self.listings.read().await;
            let mut cities: BTreeMap<String, CitySummary> = BTreeMap::new();
            for listing in listings
                .values()
                .filter(|l| l.is_active() && l.state_slug == state_slug)
            {
                cities
                    .entry(listing.city.clone())
                    .or_insert_with(|| CitySummary {
                        city: listing.city.clone(),
                        city_slug: listing.city_slug.clone(),
                        state_slug: listing.state_slug.clone(),
                        listing_count: 0,
                    })
                    .listing_count += 1;
            }
            Ok(cities.into_values().collect())
        }

        async fn list_styles(&self) -> Result<Vec<StyleSummary>, PortError> {
            let listings = self.listings.read().await;
            let mut styles: BTreeMap<String, i64> = BTreeMap::new();
            for listing in listings.values().filter(|l| l.is_active()) {
                for style in &listing.styles {
                    *styles.entry(style.clone()).or_default() += 1;
                }
            }
            Ok(styles
                .into_iter()
                .map(|(style, listing_count)| StyleSummary { style, listing_count })
                .collect())
        }

        async fn create_listing(&self, listing: NewListing) -> Result<Listing, PortError> {
            let listing = Listing::from_new(listing);
            let mut listings = self.listings.write().await;
            if listings.values().any(|l| l.slug == listing.slug) {
                return Err(PortError::conflict(format!("slug {} already in use", listing.slug)));
            }
            listings.insert(listing.id, listing.clone());
            Ok(listing)
        }
    }
}
