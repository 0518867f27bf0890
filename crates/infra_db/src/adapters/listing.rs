//! PostgreSQL Listing Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, ListingId, PortError, UserId};
use domain_listing::{
    CitySummary, Listing, ListingPort, ListingQuery, ListingStatus, NewListing, StateSummary,
    StyleSummary,
};

use crate::error::DatabaseError;
use crate::repositories::listings::{ListingFilter, ListingRepository, ListingRow};

/// PostgreSQL-backed implementation of the ListingPort trait
#[derive(Debug, Clone)]
pub struct PostgresListingAdapter {
    repository: ListingRepository,
    pool: PgPool,
}

impl PostgresListingAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ListingRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresListingAdapter {}

#[async_trait]
impl HealthCheckable for PostgresListingAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-listing-adapter").await
    }
}

#[async_trait]
impl ListingPort for PostgresListingAdapter {
    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, PortError> {
        let row = self.repository.get_by_id(id.into()).await?;
        row.map(row_to_listing).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Listing>, PortError> {
        let row = self.repository.get_by_slug(slug).await?;
        row.map(row_to_listing).transpose()
    }

    #[instrument(skip(self), fields(listing_id = %id, owner_id = %owner_id))]
    async fn update_owner(&self, id: ListingId, owner_id: UserId) -> Result<Listing, PortError> {
        let row = self.repository.set_owner(id.into(), owner_id.into()).await?;
        row_to_listing(row)
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &ListingQuery) -> Result<Vec<Listing>, PortError> {
        let query = query.normalized();
        let filter = ListingFilter {
            state_slug: query.state.as_deref(),
            city_slug: query.city.as_deref(),
            style: query.style.as_deref(),
            text: query.text.as_deref(),
            limit: i64::from(query.limit()),
            offset: i64::from(query.offset()),
        };

        self.repository
            .search(&filter)
            .await?
            .into_iter()
            .map(row_to_listing)
            .collect()
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Listing>, PortError> {
        self.repository
            .find_by_owner(owner_id.into())
            .await?
            .into_iter()
            .map(row_to_listing)
            .collect()
    }

    async fn list_states(&self) -> Result<Vec<StateSummary>, PortError> {
        Ok(self
            .repository
            .count_by_state()
            .await?
            .into_iter()
            .map(|r| StateSummary {
                state: r.state,
                state_slug: r.state_slug,
                listing_count: r.listing_count,
            })
            .collect())
    }

    async fn list_cities(&self, state_slug: &str) -> Result<Vec<CitySummary>, PortError> {
        Ok(self
            .repository
            .count_by_city(state_slug)
            .await?
            .into_iter()
            .map(|r| CitySummary {
                city: r.city,
                city_slug: r.city_slug,
                state_slug: r.state_slug,
                listing_count: r.listing_count,
            })
            .collect())
    }

    async fn list_styles(&self) -> Result<Vec<StyleSummary>, PortError> {
        Ok(self
            .repository
            .count_by_style()
            .await?
            .into_iter()
            .map(|r| StyleSummary {
                style: r.style,
                listing_count: r.listing_count,
            })
            .collect())
    }

    #[instrument(skip(self, listing), fields(name = %listing.name))]
    async fn create_listing(&self, listing: NewListing) -> Result<Listing, PortError> {
        let listing = Listing::from_new(listing);
        let row = self.repository.insert(&listing_to_row(&listing)).await?;
        row_to_listing(row)
    }
}

fn row_to_listing(row: ListingRow) -> Result<Listing, PortError> {
    let status = row.status.parse::<ListingStatus>().map_err(DatabaseError::Decode)?;
    Ok(Listing {
        id: ListingId::from(row.id),
        slug: row.slug,
        name: row.name,
        owner_id: row.owner_id.map(UserId::from),
        status,
        city: row.city,
        city_slug: row.city_slug,
        state: row.state,
        state_slug: row.state_slug,
        address: row.address,
        phone: row.phone,
        website: row.website,
        description: row.description,
        styles: row.styles,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn listing_to_row(listing: &Listing) -> ListingRow {
    ListingRow {
        id: listing.id.into(),
        slug: listing.slug.clone(),
        name: listing.name.clone(),
        owner_id: listing.owner_id.map(Into::into),
        status: listing.status.as_str().to_string(),
        city: listing.city.clone(),
        city_slug: listing.city_slug.clone(),
        state: listing.state.clone(),
        state_slug: listing.state_slug.clone(),
        address: listing.address.clone(),
        phone: listing.phone.clone(),
        website: listing.website.clone(),
        description: listing.description.clone(),
        styles: listing.styles.clone(),
        created_at: listing.created_at,
        updated_at: listing.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion_preserves_fields() {
        let listing = Listing::from_new(
            NewListing::new("Iron Anchor", "Austin", "Texas").with_styles(["Traditional"]),
        );
        let back = row_to_listing(listing_to_row(&listing)).unwrap();

        assert_eq!(back.id, listing.id);
        assert_eq!(back.slug, "iron-anchor-austin");
        assert_eq!(back.status, ListingStatus::Active);
        assert_eq!(back.styles, vec!["traditional".to_string()]);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let mut row = listing_to_row(&Listing::from_new(NewListing::new("A", "B", "C")));
        row.status = "archived".to_string();
        assert!(row_to_listing(row).is_err());
    }
}
