//! PostgreSQL test harness
//!
//! Each [`TestDatabase`] is a throwaway container migrated with the
//! workspace migrations. Seeding goes through the real adapters, so seeded
//! rows obey the same constraints as production writes.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

use core_kernel::PortError;
use domain_claims::{Claim, ClaimPort};
use domain_identity::{IdentityPort, User};
use domain_listing::{Listing, ListingPort};
use infra_db::{PostgresClaimAdapter, PostgresIdentityAdapter, PostgresListingAdapter};

use crate::builders::{TestClaimBuilder, TestListingBuilder, TestUserBuilder};

const DATABASE: &str = "inkdex_test";
const USER: &str = "inkdex";
const PASSWORD: &str = "inkdex";

pub type HarnessError = Box<dyn std::error::Error + Send + Sync>;

/// A migrated PostgreSQL container with the directory's adapters wired up
pub struct TestDatabase {
    _container: ContainerAsync<Postgres>,
    pool: PgPool,
    identity: PostgresIdentityAdapter,
    listings: PostgresListingAdapter,
    claims: PostgresClaimAdapter,
}

impl TestDatabase {
    /// Starts a container and applies the migrations
    pub async fn start() -> Result<Self, HarnessError> {
        let container = Postgres::default()
            .with_db_name(DATABASE)
            .with_user(USER)
            .with_password(PASSWORD)
            .start()
            .await?;
        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&format!("postgres://{USER}:{PASSWORD}@{host}:{port}/{DATABASE}"))
            .await?;
        infra_db::run_migrations(&pool).await?;

        Ok(Self {
            _container: container,
            identity: PostgresIdentityAdapter::new(pool.clone()),
            listings: PostgresListingAdapter::new(pool.clone()),
            claims: PostgresClaimAdapter::new(pool.clone()),
            pool,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn identity(&self) -> &PostgresIdentityAdapter {
        &self.identity
    }

    pub fn listings(&self) -> &PostgresListingAdapter {
        &self.listings
    }

    pub fn claims(&self) -> &PostgresClaimAdapter {
        &self.claims
    }

    pub async fn seed_user(&self, user: TestUserBuilder) -> Result<User, PortError> {
        self.identity.create_user(user.build_new()).await
    }

    /// Inserts a listing; an `owned_by` owner is applied after creation
    pub async fn seed_listing(&self, listing: TestListingBuilder) -> Result<Listing, PortError> {
        let owner = listing.owner();
        let created = self.listings.create_listing(listing.build_new()).await?;
        match owner {
            Some(owner_id) => self.listings.update_owner(created.id, owner_id).await,
            None => Ok(created),
        }
    }

    /// Inserts a pending claim; reviews go through `record_review`
    pub async fn seed_claim(&self, claim: TestClaimBuilder) -> Result<Claim, PortError> {
        self.claims.insert_claim(claim.build_new()).await
    }

    /// Empties every table, keeping the schema
    pub async fn reset(&self) -> Result<(), sqlx::Error> {
        sqlx::query("TRUNCATE TABLE claims, listings, users CASCADE")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Row count of one of the directory tables
    pub async fn count(&self, table: Table) -> Result<i64, sqlx::Error> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        sqlx::query_scalar(&sql).fetch_one(&self.pool).await
    }
}

/// The directory's tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    Listings,
    Claims,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Listings => "listings",
            Table::Claims => "claims",
        }
    }
}
