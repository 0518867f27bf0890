//! Infrastructure Database Layer
//!
//! PostgreSQL storage for the directory, using SQLx.
//!
//! # Architecture
//!
//! Repositories own the SQL and return row types; adapters implement the
//! domain ports on top of them and translate rows into domain models.
//!
//! ```text
//! IdentityPort ─► PostgresIdentityAdapter ─► UserRepository    ─► users
//! ListingPort  ─► PostgresListingAdapter  ─► ListingRepository ─► listings
//! ClaimPort    ─► PostgresClaimAdapter    ─► ClaimRepository   ─► claims (+ listings.owner_id)
//! ```
//!
//! Uniqueness (user email, listing slug, one claim per user and listing) is
//! enforced by unique indexes, so concurrent writers race safely and the
//! loser sees `PortError::Conflict`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, PostgresClaimAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/inkdex")).await?;
//! let claims = PostgresClaimAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, create_pool_from_url, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::{PostgresIdentityAdapter, PostgresListingAdapter, PostgresClaimAdapter};
