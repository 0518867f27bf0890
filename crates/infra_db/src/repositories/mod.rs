//! Repository implementations for directory entities
//!
//! Repositories own the SQL and map between rows and plain column values.
//! Queries are built at runtime with `sqlx::query_as` over `FromRow` row
//! types, so the crate builds without a live database.

pub mod users;
pub mod listings;
pub mod claims;

pub use users::UserRepository;
pub use listings::ListingRepository;
pub use claims::ClaimRepository;
