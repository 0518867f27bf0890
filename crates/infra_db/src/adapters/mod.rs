//! Domain Adapters
//!
//! PostgreSQL implementations of the domain ports. Each adapter wraps a
//! repository, converts rows into domain models, and reports failures as
//! `PortError`.
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresListingAdapter;
//! use domain_listing::ListingPort;
//!
//! let listings: Arc<dyn ListingPort> = Arc::new(PostgresListingAdapter::new(pool));
//! let shop = listings.find_by_slug("iron-anchor-austin").await?;
//! ```

use std::time::Instant;

use chrono::Utc;
use sqlx::PgPool;

use core_kernel::{AdapterHealth, HealthCheckResult};

pub mod identity;
pub mod listing;
pub mod claims;

pub use identity::PostgresIdentityAdapter;
pub use listing::PostgresListingAdapter;
pub use claims::PostgresClaimAdapter;

/// Round-trips `SELECT 1` through the pool
pub(crate) async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await;

    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status: AdapterHealth::Healthy,
            latency_ms,
            message: None,
            checked_at: Utc::now(),
        },
        Err(e) => HealthCheckResult {
            adapter_id: adapter_id.to_string(),
            status: AdapterHealth::Unhealthy,
            latency_ms,
            message: Some(format!("Database error: {}", e)),
            checked_at: Utc::now(),
        },
    }
}
