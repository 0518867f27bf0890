//! HTTP API Layer
//!
//! REST API for the tattoo shop directory using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers per route group
//! - **Middleware**: Session resolution, scope gates, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: `ErrorKind` to status code mapping
//! - **Extractors**: JSON/path/query extractors rejecting with `ApiError`
//!
//! Route groups and their scopes:
//!
//! | Prefix                | Scope     |
//! |-----------------------|-----------|
//! | `/health`             | public    |
//! | `/api/v1/auth`        | public    |
//! | `/api/v1/listings`, `/api/v1/states`, `/api/v1/styles` | public |
//! | `/api/v1/dashboard`, `/api/v1/claims` | dashboard |
//! | `/api/v1/admin`       | admin     |
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::postgres(pool, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
    middleware as axum_middleware,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use core_kernel::HealthCheckable;
use domain_claims::{ClaimPort, ClaimWorkflow};
use domain_identity::{IdentityPort, IdentityService};
use domain_listing::{DirectoryService, ListingPort};
use infra_db::{PostgresClaimAdapter, PostgresIdentityAdapter, PostgresListingAdapter};

use crate::config::ApiConfig;
use crate::middleware::{audit_middleware, require_admin, require_dashboard, session_middleware};
use crate::handlers::{admin, claims, dashboard, health, listings};

/// Storage adapters behind the services
#[derive(Clone)]
pub struct Ports {
    pub identity: Arc<dyn IdentityPort>,
    pub listings: Arc<dyn ListingPort>,
    pub claims: Arc<dyn ClaimPort>,
    /// Probed by the readiness endpoint
    pub probes: Vec<Arc<dyn HealthCheckable>>,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub identity: IdentityService,
    pub directory: DirectoryService,
    pub claims: ClaimWorkflow,
    pub probes: Arc<[Arc<dyn HealthCheckable>]>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the services over the given ports
    pub fn new(ports: Ports, config: ApiConfig) -> Self {
        Self {
            identity: IdentityService::new(ports.identity.clone(), config.admin_allow_list()),
            directory: DirectoryService::new(ports.listings.clone()),
            claims: ClaimWorkflow::new(ports.claims, ports.listings, ports.identity),
            probes: ports.probes.into(),
            config,
        }
    }

    /// Wires the services over PostgreSQL
    pub fn postgres(pool: PgPool, config: ApiConfig) -> Self {
        let identity = Arc::new(PostgresIdentityAdapter::new(pool.clone()));
        // All three adapters share one pool, so one probe covers them
        let probe: Arc<dyn HealthCheckable> = identity.clone();

        let ports = Ports {
            identity,
            listings: Arc::new(PostgresListingAdapter::new(pool.clone())),
            claims: Arc::new(PostgresClaimAdapter::new(pool)),
            probes: vec![probe],
        };
        Self::new(ports, config)
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let directory_routes = Router::new()
        .route("/listings", get(listings::browse))
        .route("/listings/:slug", get(listings::get_listing))
        .route("/states", get(listings::list_states))
        .route("/states/:state/cities", get(listings::list_cities))
        .route("/styles", get(listings::list_styles));

    // Dashboard routes
    let dashboard_routes = Router::new()
        .route("/dashboard/me", get(dashboard::me))
        .route("/dashboard/listings", get(dashboard::my_listings))
        .route("/dashboard/claims", get(dashboard::my_claims))
        .route("/claims", post(claims::submit_claim))
        .route("/claims/:id", get(claims::get_claim).delete(claims::withdraw_claim))
        .layer(axum_middleware::from_fn(require_dashboard));

    // Admin routes
    let admin_routes = Router::new()
        .route("/admin/claims", get(admin::list_claims))
        .route("/admin/claims/:id", put(admin::review_claim))
        .layer(axum_middleware::from_fn(require_admin));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .merge(directory_routes)
        .merge(dashboard_routes)
        .merge(admin_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), session_middleware));

    // Combine all routes
    Router::new()
        .merge(health_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
