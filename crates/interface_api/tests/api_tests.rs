//! HTTP tests for interface_api over in-memory ports

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use core_kernel::HealthCheckable;
use domain_claims::MockClaimPort;
use domain_identity::MockIdentityPort;
use domain_listing::{Listing, ListingPort, ListingStatus, MockListingPort, NewListing};
use interface_api::{config::ApiConfig, create_router, AppState, Ports};

const ADMIN_EMAIL: &str = "boss@inkdex.test";

struct TestApp {
    server: TestServer,
    identity: MockIdentityPort,
    listings: MockListingPort,
    claims: MockClaimPort,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_admins(ADMIN_EMAIL, MockIdentityPort::new()).await
    }

    async fn with_admins(admin_emails: &str, identity: MockIdentityPort) -> Self {
        let listings = MockListingPort::new();
        let claims = MockClaimPort::new(listings.clone());
        Self::build(admin_emails, identity, listings, claims)
    }

    fn build(
        admin_emails: &str,
        identity: MockIdentityPort,
        listings: MockListingPort,
        claims: MockClaimPort,
    ) -> Self {
        let config = ApiConfig {
            jwt_secret: "test-secret".to_string(),
            admin_emails: admin_emails.to_string(),
            ..ApiConfig::default()
        };
        let probe: Arc<dyn HealthCheckable> = Arc::new(claims.clone());
        let ports = Ports {
            identity: Arc::new(identity.clone()),
            listings: Arc::new(listings.clone()),
            claims: Arc::new(claims.clone()),
            probes: vec![probe],
        };
        let server = TestServer::new(create_router(AppState::new(ports, config))).unwrap();

        Self { server, identity, listings, claims }
    }

    async fn listing(&self, name: &str) -> Listing {
        self.listings
            .create_listing(NewListing::new(name, "Austin", "Texas").with_styles(["Traditional"]))
            .await
            .unwrap()
    }

    /// Registers an account and returns its bearer token
    async fn register(&self, email: &str) -> String {
        let response = self
            .server
            .post("/api/v1/auth/register")
            .json(&json!({ "email": email, "password": "correct-horse", "name": "Shop Owner" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["token"].as_str().unwrap().to_string()
    }

    async fn submit(&self, token: &str, listing: &Listing) -> Value {
        let response = self
            .server
            .post("/api/v1/claims")
            .authorization_bearer(token)
            .json(&json!({ "listingId": listing.id, "phone": "555-0100", "message": "It's mine" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()
    }
}

// ============================================================================
// Health Tests
// ============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness_and_readiness() {
        let app = TestApp::new().await;

        app.server.get("/health").await.assert_status_ok();

        let ready = app.server.get("/health/ready").await;
        ready.assert_status_ok();
        assert_eq!(ready.json::<Value>()["status"], "ready");
    }
}

// ============================================================================
// Auth Tests
// ============================================================================

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_assigns_role_from_allow_list() {
        let app = TestApp::new().await;

        let admin = app
            .server
            .post("/api/v1/auth/register")
            .json(&json!({ "email": "BOSS@Inkdex.test", "password": "correct-horse", "name": "Boss" }))
            .await;
        admin.assert_status(StatusCode::CREATED);
        assert_eq!(admin.json::<Value>()["user"]["role"], "admin");

        let owner = app
            .server
            .post("/api/v1/auth/register")
            .json(&json!({ "email": "owner@inkdex.test", "password": "correct-horse", "name": "Owner" }))
            .await;
        assert_eq!(owner.json::<Value>()["user"]["role"], "owner");
    }

    #[tokio::test]
    async fn test_register_validation_and_duplicates() {
        let app = TestApp::new().await;

        let short = app
            .server
            .post("/api/v1/auth/register")
            .json(&json!({ "email": "a@inkdex.test", "password": "short", "name": "A" }))
            .await;
        short.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(short.json::<Value>()["error"], "validation_error");

        app.register("dupe@inkdex.test").await;
        let dupe = app
            .server
            .post("/api/v1/auth/register")
            .json(&json!({ "email": "Dupe@Inkdex.test", "password": "correct-horse", "name": "B" }))
            .await;
        dupe.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_login_failures_share_a_message() {
        let app = TestApp::new().await;
        app.register("owner@inkdex.test").await;

        let wrong_password = app
            .server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": "owner@inkdex.test", "password": "not-the-password" }))
            .await;
        wrong_password.assert_status(StatusCode::UNAUTHORIZED);

        let unknown = app
            .server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": "nobody@inkdex.test", "password": "not-the-password" }))
            .await;
        unknown.assert_status(StatusCode::UNAUTHORIZED);

        assert_eq!(
            wrong_password.json::<Value>()["message"],
            unknown.json::<Value>()["message"]
        );
    }

    #[tokio::test]
    async fn test_login_promotes_allow_listed_owner() {
        let identity = MockIdentityPort::new();

        let before = TestApp::with_admins("", identity.clone()).await;
        before.register("late-admin@inkdex.test").await;

        let after = TestApp::with_admins("late-admin@inkdex.test", identity).await;
        let login = after
            .server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": "late-admin@inkdex.test", "password": "correct-horse" }))
            .await;
        login.assert_status_ok();
        let body = login.json::<Value>();
        assert_eq!(body["user"]["role"], "admin");

        let token = body["token"].as_str().unwrap();
        after
            .server
            .get("/api/v1/admin/claims")
            .authorization_bearer(token)
            .await
            .assert_status_ok();

        let me = after.server.get("/api/v1/dashboard/me").authorization_bearer(token).await;
        assert_eq!(me.json::<Value>()["role"], "admin");
        assert_eq!(after.identity.len().await, 1);
    }
}

// ============================================================================
// Gate Tests
// ============================================================================

mod gate_tests {
    use super::*;

    #[tokio::test]
    async fn test_dashboard_requires_session() {
        let app = TestApp::new().await;

        for path in ["/api/v1/dashboard/me", "/api/v1/dashboard/claims", "/api/v1/dashboard/listings"] {
            let response = app.server.get(path).await;
            response.assert_status(StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected() {
        let app = TestApp::new().await;
        let response = app
            .server
            .get("/api/v1/listings")
            .authorization_bearer("not-a-jwt")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_owner_is_redirected_from_admin_routes() {
        let app = TestApp::new().await;
        let token = app.register("owner@inkdex.test").await;

        let response = app
            .server
            .get("/api/v1/admin/claims")
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(response.json::<Value>()["redirect"], "/dashboard");
    }

    #[tokio::test]
    async fn test_anonymous_admin_request_is_unauthorized() {
        let app = TestApp::new().await;
        app.server
            .get("/api/v1/admin/claims")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}

// ============================================================================
// Directory Tests
// ============================================================================

mod directory_tests {
    use super::*;

    #[tokio::test]
    async fn test_browse_and_facets_show_active_listings_only() {
        let app = TestApp::new().await;
        app.listing("Iron Anchor Tattoo").await;
        app.listing("Blackline Studio").await;
        app.listings
            .create_listing(
                NewListing::new("Coming Soon", "Austin", "Texas").with_status(ListingStatus::Pending),
            )
            .await
            .unwrap();

        let page = app.server.get("/api/v1/listings?state=Texas&limit=10").await;
        page.assert_status_ok();
        let body = page.json::<Value>();
        assert_eq!(body["listings"].as_array().unwrap().len(), 2);
        assert_eq!(body["limit"], 10);
        assert_eq!(body["listings"][0]["name"], "Blackline Studio");

        let states = app.server.get("/api/v1/states").await.json::<Value>();
        assert_eq!(states[0]["stateSlug"], "texas");
        assert_eq!(states[0]["listingCount"], 2);

        let cities = app.server.get("/api/v1/states/texas/cities").await.json::<Value>();
        assert_eq!(cities[0]["citySlug"], "austin");

        let styles = app.server.get("/api/v1/styles").await.json::<Value>();
        assert_eq!(styles[0]["style"], "traditional");

        app.server
            .get("/api/v1/listings/coming-soon-austin")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_text_search() {
        let app = TestApp::new().await;
        app.listing("Iron Anchor Tattoo").await;
        app.listing("Blackline Studio").await;

        let body = app.server.get("/api/v1/listings?q=ANCHOR").await.json::<Value>();
        assert_eq!(body["listings"].as_array().unwrap().len(), 1);
    }
}

// ============================================================================
// Claim Flow Tests
// ============================================================================

mod claim_flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_review_and_ownership() {
        let app = TestApp::new().await;
        let listing = app.listing("Iron Anchor Tattoo").await;
        let admin = app.register(ADMIN_EMAIL).await;
        let owner = app.register("owner@inkdex.test").await;

        let claim = app.submit(&owner, &listing).await;
        assert_eq!(claim["status"], "pending");
        assert!(claim["reviewedAt"].is_null());

        let duplicate = app
            .server
            .post("/api/v1/claims")
            .authorization_bearer(&owner)
            .json(&json!({ "listingId": listing.id, "phone": "555-0100" }))
            .await;
        duplicate.assert_status(StatusCode::CONFLICT);

        let queue = app
            .server
            .get("/api/v1/admin/claims?view=pending")
            .authorization_bearer(&admin)
            .await
            .json::<Value>();
        assert_eq!(queue.as_array().unwrap().len(), 1);
        assert_eq!(queue[0]["listingName"], "Iron Anchor Tattoo");
        assert_eq!(queue[0]["claimantEmail"], "owner@inkdex.test");

        let claim_id = claim["id"].as_str().unwrap();
        let approved = app
            .server
            .put(&format!("/api/v1/admin/claims/{}", claim_id))
            .authorization_bearer(&admin)
            .json(&json!({ "status": "approved", "adminNotes": "Verified by phone" }))
            .await;
        approved.assert_status_ok();
        let approved = approved.json::<Value>();
        assert_eq!(approved["status"], "approved");
        assert!(approved["reviewedAt"].is_string());

        let owned = app
            .server
            .get("/api/v1/dashboard/listings")
            .authorization_bearer(&owner)
            .await
            .json::<Value>();
        assert_eq!(owned[0]["slug"], "iron-anchor-tattoo-austin");

        let again = app
            .server
            .put(&format!("/api/v1/admin/claims/{}", claim_id))
            .authorization_bearer(&admin)
            .json(&json!({ "status": "denied" }))
            .await;
        again.assert_status(StatusCode::CONFLICT);

        let processed = app
            .server
            .get("/api/v1/admin/claims?view=processed")
            .authorization_bearer(&admin)
            .await
            .json::<Value>();
        assert_eq!(processed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_review_rejects_unknown_decision() {
        let app = TestApp::new().await;
        let listing = app.listing("Iron Anchor Tattoo").await;
        let admin = app.register(ADMIN_EMAIL).await;
        let owner = app.register("owner@inkdex.test").await;
        let claim = app.submit(&owner, &listing).await;

        let response = app
            .server
            .put(&format!("/api/v1/admin/claims/{}", claim["id"].as_str().unwrap()))
            .authorization_bearer(&admin)
            .json(&json!({ "status": "pending" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_withdraw_and_resubmit() {
        let app = TestApp::new().await;
        let listing = app.listing("Blackline Studio").await;
        let owner = app.register("owner@inkdex.test").await;
        let other = app.register("other@inkdex.test").await;

        let claim = app.submit(&owner, &listing).await;
        let path = format!("/api/v1/claims/{}", claim["id"].as_str().unwrap());

        app.server
            .delete(&path)
            .authorization_bearer(&other)
            .await
            .assert_status(StatusCode::FORBIDDEN);

        app.server
            .delete(&path)
            .authorization_bearer(&owner)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        app.server
            .get(&path)
            .authorization_bearer(&owner)
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let again = app.submit(&owner, &listing).await;
        assert_ne!(again["id"], claim["id"]);

        let mine = app
            .server
            .get("/api/v1/dashboard/claims")
            .authorization_bearer(&owner)
            .await
            .json::<Value>();
        assert_eq!(mine.as_array().unwrap().len(), 1);
        assert_eq!(mine[0]["listingSlug"], "blackline-studio-austin");
        assert!(app.claims.listings().find_by_id(listing.id).await.unwrap().unwrap().owner_id.is_none());
    }

    #[tokio::test]
    async fn test_submit_requires_phone_and_known_listing() {
        let app = TestApp::new().await;
        let listing = app.listing("Iron Anchor Tattoo").await;
        let owner = app.register("owner@inkdex.test").await;

        app.server
            .post("/api/v1/claims")
            .authorization_bearer(&owner)
            .json(&json!({ "listingId": listing.id, "phone": "   " }))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        app.server
            .post("/api/v1/claims")
            .authorization_bearer(&owner)
            .json(&json!({ "listingId": uuid_v4(), "phone": "555-0100" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    fn uuid_v4() -> String {
        core_kernel::ListingId::new().as_uuid().to_string()
    }
}

// ============================================================================
// Malformed Requests
// ============================================================================

mod malformed_request_tests {
    use super::*;

    fn assert_validation_body(body: &Value) {
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_unparseable_claim_body_gets_error_body() {
        let app = TestApp::new().await;
        let owner = app.register("owner@inkdex.test").await;

        let response = app
            .server
            .post("/api/v1/claims")
            .authorization_bearer(&owner)
            .bytes("{\"listingId\":".into())
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_validation_body(&response.json::<Value>());

        let response = app
            .server
            .post("/api/v1/claims")
            .authorization_bearer(&owner)
            .json(&json!({ "listingId": "not-a-uuid", "phone": "555-0100" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_validation_body(&response.json::<Value>());
    }

    #[tokio::test]
    async fn test_malformed_claim_id_gets_error_body() {
        let app = TestApp::new().await;
        let owner = app.register("owner@inkdex.test").await;

        let response = app
            .server
            .get("/api/v1/claims/not-a-uuid")
            .authorization_bearer(&owner)
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_validation_body(&response.json::<Value>());
    }

    #[tokio::test]
    async fn test_review_without_status_gets_error_body() {
        let app = TestApp::new().await;
        let listing = app.listing("Iron Anchor Tattoo").await;
        let admin = app.register(ADMIN_EMAIL).await;
        let owner = app.register("owner@inkdex.test").await;
        let claim = app.submit(&owner, &listing).await;

        let response = app
            .server
            .put(&format!("/api/v1/admin/claims/{}", claim["id"].as_str().unwrap()))
            .authorization_bearer(&admin)
            .json(&json!({ "adminNotes": "no decision" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_validation_body(&response.json::<Value>());

        let response = app
            .server
            .get("/api/v1/admin/claims?view=everything")
            .authorization_bearer(&admin)
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_validation_body(&response.json::<Value>());
    }
}
