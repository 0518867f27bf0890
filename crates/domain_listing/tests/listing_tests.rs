//! Comprehensive tests for domain_listing

use std::sync::Arc;

use core_kernel::{ErrorKind, UserId};
use domain_identity::{Caller, Role};
use domain_listing::{
    DirectoryService, ListingError, ListingPort, ListingQuery, ListingStatus, MockListingPort,
    NewListing,
};

async fn seeded() -> (DirectoryService, MockListingPort) {
    let port = MockListingPort::new();
    let shops = vec![
        NewListing::new("Iron Anchor Tattoo", "Austin", "Texas").with_styles(["Traditional"]),
        NewListing::new("Blackline Studio", "Austin", "Texas").with_styles(["Blackwork", "Fine Line"]),
        NewListing::new("Lone Star Ink", "Dallas", "Texas").with_styles(["Traditional", "Realism"]),
        NewListing::new("Harbor Electric", "Portland", "Maine").with_styles(["Traditional"]),
        NewListing::new("Coming Soon Tattoo", "Austin", "Texas")
            .with_status(ListingStatus::Pending),
    ];
    for shop in shops {
        port.create_listing(shop).await.unwrap();
    }
    (DirectoryService::new(Arc::new(port.clone())), port)
}

// ============================================================================
// Browse Tests
// ============================================================================

mod browse_tests {
    use super::*;

    #[tokio::test]
    async fn test_browse_by_state_excludes_pending() {
        let (service, _) = seeded().await;
        let results = service.browse(&ListingQuery::by_state("texas")).await.unwrap();

        let names: Vec<_> = results.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Blackline Studio", "Iron Anchor Tattoo", "Lone Star Ink"]);
    }

    #[tokio::test]
    async fn test_browse_by_city() {
        let (service, _) = seeded().await;
        let results = service
            .browse(&ListingQuery::by_city("Texas", "Austin"))
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_city_without_state_is_invalid() {
        let (service, _) = seeded().await;
        let query = ListingQuery {
            city: Some("austin".to_string()),
            ..Default::default()
        };
        let err = service.browse(&query).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_browse_by_style_and_text() {
        let (service, _) = seeded().await;
        assert_eq!(service.browse(&ListingQuery::by_style("traditional")).await.unwrap().len(), 3);
        assert_eq!(service.browse(&ListingQuery::search("ink")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_pagination() {
        let (service, _) = seeded().await;
        let page = service
            .browse(&ListingQuery::by_state("texas").paginate(2, 2))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Lone Star Ink");
    }
}

// ============================================================================
// Facet Tests
// ============================================================================

mod facet_tests {
    use super::*;

    #[tokio::test]
    async fn test_states_count_active_listings() {
        let (service, _) = seeded().await;
        let states = service.states().await.unwrap();

        assert_eq!(states.len(), 2);
        let texas = states.iter().find(|s| s.state_slug == "texas").unwrap();
        assert_eq!(texas.listing_count, 3);
    }

    #[tokio::test]
    async fn test_cities_of_state() {
        let (service, _) = seeded().await;
        let cities = service.cities("Texas").await.unwrap();
        let slugs: Vec<_> = cities.iter().map(|c| c.city_slug.as_str()).collect();
        assert_eq!(slugs, vec!["austin", "dallas"]);
    }

    #[tokio::test]
    async fn test_styles() {
        let (service, _) = seeded().await;
        let styles = service.styles().await.unwrap();
        let traditional = styles.iter().find(|s| s.style == "traditional").unwrap();
        assert_eq!(traditional.listing_count, 3);
    }
}

// ============================================================================
// Listing Page & Dashboard Tests
// ============================================================================

mod visibility_tests {
    use super::*;

    #[tokio::test]
    async fn test_pending_listing_hidden_from_public() {
        let (service, _) = seeded().await;
        let err = service
            .get_listing("coming-soon-tattoo-austin", &Caller::Anonymous)
            .await
            .unwrap_err();
        assert!(matches!(err, ListingError::ListingNotFound(_)));
    }

    #[tokio::test]
    async fn test_pending_listing_visible_to_admin_and_owner() {
        let (service, port) = seeded().await;
        let admin = Caller::authenticated(UserId::new(), Role::Admin);
        assert!(service.get_listing("coming-soon-tattoo-austin", &admin).await.is_ok());

        let owner = UserId::new();
        let pending = port.find_by_slug("coming-soon-tattoo-austin").await.unwrap().unwrap();
        port.update_owner(pending.id, owner).await.unwrap();
        let caller = Caller::authenticated(owner, Role::Owner);
        assert!(service.get_listing("coming-soon-tattoo-austin", &caller).await.is_ok());
    }

    #[tokio::test]
    async fn test_owned_listings_requires_authentication() {
        let (service, _) = seeded().await;
        let err = service.owned_listings(&Caller::Anonymous).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_owned_listings() {
        let (service, port) = seeded().await;
        let owner = UserId::new();
        let shop = port.find_by_slug("lone-star-ink-dallas").await.unwrap().unwrap();
        port.update_owner(shop.id, owner).await.unwrap();

        let owned = service
            .owned_listings(&Caller::authenticated(owner, Role::Owner))
            .await
            .unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, shop.id);
    }
}
