//! Pre-built Test Fixtures
//!
//! Fixed, predictable values shared by unit and integration tests.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{ClaimId, ListingId, UserId};
use uuid::Uuid;

/// Fixture for account data
pub struct UserFixtures;

impl UserFixtures {
    pub fn admin_email() -> &'static str {
        "admin@inkdex.test"
    }

    pub fn owner_email() -> &'static str {
        "owner@inkdex.test"
    }

    pub fn password() -> &'static str {
        "correct-horse-battery"
    }

    pub fn name() -> &'static str {
        "Sailor Jerry"
    }

    /// Allow-list CSV matching [`UserFixtures::admin_email`]
    pub fn admin_csv() -> &'static str {
        "admin@inkdex.test"
    }
}

/// Fixture for listing data
pub struct ListingFixtures;

impl ListingFixtures {
    pub fn name() -> &'static str {
        "Iron Anchor Tattoo"
    }

    pub fn city() -> &'static str {
        "Austin"
    }

    pub fn state() -> &'static str {
        "Texas"
    }

    /// Slug derived from [`ListingFixtures::name`] and [`ListingFixtures::city`]
    pub fn slug() -> &'static str {
        "iron-anchor-tattoo-austin"
    }

    pub fn styles() -> [&'static str; 2] {
        ["Traditional", "Blackwork"]
    }
}

/// Fixture for claim data
pub struct ClaimFixtures;

impl ClaimFixtures {
    pub fn phone() -> &'static str {
        "512-555-0100"
    }

    pub fn message() -> &'static str {
        "I have owned this shop since 2015"
    }

    pub fn admin_notes() -> &'static str {
        "Verified by phone"
    }
}

/// Fixture for timestamps
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Jan 1, 2024 00:00 UTC
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    /// Jun 15, 2024 12:00 UTC
    pub fn review_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }
}

/// Fixture for deterministic identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn user_id() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0001))
    }

    pub fn admin_id() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0002))
    }

    pub fn listing_id() -> ListingId {
        ListingId::from_uuid(Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0001_0001))
    }

    pub fn claim_id() -> ClaimId {
        ClaimId::from_uuid(Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0002_0001))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_listing::NewListing;

    #[test]
    fn test_listing_slug_fixture_matches_derivation() {
        let listing = NewListing::new(
            ListingFixtures::name(),
            ListingFixtures::city(),
            ListingFixtures::state(),
        );
        assert_eq!(listing.slug(), ListingFixtures::slug());
    }

    #[test]
    fn test_id_fixtures_are_distinct() {
        assert_ne!(IdFixtures::user_id(), IdFixtures::admin_id());
        assert!(TemporalFixtures::epoch() < TemporalFixtures::review_time());
    }
}
