//! Custom Test Assertions
//!
//! Assertion helpers for domain types with messages that name the entity
//! involved.

use core_kernel::{ErrorKind, UserId};
use domain_claims::{Claim, ClaimStatus};
use domain_listing::Listing;

/// Asserts a claim is in `expected` status and its review fields agree with it
pub fn assert_claim_status(claim: &Claim, expected: ClaimStatus) {
    assert_eq!(
        claim.status, expected,
        "Claim {} expected {}, got {}",
        claim.id, expected, claim.status
    );
    let reviewed = expected != ClaimStatus::Pending;
    assert_eq!(
        claim.reviewed_at.is_some(),
        reviewed,
        "Claim {} reviewed_at does not match status {}",
        claim.id,
        claim.status
    );
    assert_eq!(
        claim.reviewed_by.is_some(),
        reviewed,
        "Claim {} reviewed_by does not match status {}",
        claim.id,
        claim.status
    );
}

/// Asserts a listing is owned by `owner`
pub fn assert_owned_by(listing: &Listing, owner: UserId) {
    assert_eq!(
        listing.owner_id,
        Some(owner),
        "Listing {} expected owner {}, got {:?}",
        listing.slug,
        owner,
        listing.owner_id
    );
}

/// Asserts a listing has no owner
pub fn assert_unclaimed(listing: &Listing) {
    assert!(
        listing.owner_id.is_none(),
        "Listing {} expected unclaimed, owned by {:?}",
        listing.slug,
        listing.owner_id
    );
}

/// Asserts a result failed with the given error kind
///
/// Works for any domain error that exposes `kind()` through the closure.
pub fn assert_error_kind<T, E>(result: Result<T, E>, expected: ErrorKind, kind: impl Fn(&E) -> ErrorKind)
where
    T: std::fmt::Debug,
    E: std::fmt::Debug,
{
    match result {
        Ok(value) => panic!("Expected {} error, got Ok({:?})", expected, value),
        Err(e) => assert_eq!(kind(&e), expected, "Unexpected error: {:?}", e),
    }
}

/// Asserts claims are ordered newest first
pub fn assert_newest_first(claims: &[Claim]) {
    for pair in claims.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "Claims out of order: {} ({}) before {} ({})",
            pair[0].id,
            pair[0].created_at,
            pair[1].id,
            pair[1].created_at
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{TestClaimBuilder, TestListingBuilder};
    use crate::fixtures::IdFixtures;
    use domain_claims::ClaimError;

    #[test]
    fn test_claim_status_assertions() {
        assert_claim_status(&TestClaimBuilder::new().build(), ClaimStatus::Pending);
        assert_claim_status(
            &TestClaimBuilder::new().approved_by(IdFixtures::admin_id()).build(),
            ClaimStatus::Approved,
        );
    }

    #[test]
    #[should_panic(expected = "expected approved")]
    fn test_claim_status_mismatch_panics() {
        assert_claim_status(&TestClaimBuilder::new().build(), ClaimStatus::Approved);
    }

    #[test]
    fn test_ownership_assertions() {
        assert_unclaimed(&TestListingBuilder::new().build());
        let owner = IdFixtures::user_id();
        assert_owned_by(&TestListingBuilder::new().owned_by(owner).build(), owner);
    }

    #[test]
    fn test_error_kind_assertion() {
        let result: Result<(), ClaimError> = Err(ClaimError::validation("phone is required"));
        assert_error_kind(result, ErrorKind::Validation, ClaimError::kind);
    }
}
