//! Test Data Builders
//!
//! Builders with sensible defaults so tests only spell out the fields they
//! care about.

use chrono::{DateTime, Utc};
use core_kernel::{ListingId, UserId};
use domain_claims::{Claim, NewClaim, ReviewDecision};
use domain_identity::{normalize_email, password::hash_password, NewUser, Role, User};
use domain_listing::{Listing, ListingStatus, NewListing};
use once_cell::sync::Lazy;

use crate::fixtures::{ClaimFixtures, IdFixtures, ListingFixtures, TemporalFixtures, UserFixtures};

/// Hash of the fixture password, computed once per process
static FIXTURE_PASSWORD_HASH: Lazy<String> =
    Lazy::new(|| hash_password(UserFixtures::password()).unwrap());

/// Builder for users
pub struct TestUserBuilder {
    id: UserId,
    email: String,
    password: String,
    name: String,
    role: Role,
    created_at: DateTime<Utc>,
}

impl Default for TestUserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestUserBuilder {
    pub fn new() -> Self {
        Self {
            id: UserId::new_v7(),
            email: UserFixtures::owner_email().to_string(),
            password: UserFixtures::password().to_string(),
            name: UserFixtures::name().to_string(),
            role: Role::Owner,
            created_at: TemporalFixtures::epoch(),
        }
    }

    /// Shortcut for an admin account
    pub fn admin() -> Self {
        Self::new()
            .with_email(UserFixtures::admin_email())
            .with_role(Role::Admin)
    }

    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = id;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Creation data for an `IdentityPort`, with a real Argon2 hash
    pub fn build_new(self) -> NewUser {
        let password_hash = if self.password == UserFixtures::password() {
            FIXTURE_PASSWORD_HASH.clone()
        } else {
            hash_password(&self.password).unwrap()
        };
        NewUser {
            email: normalize_email(&self.email),
            password_hash,
            name: self.name,
            role: self.role,
        }
    }

    /// A stored user, for seeding mocks directly
    pub fn build(self) -> User {
        let created_at = self.created_at;
        let id = self.id;
        let new = self.build_new();
        User {
            id,
            email: new.email,
            password_hash: new.password_hash,
            name: new.name,
            role: new.role,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Builder for listings
pub struct TestListingBuilder {
    listing: NewListing,
    owner_id: Option<UserId>,
}

impl Default for TestListingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestListingBuilder {
    pub fn new() -> Self {
        Self {
            listing: NewListing::new(
                ListingFixtures::name(),
                ListingFixtures::city(),
                ListingFixtures::state(),
            )
            .with_styles(ListingFixtures::styles()),
            owner_id: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.listing.name = name.into();
        self
    }

    pub fn in_city(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.listing.city = city.into();
        self.listing.state = state.into();
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.listing.slug = Some(slug.into());
        self
    }

    pub fn with_styles<I, S>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.listing = self.listing.with_styles(styles);
        self
    }

    pub fn pending(mut self) -> Self {
        self.listing.status = ListingStatus::Pending;
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.listing.phone = Some(phone.into());
        self
    }

    /// Only honoured by [`TestListingBuilder::build`]; new listings are unclaimed
    pub fn owned_by(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn owner(&self) -> Option<UserId> {
        self.owner_id
    }

    pub fn build_new(self) -> NewListing {
        self.listing
    }

    pub fn build(self) -> Listing {
        let mut listing = Listing::from_new(self.listing);
        listing.owner_id = self.owner_id;
        listing
    }
}

/// Builder for claims
pub struct TestClaimBuilder {
    user_id: UserId,
    listing_id: ListingId,
    phone: String,
    message: Option<String>,
    review: Option<(ReviewDecision, UserId, Option<String>)>,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    pub fn new() -> Self {
        Self {
            user_id: IdFixtures::user_id(),
            listing_id: IdFixtures::listing_id(),
            phone: ClaimFixtures::phone().to_string(),
            message: Some(ClaimFixtures::message().to_string()),
            review: None,
        }
    }

    pub fn for_listing(mut self, listing_id: ListingId) -> Self {
        self.listing_id = listing_id;
        self
    }

    pub fn by_user(mut self, user_id: UserId) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn without_message(mut self) -> Self {
        self.message = None;
        self
    }

    pub fn approved_by(mut self, admin_id: UserId) -> Self {
        self.review = Some((
            ReviewDecision::Approved,
            admin_id,
            Some(ClaimFixtures::admin_notes().to_string()),
        ));
        self
    }

    pub fn denied_by(mut self, admin_id: UserId) -> Self {
        self.review = Some((ReviewDecision::Denied, admin_id, None));
        self
    }

    pub fn build_new(self) -> NewClaim {
        NewClaim {
            user_id: self.user_id,
            listing_id: self.listing_id,
            phone: self.phone,
            message: self.message,
        }
    }

    /// A claim in its final state; reviewed claims carry the fixture review time
    pub fn build(self) -> Claim {
        let review = self.review.clone();
        let mut claim = Claim::new(self.build_new());
        if let Some((decision, admin_id, notes)) = review {
            claim
                .apply_review(decision, admin_id, notes, TemporalFixtures::review_time())
                .unwrap();
        }
        claim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::ClaimStatus;

    #[test]
    fn test_user_builder_hashes_and_normalizes() {
        let user = TestUserBuilder::new().with_email("  Ink@Example.COM ").build();
        assert_eq!(user.email, "ink@example.com");
        assert!(user.password_hash.starts_with("$argon2"));
        assert_eq!(user.role, Role::Owner);
        assert!(TestUserBuilder::admin().build().is_admin());
    }

    #[test]
    fn test_listing_builder_defaults() {
        let listing = TestListingBuilder::new().build();
        assert_eq!(listing.slug, ListingFixtures::slug());
        assert_eq!(listing.styles, vec!["traditional", "blackwork"]);
        assert!(listing.is_active());
        assert!(!listing.is_claimed());

        let owner = UserId::new_v7();
        let owned = TestListingBuilder::new().pending().owned_by(owner).build();
        assert!(owned.is_owned_by(owner));
        assert!(!owned.is_active());
    }

    #[test]
    fn test_claim_builder_review_states() {
        let pending = TestClaimBuilder::new().build();
        assert!(pending.is_pending());
        assert!(pending.reviewed_at.is_none());

        let approved = TestClaimBuilder::new().approved_by(IdFixtures::admin_id()).build();
        assert_eq!(approved.status, ClaimStatus::Approved);
        assert_eq!(approved.reviewed_by, Some(IdFixtures::admin_id()));
        assert_eq!(approved.reviewed_at, Some(TemporalFixtures::review_time()));

        let denied = TestClaimBuilder::new().denied_by(IdFixtures::admin_id()).build();
        assert_eq!(denied.status, ClaimStatus::Denied);
        assert!(denied.admin_notes.is_none());
    }
}
