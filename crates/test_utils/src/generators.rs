//! Property-Based and Fake Data Generators
//!
//! Proptest strategies that respect domain invariants, plus `fake`-backed
//! helpers for realistic-looking seed data.

use fake::faker::address::en::{CityName, StateName};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use proptest::prelude::*;

use domain_claims::{ClaimStatus, ReviewDecision};
use domain_identity::Role;
use domain_listing::NewListing;

/// Strategy for plausible email addresses in mixed case with stray whitespace
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[ ]{0,2}", "[A-Za-z][A-Za-z0-9._]{0,11}", "[A-Za-z]{2,10}", "(com|io|net|test)", "[ ]{0,2}")
        .prop_map(|(lead, local, domain, tld, trail)| format!("{lead}{local}@{domain}.{tld}{trail}"))
}

/// Strategy for passwords accepted at registration
pub fn password_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9!@#$%^&*]{8,32}"
}

/// Strategy for shop names with punctuation the slugger must flatten
pub fn shop_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 '&.-]{0,39}"
}

/// Strategy for phone numbers in common US formats
pub fn phone_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{3}-[0-9]{3}-[0-9]{4}",
        "\\([0-9]{3}\\) [0-9]{3}-[0-9]{4}",
        "\\+1 [0-9]{10}",
    ]
}

/// Strategy for roles
pub fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Owner), Just(Role::Admin)]
}

/// Strategy for review decisions
pub fn decision_strategy() -> impl Strategy<Value = ReviewDecision> {
    prop_oneof![Just(ReviewDecision::Approved), Just(ReviewDecision::Denied)]
}

/// Strategy for any claim status
pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Denied),
    ]
}

/// A random active listing with fake name, city, and state
pub fn fake_listing() -> NewListing {
    let name: String = CompanyName().fake();
    let city: String = CityName().fake();
    let state: String = StateName().fake();
    NewListing::new(format!("{} Tattoo", name), city, state).with_styles(["Traditional"])
}

/// A random email that is safe to use in tests
pub fn fake_email() -> String {
    SafeEmail().fake()
}

pub fn fake_name() -> String {
    Name().fake()
}

pub fn fake_phone() -> String {
    PhoneNumber().fake()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_identity::normalize_email;
    use domain_listing::slugify;

    proptest! {
        #[test]
        fn generated_emails_normalize_cleanly(email in email_strategy()) {
            let normalized = normalize_email(&email);
            prop_assert!(normalized.contains('@'));
            prop_assert_eq!(normalized.trim(), normalized.as_str());
        }

        #[test]
        fn generated_passwords_meet_minimum(password in password_strategy()) {
            prop_assert!(password.len() >= 8);
        }

        #[test]
        fn generated_shop_names_slugify(name in shop_name_strategy()) {
            let slug = slugify(&name);
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
        }

        #[test]
        fn generated_phones_are_not_blank(phone in phone_strategy()) {
            prop_assert!(!phone.trim().is_empty());
        }
    }

    #[test]
    fn test_fake_listing_has_slug() {
        let listing = fake_listing();
        assert!(!listing.slug().is_empty());
        assert!(fake_email().contains('@'));
        assert!(!fake_name().is_empty());
    }
}
