//! Claims Domain Ports
//!
//! `ClaimPort` is the claim store. Two of its guarantees carry the workflow's
//! invariants and every adapter must provide them:
//!
//! - `insert_claim` enforces `(user_id, listing_id)` uniqueness itself (a
//!   unique index, or a check-and-insert under one lock), so two concurrent
//!   submissions produce exactly one claim and one `PortError::Conflict`.
//!   A claim on a listing that no longer exists fails with
//!   `PortError::NotFound`.
//! - `record_review` is atomic and conditional on the claim still being
//!   pending. For an approval, the claim update and the listing's new owner
//!   become visible together or not at all.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{ClaimId, DomainPort, ListingId, PortError, UserId};

use crate::claim::{Claim, ClaimStatus, NewClaim, ReviewDecision};

/// Filters for listing claims; results are ordered newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimQuery {
    pub status: Option<ClaimStatus>,
    pub user_id: Option<UserId>,
    pub listing_id: Option<ListingId>,
}

impl ClaimQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn pending() -> Self {
        Self {
            status: Some(ClaimStatus::Pending),
            ..Default::default()
        }
    }

    pub fn by_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }

    pub fn matches(&self, claim: &Claim) -> bool {
        self.status.map_or(true, |s| claim.status == s)
            && self.user_id.map_or(true, |u| claim.user_id == u)
            && self.listing_id.map_or(true, |l| claim.listing_id == l)
    }
}

/// A review to persist
#[derive(Debug, Clone)]
pub struct ReviewRecord {
    pub claim_id: ClaimId,
    pub decision: ReviewDecision,
    pub reviewer_id: UserId,
    pub admin_notes: Option<String>,
    pub reviewed_at: DateTime<Utc>,
}

/// Port for claim storage
#[async_trait]
pub trait ClaimPort: DomainPort {
    /// Persists a new pending claim
    ///
    /// `PortError::Conflict` when the user already has a claim on the listing.
    async fn insert_claim(&self, claim: NewClaim) -> Result<Claim, PortError>;

    /// Retrieves a claim by id
    async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError>;

    /// Claims matching a query, newest first
    async fn list_claims(&self, query: &ClaimQuery) -> Result<Vec<Claim>, PortError>;

    /// Moves a pending claim to its reviewed status
    ///
    /// On approval the referenced listing's owner is set to the claimant in
    /// the same atomic unit. `PortError::NotFound` when the claim is absent,
    /// `PortError::Conflict` when it is no longer pending.
    async fn record_review(&self, review: ReviewRecord) -> Result<Claim, PortError>;

    /// Deletes a claim that is still pending
    ///
    /// `PortError::NotFound` when absent, `PortError::Conflict` when reviewed.
    async fn delete_pending_claim(&self, id: ClaimId) -> Result<(), PortError>;
}

/// Mock implementation of ClaimPort for testing
///
/// Shares a `MockListingPort` with the directory so approvals update the
/// same listings the rest of the test sees.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult, HealthCheckable};
    use domain_listing::{ListingPort, MockListingPort};

    /// In-memory mock implementation of ClaimPort
    #[derive(Debug, Clone)]
    pub struct MockClaimPort {
        claims: Arc<RwLock<HashMap<ClaimId, Claim>>>,
        listings: MockListingPort,
    }

    impl MockClaimPort {
        /// Creates a claim store backed by the given listing store
        pub fn new(listings: MockListingPort) -> Self {
            Self {
                claims: Arc::new(RwLock::new(HashMap::new())),
                listings,
            }
        }

        /// The listing store approvals write to
        pub fn listings(&self) -> &MockListingPort {
            &self.listings
        }
    }

    impl DomainPort for MockClaimPort {}

    #[async_trait]
    impl HealthCheckable for MockClaimPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-claim-port".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ClaimPort for MockClaimPort {
        async fn insert_claim(&self, claim: NewClaim) -> Result<Claim, PortError> {
            let mut claims = self.claims.write().await;
            if self.listings.find_by_id(claim.listing_id).await?.is_none() {
                return Err(PortError::not_found("Listing", claim.listing_id));
            }
            if claims
                .values()
                .any(|c| c.user_id == claim.user_id && c.listing_id == claim.listing_id)
            {
                return Err(PortError::conflict("claims_user_listing_key"));
            }
            let claim = Claim::new(claim);
            claims.insert(claim.id, claim.clone());
            Ok(claim)
        }

        async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
            Ok(self.claims.read().await.get(&id).cloned())
        }

        async fn list_claims(&self, query: &ClaimQuery) -> Result<Vec<Claim>, PortError> {
            let claims = self.claims.read().await;
            let mut results: Vec<_> = claims.values().filter(|c| query.matches(c)).cloned().collect();
            results.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(results)
        }

        async fn record_review(&self, review: ReviewRecord) -> Result<Claim, PortError> {
            // The claims write lock is held across the owner update, so no
            // reader can see the new owner next to a still-pending claim.
            let mut claims = self.claims.write().await;
            let claim = claims
                .get_mut(&review.claim_id)
                .ok_or_else(|| PortError::not_found("Claim", review.claim_id))?;

            if !claim.is_pending() {
                return Err(PortError::conflict(format!(
                    "claim {} is already {}",
                    claim.id, claim.status
                )));
            }

            if review.decision == ReviewDecision::Approved {
                self.listings.update_owner(claim.listing_id, claim.user_id).await?;
            }

            claim
                .apply_review(review.decision, review.reviewer_id, review.admin_notes, review.reviewed_at)
                .map_err(|e| PortError::conflict(e.to_string()))?;
            Ok(claim.clone())
        }

        async fn delete_pending_claim(&self, id: ClaimId) -> Result<(), PortError> {
            let mut claims = self.claims.write().await;
            match claims.get(&id) {
                None => Err(PortError::not_found("Claim", id)),
                Some(claim) if !claim.is_pending() => Err(PortError::conflict(format!(
                    "claim {} is already {}",
                    id, claim.status
                ))),
                Some(_) => {
                    claims.remove(&id);
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn claim(user_id: UserId, listing_id: ListingId, status: ClaimStatus) -> Claim {
        let mut claim = Claim::new(NewClaim {
            user_id,
            listing_id,
            phone: "555-0100".to_string(),
            message: None,
        });
        let decision = match status {
            ClaimStatus::Pending => return claim,
            ClaimStatus::Approved => ReviewDecision::Approved,
            ClaimStatus::Denied => ReviewDecision::Denied,
        };
        claim
            .apply_review(decision, UserId::new(), None, Utc::now())
            .unwrap();
        claim
    }

    fn status_strategy() -> impl Strategy<Value = ClaimStatus> {
        prop_oneof![
            Just(ClaimStatus::Pending),
            Just(ClaimStatus::Approved),
            Just(ClaimStatus::Denied),
        ]
    }

    proptest! {
        #[test]
        fn pending_and_processed_partition_all(
            statuses in prop::collection::vec(status_strategy(), 0..20)
        ) {
            let claims: Vec<_> = statuses
                .iter()
                .map(|s| claim(UserId::new(), ListingId::new(), *s))
                .collect();

            let all: Vec<_> = claims.iter().filter(|c| ClaimQuery::all().matches(c)).collect();
            let pending: Vec<_> = claims.iter().filter(|c| ClaimQuery::pending().matches(c)).collect();
            let processed: Vec<_> = all.iter().filter(|c| !pending.contains(c)).collect();

            prop_assert_eq!(all.len(), claims.len());
            prop_assert_eq!(pending.len() + processed.len(), all.len());
            prop_assert!(pending.iter().all(|c| c.is_pending()));
            prop_assert!(processed.iter().all(|c| c.reviewed_at.is_some()));
        }

        #[test]
        fn by_user_only_matches_that_user(
            owners in prop::collection::vec(any::<bool>(), 1..20),
            status in status_strategy(),
        ) {
            let me = UserId::new();
            let claims: Vec<_> = owners
                .iter()
                .map(|mine| claim(if *mine { me } else { UserId::new() }, ListingId::new(), status))
                .collect();

            let query = ClaimQuery::by_user(me);
            let matched = claims.iter().filter(|c| query.matches(c)).count();
            prop_assert_eq!(matched, owners.iter().filter(|m| **m).count());
        }
    }
}
