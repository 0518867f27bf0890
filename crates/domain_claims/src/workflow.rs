//! Claim workflow engine
//!
//! Every operation takes the request's [`Caller`] and applies its gate
//! policy before touching storage:
//!
//! | Operation        | Policy                         |
//! |------------------|--------------------------------|
//! | `submit`         | dashboard                      |
//! | `list_by_user`   | dashboard                      |
//! | `get`            | dashboard + claimant or admin  |
//! | `withdraw`       | dashboard + claimant           |
//! | `review`         | admin                          |
//! | `list_pending` / `list_processed` / `list_all` | admin |
//!
//! Nothing here retries. Storage failures surface as `ClaimError::Port`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use core_kernel::{ClaimId, ListingId, UserId};
use domain_identity::{Caller, IdentityPort};
use domain_listing::ListingPort;

use crate::claim::{Claim, ClaimDetail, NewClaim, ReviewDecision};
use crate::error::ClaimError;
use crate::ports::{ClaimPort, ClaimQuery, ReviewRecord};

/// Raw submission, as received from the caller
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitClaim {
    pub listing_id: Option<ListingId>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// Admin queue views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimView {
    #[default]
    Pending,
    Processed,
    All,
}

/// The claim workflow service
#[derive(Clone)]
pub struct ClaimWorkflow {
    claims: Arc<dyn ClaimPort>,
    listings: Arc<dyn ListingPort>,
    users: Arc<dyn IdentityPort>,
}

impl ClaimWorkflow {
    pub fn new(
        claims: Arc<dyn ClaimPort>,
        listings: Arc<dyn ListingPort>,
        users: Arc<dyn IdentityPort>,
    ) -> Self {
        Self { claims, listings, users }
    }

    /// Submits a claim on a listing for the authenticated caller
    ///
    /// Phone and message are trimmed; a blank message is dropped.
    #[instrument(skip_all, fields(listing_id = ?request.listing_id))]
    pub async fn submit(&self, caller: &Caller, request: SubmitClaim) -> Result<Claim, ClaimError> {
        let principal = caller.require_authenticated()?;

        let listing_id = request
            .listing_id
            .ok_or_else(|| ClaimError::validation("listingId is required"))?;
        let phone = request
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ClaimError::validation("phone is required"))?
            .to_string();
        let message = request
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        if self.listings.find_by_id(listing_id).await?.is_none() {
            return Err(ClaimError::ListingNotFound(listing_id.to_string()));
        }

        let claim = self
            .claims
            .insert_claim(NewClaim {
                user_id: principal.user_id,
                listing_id,
                phone,
                message,
            })
            .await
            .map_err(|e| {
                if e.is_conflict() {
                    ClaimError::DuplicateClaim
                } else if e.is_not_found() {
                    ClaimError::ListingNotFound(listing_id.to_string())
                } else {
                    ClaimError::Port(e)
                }
            })?;

        info!(claim_id = %claim.id, user_id = %claim.user_id, "claim submitted");
        Ok(claim)
    }

    /// Admin decision on a pending claim
    ///
    /// Approval transfers the listing to the claimant, replacing any
    /// previous owner, in the same atomic unit as the status change.
    #[instrument(skip(self, caller, admin_notes))]
    pub async fn review(
        &self,
        caller: &Caller,
        claim_id: ClaimId,
        decision: ReviewDecision,
        admin_notes: Option<String>,
    ) -> Result<Claim, ClaimError> {
        let reviewer = caller.require_admin()?;

        let claim = self.load(claim_id).await?;
        if !claim.is_pending() {
            return Err(claim.not_pending());
        }

        let admin_notes = admin_notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let record = ReviewRecord {
            claim_id,
            decision,
            reviewer_id: reviewer.user_id,
            admin_notes,
            reviewed_at: Utc::now(),
        };
        let reviewed = match self.claims.record_review(record).await {
            Ok(reviewed) => reviewed,
            // Another reviewer got there first
            Err(e) if e.is_conflict() => {
                warn!(%claim_id, "concurrent review rejected");
                let current = self.load(claim_id).await?;
                return Err(current.not_pending());
            }
            Err(e) if e.is_not_found() => {
                return Err(ClaimError::ClaimNotFound(claim_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            %claim_id,
            decision = %decision,
            reviewer = %reviewer.user_id,
            listing_id = %reviewed.listing_id,
            "claim reviewed"
        );
        Ok(reviewed)
    }

    /// Claimant deletes their own claim while it is still pending
    #[instrument(skip(self, caller))]
    pub async fn withdraw(&self, caller: &Caller, claim_id: ClaimId) -> Result<(), ClaimError> {
        let principal = caller.require_authenticated()?;

        let claim = self.load(claim_id).await?;
        principal.require_owner_of(claim.user_id)?;
        if !claim.is_pending() {
            return Err(claim.not_pending());
        }

        match self.claims.delete_pending_claim(claim_id).await {
            Ok(()) => {}
            // Reviewed between the check and the delete
            Err(e) if e.is_conflict() => {
                let current = self.load(claim_id).await?;
                return Err(current.not_pending());
            }
            Err(e) if e.is_not_found() => {
                return Err(ClaimError::ClaimNotFound(claim_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        info!(%claim_id, user_id = %principal.user_id, "claim withdrawn");
        Ok(())
    }

    /// A single claim, readable by its claimant or an admin
    pub async fn get(&self, caller: &Caller, claim_id: ClaimId) -> Result<Claim, ClaimError> {
        let principal = caller.require_authenticated()?;
        let claim = self.load(claim_id).await?;
        principal.require_owner_or_admin(claim.user_id)?;
        Ok(claim)
    }

    /// Every claim the caller has submitted, any status
    pub async fn list_by_user(&self, caller: &Caller) -> Result<Vec<Claim>, ClaimError> {
        let principal = caller.require_authenticated()?;
        Ok(self.claims.list_claims(&ClaimQuery::by_user(principal.user_id)).await?)
    }

    /// Claims awaiting review
    pub async fn list_pending(&self, caller: &Caller) -> Result<Vec<Claim>, ClaimError> {
        caller.require_admin()?;
        Ok(self.claims.list_claims(&ClaimQuery::pending()).await?)
    }

    /// Every claim
    pub async fn list_all(&self, caller: &Caller) -> Result<Vec<Claim>, ClaimError> {
        caller.require_admin()?;
        Ok(self.claims.list_claims(&ClaimQuery::all()).await?)
    }

    /// Reviewed claims: `list_all` minus `list_pending`
    pub async fn list_processed(&self, caller: &Caller) -> Result<Vec<Claim>, ClaimError> {
        Ok(self
            .list_all(caller)
            .await?
            .into_iter()
            .filter(|c| !c.is_pending())
            .collect())
    }

    /// Admin queue, enriched for display
    pub async fn admin_queue(
        &self,
        caller: &Caller,
        view: ClaimView,
    ) -> Result<Vec<ClaimDetail>, ClaimError> {
        let claims = match view {
            ClaimView::Pending => self.list_pending(caller).await?,
            ClaimView::Processed => self.list_processed(caller).await?,
            ClaimView::All => self.list_all(caller).await?,
        };
        self.describe(claims).await
    }

    /// Attaches listing and claimant details to claims
    ///
    /// Claims whose listing or user has disappeared keep `None` details.
    pub async fn describe(&self, claims: Vec<Claim>) -> Result<Vec<ClaimDetail>, ClaimError> {
        let mut listings = HashMap::new();
        let mut users: HashMap<UserId, _> = HashMap::new();
        let mut details = Vec::with_capacity(claims.len());

        for claim in claims {
            if !listings.contains_key(&claim.listing_id) {
                let listing = self.listings.find_by_id(claim.listing_id).await?;
                listings.insert(claim.listing_id, listing);
            }
            if !users.contains_key(&claim.user_id) {
                let user = self.users.find_by_id(claim.user_id).await?;
                users.insert(claim.user_id, user);
            }

            let listing = listings.get(&claim.listing_id).and_then(Option::as_ref);
            let user = users.get(&claim.user_id).and_then(Option::as_ref);

            details.push(ClaimDetail {
                listing_name: listing.map(|l| l.name.clone()),
                listing_slug: listing.map(|l| l.slug.clone()),
                claimant_email: user.map(|u| u.email.clone()),
                claimant_name: user.map(|u| u.name.clone()),
                claim,
            });
        }

        Ok(details)
    }

    async fn load(&self, claim_id: ClaimId) -> Result<Claim, ClaimError> {
        self.claims
            .get_claim(claim_id)
            .await?
            .ok_or_else(|| ClaimError::ClaimNotFound(claim_id.to_string()))
    }
}
