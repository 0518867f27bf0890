//! PostgreSQL Claim Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{ClaimId, DomainPort, HealthCheckResult, HealthCheckable, ListingId, PortError, UserId};
use domain_claims::{Claim, ClaimPort, ClaimQuery, ClaimStatus, NewClaim, ReviewRecord};

use crate::error::DatabaseError;
use crate::repositories::claims::{ClaimRepository, ClaimRow, NewClaimRecord, ReviewUpdate};

/// PostgreSQL-backed implementation of the ClaimPort trait
///
/// Duplicate submissions are rejected by the `claims_user_listing_key`
/// unique index; approvals update the claim and the listing owner in one
/// transaction.
#[derive(Debug, Clone)]
pub struct PostgresClaimAdapter {
    repository: ClaimRepository,
    pool: PgPool,
}

impl PostgresClaimAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresClaimAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClaimAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-claim-adapter").await
    }
}

#[async_trait]
impl ClaimPort for PostgresClaimAdapter {
    #[instrument(skip(self, claim), fields(user_id = %claim.user_id, listing_id = %claim.listing_id))]
    async fn insert_claim(&self, claim: NewClaim) -> Result<Claim, PortError> {
        let claim = Claim::new(claim);
        let listing_id = claim.listing_id;
        debug!(claim_id = %claim.id, "Inserting claim");

        let row = self
            .repository
            .insert(NewClaimRecord {
                id: claim.id.into(),
                user_id: claim.user_id.into(),
                listing_id: listing_id.into(),
                phone: claim.phone,
                message: claim.message,
                created_at: claim.created_at,
            })
            .await
            .map_err(|e| match e {
                // Listing removed after the workflow looked it up
                DatabaseError::ForeignKeyViolation(_) => PortError::not_found("Listing", listing_id),
                other => other.into(),
            })?;
        row_to_claim(row)
    }

    async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        let row = self.repository.get_by_id(id.into()).await?;
        row.map(row_to_claim).transpose()
    }

    async fn list_claims(&self, query: &ClaimQuery) -> Result<Vec<Claim>, PortError> {
        self.repository
            .find(
                query.status.map(|s| s.as_str()),
                query.user_id.map(Into::into),
                query.listing_id.map(Into::into),
            )
            .await?
            .into_iter()
            .map(row_to_claim)
            .collect()
    }

    #[instrument(skip(self, review), fields(claim_id = %review.claim_id, decision = %review.decision))]
    async fn record_review(&self, review: ReviewRecord) -> Result<Claim, PortError> {
        let row = self
            .repository
            .review(ReviewUpdate {
                claim_id: review.claim_id.into(),
                status: review.decision.as_str(),
                reviewer_id: review.reviewer_id.into(),
                admin_notes: review.admin_notes,
                reviewed_at: review.reviewed_at,
            })
            .await?;
        row_to_claim(row)
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn delete_pending_claim(&self, id: ClaimId) -> Result<(), PortError> {
        self.repository.delete_pending(id.into()).await?;
        Ok(())
    }
}

fn row_to_claim(row: ClaimRow) -> Result<Claim, PortError> {
    let status = row
        .status
        .parse::<ClaimStatus>()
        .map_err(|e| DatabaseError::Decode(e.to_string()))?;
    Ok(Claim {
        id: ClaimId::from(row.id),
        user_id: UserId::from(row.user_id),
        listing_id: ListingId::from(row.listing_id),
        status,
        phone: row.phone,
        message: row.message,
        admin_notes: row.admin_notes,
        reviewed_by: row.reviewed_by.map(UserId::from),
        created_at: row.created_at,
        reviewed_at: row.reviewed_at,
    })
}
