//! Claims repository implementation
//!
//! Reviews and withdrawals are conditional on the row still being pending,
//! so concurrent callers cannot both act on the same claim.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for listing claims
#[derive(Debug, Clone)]
pub struct ClaimRepository {
    pool: PgPool,
}

impl ClaimRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a claim by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<ClaimRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT id, user_id, listing_id, status, phone, message, admin_notes,
                   reviewed_by, created_at, reviewed_at
            FROM claims
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Claims matching the filters, newest first
    pub async fn find(
        &self,
        status: Option<&str>,
        user_id: Option<Uuid>,
        listing_id: Option<Uuid>,
    ) -> Result<Vec<ClaimRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT id, user_id, listing_id, status, phone, message, admin_notes,
                   reviewed_by, created_at, reviewed_at
            FROM claims
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR user_id = $2)
              AND ($3::uuid IS NULL OR listing_id = $3)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(status)
        .bind(user_id)
        .bind(listing_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Inserts a pending claim
    ///
    /// # Errors
    ///
    /// `DuplicateEntry { constraint: "claims_user_listing_key" }` when the
    /// user already holds a claim on the listing
    pub async fn insert(&self, claim: NewClaimRecord) -> Result<ClaimRow, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            INSERT INTO claims (id, user_id, listing_id, status, phone, message, created_at)
            VALUES ($1, $2, $3, 'pending', $4, $5, $6)
            RETURNING id, user_id, listing_id, status, phone, message, admin_notes,
                      reviewed_by, created_at, reviewed_at
            "#,
        )
        .bind(claim.id)
        .bind(claim.user_id)
        .bind(claim.listing_id)
        .bind(&claim.phone)
        .bind(&claim.message)
        .bind(claim.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Records a review and, for an approval, transfers the listing
    ///
    /// Both updates run in one transaction. The claim update only matches a
    /// pending row, so of two concurrent reviews exactly one commits.
    ///
    /// # Errors
    ///
    /// * `NotFound` if the claim (or, on approval, its listing) does not exist
    /// * `StaleState` if the claim is no longer pending
    pub async fn review(&self, review: ReviewUpdate) -> Result<ClaimRow, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, ClaimRow>(
            r#"
            UPDATE claims
            SET status = $2, reviewed_by = $3, admin_notes = $4, reviewed_at = $5
            WHERE id = $1 AND status = 'pending'
            RETURNING id, user_id, listing_id, status, phone, message, admin_notes,
                      reviewed_by, created_at, reviewed_at
            "#,
        )
        .bind(review.claim_id)
        .bind(review.status)
        .bind(review.reviewer_id)
        .bind(&review.admin_notes)
        .bind(review.reviewed_at)
        .fetch_optional(&mut *tx)
        .await?;

        let claim = match updated {
            Some(claim) => claim,
            None => {
                let current: Option<String> =
                    sqlx::query_scalar("SELECT status FROM claims WHERE id = $1")
                        .bind(review.claim_id)
                        .fetch_optional(&mut *tx)
                        .await?;
                return Err(match current {
                    None => DatabaseError::not_found("Claim", review.claim_id),
                    Some(status) => DatabaseError::StaleState(format!(
                        "claim {} is already {}",
                        review.claim_id, status
                    )),
                });
            }
        };

        if review.status == "approved" {
            let result = sqlx::query(
                "UPDATE listings SET owner_id = $2, updated_at = $3 WHERE id = $1",
            )
            .bind(claim.listing_id)
            .bind(claim.user_id)
            .bind(review.reviewed_at)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                // Dropping the transaction rolls back the claim update
                return Err(DatabaseError::not_found("Listing", claim.listing_id));
            }
        }

        tx.commit().await?;
        Ok(claim)
    }

    /// Deletes a claim only while it is pending
    ///
    /// # Errors
    ///
    /// * `NotFound` if the claim does not exist
    /// * `StaleState` if it has been reviewed
    pub async fn delete_pending(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM claims WHERE id = $1 AND status = 'pending'")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        match self.get_by_id(id).await? {
            None => Err(DatabaseError::not_found("Claim", id)),
            Some(row) => Err(DatabaseError::StaleState(format!(
                "claim {} is already {}",
                id, row.status
            ))),
        }
    }
}

/// Database row for a claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub listing_id: Uuid,
    pub status: String,
    pub phone: String,
    pub message: Option<String>,
    pub admin_notes: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Column values for a new claim
#[derive(Debug, Clone)]
pub struct NewClaimRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub listing_id: Uuid,
    pub phone: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A review to apply to a pending claim
#[derive(Debug, Clone)]
pub struct ReviewUpdate {
    pub claim_id: Uuid,
    /// `"approved"` or `"denied"`
    pub status: &'static str,
    pub reviewer_id: Uuid,
    pub admin_notes: Option<String>,
    pub reviewed_at: DateTime<Utc>,
}
