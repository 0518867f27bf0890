//! Claim aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, ListingId, UserId};

use crate::error::ClaimError;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Awaiting admin review
    Pending,
    /// Approved; the claimant owns the listing
    Approved,
    /// Denied
    Denied,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Denied => "denied",
        }
    }

    /// No transition leaves a terminal status
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ClaimStatus::Pending)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ClaimStatus::Pending),
            "approved" => Ok(ClaimStatus::Approved),
            "denied" => Ok(ClaimStatus::Denied),
            other => Err(ClaimError::validation(format!("unknown claim status '{}'", other))),
        }
    }
}

/// Outcome of an admin review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Denied,
}

impl ReviewDecision {
    /// Status the claim ends up in
    pub fn status(&self) -> ClaimStatus {
        match self {
            ReviewDecision::Approved => ClaimStatus::Approved,
            ReviewDecision::Denied => ClaimStatus::Denied,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.status().as_str()
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewDecision {
    type Err = ClaimError;

    /// Only `"approved"` and `"denied"` are decisions; `"pending"` is not
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(ReviewDecision::Approved),
            "denied" => Ok(ReviewDecision::Denied),
            other => Err(ClaimError::validation(format!(
                "decision must be \"approved\" or \"denied\", got '{}'",
                other
            ))),
        }
    }
}

/// A user's claim of ownership over a listing
///
/// `reviewed_at` and `reviewed_by` are set exactly when the claim leaves
/// `Pending`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Claimant
    pub user_id: UserId,
    /// Claimed listing
    pub listing_id: ListingId,
    /// Status
    pub status: ClaimStatus,
    /// Contact phone, never blank
    pub phone: String,
    /// Optional note from the claimant
    pub message: Option<String>,
    /// Optional note from the reviewing admin
    pub admin_notes: Option<String>,
    /// Reviewing admin
    pub reviewed_by: Option<UserId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Review timestamp
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl Claim {
    /// Creates a pending claim
    pub fn new(new: NewClaim) -> Self {
        Self {
            id: ClaimId::new_v7(),
            user_id: new.user_id,
            listing_id: new.listing_id,
            status: ClaimStatus::Pending,
            phone: new.phone,
            message: new.message,
            admin_notes: None,
            reviewed_by: None,
            created_at: Utc::now(),
            reviewed_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ClaimStatus::Pending
    }

    /// Applies an admin decision
    ///
    /// Fails with `NotPending` when the claim was already reviewed.
    pub fn apply_review(
        &mut self,
        decision: ReviewDecision,
        reviewer_id: UserId,
        admin_notes: Option<String>,
        reviewed_at: DateTime<Utc>,
    ) -> Result<(), ClaimError> {
        if !self.can_transition_to(decision.status()) {
            return Err(self.not_pending());
        }
        self.status = decision.status();
        self.admin_notes = admin_notes;
        self.reviewed_by = Some(reviewer_id);
        self.reviewed_at = Some(reviewed_at);
        Ok(())
    }

    /// The conflict error for an operation that needs a pending claim
    pub fn not_pending(&self) -> ClaimError {
        ClaimError::NotPending {
            claim_id: self.id.to_string(),
            status: self.status,
        }
    }

    fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!((self.status, target), (Pending, Approved) | (Pending, Denied))
    }
}

/// Validated data for creating a claim
#[derive(Debug, Clone)]
pub struct NewClaim {
    pub user_id: UserId,
    pub listing_id: ListingId,
    pub phone: String,
    pub message: Option<String>,
}

/// A claim with the listing and claimant details an admin or dashboard needs
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDetail {
    #[serde(flatten)]
    pub claim: Claim,
    pub listing_name: Option<String>,
    pub listing_slug: Option<String>,
    pub claimant_email: Option<String>,
    pub claimant_name: Option<String>,
}
