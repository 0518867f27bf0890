//! Claims DTOs

use serde::Deserialize;
use validator::Validate;

use core_kernel::ListingId;
use domain_claims::{ClaimView, SubmitClaim};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitClaimRequest {
    pub listing_id: Option<ListingId>,
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}

impl From<SubmitClaimRequest> for SubmitClaim {
    fn from(req: SubmitClaimRequest) -> Self {
        SubmitClaim {
            listing_id: req.listing_id,
            phone: req.phone,
            message: req.message,
        }
    }
}

/// Admin decision; `status` must be `"approved"` or `"denied"`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewClaimRequest {
    pub status: String,
    #[validate(length(max = 2000))]
    pub admin_notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminClaimsQuery {
    #[serde(default)]
    pub view: ClaimView,
}
